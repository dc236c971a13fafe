// ============================================================================
// 命令行装配服务：构建配置验证、打包工具参数列表装配
// 纯 Rust 函数，不依赖 tauri::*，方便单元测试
// ============================================================================

use std::path::{Path, PathBuf};

use crate::models::dtos::BuildConfiguration;
use crate::services::{COMPRESSOR_PROGRAM, EXCLUDED_MODULES, PACKAGER_PROGRAM};
use crate::utils::error::{AppError, AppResult};

/// 验证构建配置：入口脚本与输出目录都不能为空
///
/// 验证先于一切文件系统操作和进程启动；输出目录为空时直接报错，
/// 不静默代填默认值。
pub fn validate_configuration(config: &BuildConfiguration) -> AppResult<()> {
    let entry_empty = config.entry_point.trim().is_empty();
    let output_empty = config.output_directory.trim().is_empty();

    match (entry_empty, output_empty) {
        (true, true) => Err(AppError::ValidationError(
            "请选择入口脚本并填写输出目录".to_string(),
        )),
        (true, false) => Err(AppError::ValidationError(
            "请选择入口脚本".to_string(),
        )),
        (false, true) => Err(AppError::ValidationError(
            "输出目录不能为空".to_string(),
        )),
        (false, false) => Ok(()),
    }
}

/// 解析隐藏导入输入框原文：按逗号拆分、去首尾空白、丢弃空项
///
/// 保持输入顺序，不去重（重复项原样传给打包工具）。
pub fn parse_hidden_imports(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// 在 PATH 上探测压缩工具，返回其所在目录
///
/// 找不到时返回 None，由调用方静默降级，不构成错误。
pub fn find_compressor_dir() -> Option<PathBuf> {
    which::which(COMPRESSOR_PROGRAM)
        .ok()
        .and_then(|path| path.parent().map(Path::to_path_buf))
}

/// 装配打包命令：首元素为程序名，其余为固定顺序的参数
///
/// 顺序：模式开关 → 无控制台 → 排除模块 → 压缩目录（可选）→ 入口脚本 →
/// 文件名覆盖（可选）→ 数据映射 → 隐藏导入 → 图标（可选）→ 输出目录。
/// `compressor_dir` 由调用方先行探测后传入，本函数保持无副作用。
pub fn assemble_command(
    config: &BuildConfiguration,
    compressor_dir: Option<&Path>,
) -> AppResult<Vec<String>> {
    validate_configuration(config)?;

    let mode_flag = if config.one_file_mode {
        "--onefile"
    } else {
        "--onedir"
    };
    let mut command = vec![
        PACKAGER_PROGRAM.to_string(),
        mode_flag.to_string(),
        "--noconsole".to_string(),
    ];

    for module in EXCLUDED_MODULES {
        command.push("--exclude-module".to_string());
        command.push((*module).to_string());
    }

    if let Some(dir) = compressor_dir {
        command.push("--upx-dir".to_string());
        command.push(dir.to_string_lossy().to_string());
    }

    command.push(config.entry_point.clone());

    let name = config.executable_name.trim();
    if !name.is_empty() {
        command.push("--name".to_string());
        command.push(name.to_string());
    }

    // 数据映射按添加顺序原样拼接，不转义、不检查路径内容
    for mapping in &config.data_mappings {
        command.push("--add-data".to_string());
        command.push(format!("{};{}", mapping.source, mapping.destination));
    }

    for token in parse_hidden_imports(&config.hidden_imports) {
        command.push("--hidden-import".to_string());
        command.push(token);
    }

    let icon = config.icon_path.trim();
    if !icon.is_empty() {
        command.push("--icon".to_string());
        command.push(icon.to_string());
    }

    command.push("--distpath".to_string());
    command.push(config.output_directory.clone());

    Ok(command)
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dtos::DataMapping;
    use proptest::prelude::*;

    fn base_config() -> BuildConfiguration {
        BuildConfiguration {
            entry_point: "app/main.py".to_string(),
            executable_name: String::new(),
            data_mappings: Vec::new(),
            hidden_imports: String::new(),
            icon_path: String::new(),
            output_directory: "dist".to_string(),
            one_file_mode: true,
        }
    }

    /// 提取某个重复 flag 的全部取值，保持出现顺序
    fn flag_values(command: &[String], flag: &str) -> Vec<String> {
        command
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].clone())
            .collect()
    }

    #[test]
    fn test_validate_configuration_valid() {
        assert!(validate_configuration(&base_config()).is_ok());
    }

    #[test]
    fn test_empty_entry_point_rejected() {
        let mut config = base_config();
        config.entry_point = "   ".to_string();
        let result = assemble_command(&config, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("入口脚本"));
    }

    #[test]
    fn test_empty_output_directory_rejected() {
        let mut config = base_config();
        config.output_directory = String::new();
        let result = assemble_command(&config, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("输出目录"));
    }

    #[test]
    fn test_both_empty_rejected() {
        let mut config = base_config();
        config.entry_point = String::new();
        config.output_directory = String::new();
        let err = assemble_command(&config, None).unwrap_err().to_string();
        assert!(err.contains("入口脚本"));
        assert!(err.contains("输出目录"));
    }

    #[test]
    fn test_one_file_mode_flag() {
        let command = assemble_command(&base_config(), None).unwrap();
        assert!(command.contains(&"--onefile".to_string()));
        assert!(!command.contains(&"--onedir".to_string()));
    }

    #[test]
    fn test_one_dir_mode_flag() {
        let mut config = base_config();
        config.one_file_mode = false;
        let command = assemble_command(&config, None).unwrap();
        assert!(command.contains(&"--onedir".to_string()));
        assert!(!command.contains(&"--onefile".to_string()));
    }

    #[test]
    fn test_fixed_prefix_and_excludes() {
        let command = assemble_command(&base_config(), None).unwrap();
        assert_eq!(command[0], PACKAGER_PROGRAM);
        assert_eq!(command[1], "--onefile");
        assert_eq!(command[2], "--noconsole");
        assert_eq!(flag_values(&command, "--exclude-module").len(), EXCLUDED_MODULES.len());
        for module in EXCLUDED_MODULES {
            assert!(flag_values(&command, "--exclude-module").contains(&module.to_string()));
        }
    }

    #[test]
    fn test_compressor_dir_present() {
        let command =
            assemble_command(&base_config(), Some(Path::new("/opt/upx"))).unwrap();
        assert_eq!(flag_values(&command, "--upx-dir"), vec!["/opt/upx".to_string()]);
    }

    #[test]
    fn test_compressor_dir_absent_is_silent() {
        let command = assemble_command(&base_config(), None).unwrap();
        assert!(!command.contains(&"--upx-dir".to_string()));
    }

    #[test]
    fn test_executable_name_trimmed_and_optional() {
        let mut config = base_config();
        config.executable_name = "  my-app  ".to_string();
        let command = assemble_command(&config, None).unwrap();
        assert_eq!(flag_values(&command, "--name"), vec!["my-app".to_string()]);

        config.executable_name = "   ".to_string();
        let command = assemble_command(&config, None).unwrap();
        assert!(!command.contains(&"--name".to_string()));
    }

    #[test]
    fn test_data_mappings_in_order_and_splittable() {
        let mut config = base_config();
        config.data_mappings = vec![
            DataMapping { source: "assets/logo.png".to_string(), destination: ".".to_string() },
            DataMapping { source: "conf/".to_string(), destination: "conf".to_string() },
            DataMapping { source: "assets/logo.png".to_string(), destination: ".".to_string() },
        ];
        let command = assemble_command(&config, None).unwrap();
        let values = flag_values(&command, "--add-data");
        assert_eq!(values.len(), 3);
        let pairs: Vec<(String, String)> = values
            .iter()
            .map(|value| {
                let (source, destination) = value.split_once(';').unwrap();
                (source.to_string(), destination.to_string())
            })
            .collect();
        assert_eq!(pairs[0], ("assets/logo.png".to_string(), ".".to_string()));
        assert_eq!(pairs[1], ("conf/".to_string(), "conf".to_string()));
        // 重复映射不去重
        assert_eq!(pairs[2], pairs[0]);
    }

    #[test]
    fn test_hidden_imports_tokenization() {
        assert_eq!(parse_hidden_imports("a, ,b ,"), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(parse_hidden_imports(""), Vec::<String>::new());
        // 重复 token 保留
        assert_eq!(
            parse_hidden_imports("requests,requests"),
            vec!["requests".to_string(), "requests".to_string()]
        );
    }

    #[test]
    fn test_hidden_import_flags_in_order() {
        let mut config = base_config();
        config.hidden_imports = "pkg_resources, win32com ,pkg_resources".to_string();
        let command = assemble_command(&config, None).unwrap();
        assert_eq!(
            flag_values(&command, "--hidden-import"),
            vec![
                "pkg_resources".to_string(),
                "win32com".to_string(),
                "pkg_resources".to_string()
            ]
        );
    }

    #[test]
    fn test_icon_trimmed_and_optional() {
        let mut config = base_config();
        config.icon_path = " app.ico ".to_string();
        let command = assemble_command(&config, None).unwrap();
        assert_eq!(flag_values(&command, "--icon"), vec!["app.ico".to_string()]);

        config.icon_path = String::new();
        let command = assemble_command(&config, None).unwrap();
        assert!(!command.contains(&"--icon".to_string()));
    }

    #[test]
    fn test_output_directory_flag_is_last() {
        let mut config = base_config();
        config.output_directory = "out/release".to_string();
        let command = assemble_command(&config, None).unwrap();
        let len = command.len();
        assert_eq!(command[len - 2], "--distpath");
        assert_eq!(command[len - 1], "out/release");
    }

    // ========================================================================
    // 属性测试
    // ========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// 任意数据映射序列经装配后，应能按 ';' 拆回原序列（含重复项、含顺序）
        #[test]
        fn prop_data_mappings_round_trip(
            pairs in proptest::collection::vec(
                ("[a-zA-Z0-9_./]{1,16}", "[a-zA-Z0-9_./]{1,16}"),
                0..8,
            )
        ) {
            let mut config = base_config();
            config.data_mappings = pairs
                .iter()
                .map(|(source, destination)| DataMapping {
                    source: source.clone(),
                    destination: destination.clone(),
                })
                .collect();

            let command = assemble_command(&config, None).unwrap();
            let reconstructed: Vec<(String, String)> = flag_values(&command, "--add-data")
                .iter()
                .map(|value| {
                    let (source, destination) = value.split_once(';').unwrap();
                    (source.to_string(), destination.to_string())
                })
                .collect();

            prop_assert_eq!(reconstructed, pairs);
        }

        /// 任意 token 序列以逗号（带随机空白）拼接后，解析结果等于原序列
        #[test]
        fn prop_hidden_imports_preserve_order(
            tokens in proptest::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,10}", 0..8),
            pad in "[ \\t]{0,3}",
        ) {
            let raw = tokens
                .iter()
                .map(|token| format!("{}{}{}", pad, token, pad))
                .collect::<Vec<_>>()
                .join(",");
            prop_assert_eq!(parse_hidden_imports(&raw), tokens);
        }
    }
}

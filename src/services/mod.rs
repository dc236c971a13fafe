// ============================================================================
// 业务层：纯 Rust 核心逻辑
// ✅ 特点：尽量不依赖 `tauri::*`，保持纯净，方便写 #[test]
// ⛔ 禁止：直接返回前端专用的错误格式
// ============================================================================

pub mod command_line;
pub mod runner;

// ============================================================================
// 常量定义
// ============================================================================

/// 打包工具可执行文件名，在 PATH 上解析
pub const PACKAGER_PROGRAM: &str = "pyinstaller";

/// 打包工具的临时构建目录（固定名），每次构建前后都要清掉
pub const BUILD_DIRECTORY: &str = "build";

/// 打包工具在工作目录生成的规格文件扩展名，按此后缀清理
pub const SPECIFICATION_EXTENSION: &str = "spec";

/// 排除模块黑名单：默认从打包产物剔除的模块，用于压缩体积
/// 固定策略，不暴露给用户配置
pub const EXCLUDED_MODULES: &[&str] = &["sitecustomize", "pydoc", "doctest", "unittest"];

/// 压缩工具可执行文件名；PATH 上找不到时静默跳过，不报错
pub const COMPRESSOR_PROGRAM: &str = "upx";

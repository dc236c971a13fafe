// ============================================================================
// 数据传输对象（DTO）定义
// 前后端通信的数据结构，仅包含字段定义和序列化派生
// ⛔ 禁止：包含复杂的业务逻辑方法
// ============================================================================

use serde::{Deserialize, Serialize};

/// 数据映射：打包时额外附带的一个文件或文件夹
///
/// `source` 末尾带路径分隔符表示源是文件夹而非单个文件 —— 这是字符串
/// 约定，原样传给打包工具，本系统不做解释。
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DataMapping {
    /// 源路径（文件，或末尾带分隔符的文件夹）
    pub source: String,
    /// 相对可执行文件的目标目录
    pub destination: String,
}

/// 构建配置：启动构建时由前端整体提交，构建期间不再读取界面状态
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BuildConfiguration {
    /// 入口脚本路径，必填
    pub entry_point: String,
    /// 可执行文件名覆盖，空串表示沿用默认
    pub executable_name: String,
    /// 数据映射列表，保持添加顺序，不去重
    pub data_mappings: Vec<DataMapping>,
    /// 隐藏导入输入框原文（逗号分隔，装配时再解析）
    pub hidden_imports: String,
    /// 图标文件路径，空串表示不设置图标
    pub icon_path: String,
    /// 输出目录，必填（前端默认填 "dist"，后端不代填）
    pub output_directory: String,
    /// true 打单文件，false 打目录
    pub one_file_mode: bool,
}

/// 数据源选择结果，由 `pick_data_source` command 返回
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DataSourcePick {
    /// 所选路径；文件夹已在末尾追加路径分隔符
    pub source: String,
    /// 建议的目标目录（文件 → "."，文件夹 → 其自身名字），前端可改
    pub suggested_destination: String,
    /// 所选的是否为文件夹
    pub is_directory: bool,
}

/// 压缩工具探测结果，由 `detect_compressor` command 返回
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CompressorInfo {
    /// PATH 上是否找到压缩工具
    pub available: bool,
    /// 找到时为其所在目录
    pub directory: Option<String>,
}

/// 构建结果：`build-finished` 事件的载荷
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BuildOutcome {
    /// 打包进程是否以零码退出
    pub success: bool,
    /// 进程退出码；进程未能启动时为 None
    pub exit_code: Option<i32>,
    /// 进程未能启动/输出流读取失败时的错误描述，供前端弹窗提示
    pub error: Option<String>,
    /// 构建结束的本地时间
    pub finished_at: String,
}

// ============================================================================
// 统一错误类型定义
// 使用 thiserror 派生宏，遵循 Rust 错误处理最佳实践
// ============================================================================

use thiserror::Error;

/// 应用统一错误枚举
///
/// 覆盖所有业务场景的错误类型，每个变体对应一类错误。
/// 通过 `impl From<AppError> for String` 保持与现有 Tauri command 的兼容性
/// （Tauri command 要求返回 `Result<T, String>`）。
///
/// 注意：打包进程以非零码退出不是 AppError —— 那是一次正常结束的构建，
/// 通过日志与 BuildOutcome 上报，不走错误通道。
#[derive(Debug, Error)]
pub enum AppError {
    /// 参数验证失败（如未选择入口脚本、输出目录为空）
    #[error("验证失败：{0}")]
    ValidationError(String),

    /// 打包进程无法启动，或其输出流无法读取
    #[error("无法运行打包工具：{0}")]
    SpawnError(String),

    /// 已有构建在进行中（同一时刻只允许一个构建）
    #[error("已有构建正在进行，请等待其完成")]
    BuildInProgress,

    /// 文件系统 IO 错误
    #[error("IO 错误：{0}")]
    IoError(#[from] std::io::Error),

    /// 用户取消操作（如关闭文件选择对话框）
    #[error("cancelled")]
    Cancelled,

    /// 系统文件管理器打开失败
    #[error("打开文件夹失败：{0}")]
    OpenFolderError(String),
}

/// 便捷类型别名，统一项目内的 Result 签名
pub type AppResult<T> = Result<T, AppError>;

/// 将 AppError 转换为 String，保持与 Tauri command 返回类型的兼容性
///
/// Tauri 的 `#[tauri::command]` 要求错误类型为 `String`，
/// 此转换确保所有错误都能正确传递到前端。
impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}

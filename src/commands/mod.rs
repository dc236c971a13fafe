// ============================================================================
// Commands 层：前端可调用的 Tauri command 薄接口
// ✅ 只能做：接收前端参数、调用 services、把结果/事件交回前端
// ⛔ 禁止：包含业务逻辑
// ============================================================================

pub mod build;
pub mod config;

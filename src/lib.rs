// ============================================================================
// [总线] 程序的组装车间
// ✅ 只能做：pub mod 暴露子模块、注册 .invoke_handler()、初始化 State
// ⛔ 禁止：直接实现 command 函数
// ============================================================================

pub mod commands;
pub mod models;
pub mod services;
pub mod utils;

use tauri::Manager;

// ============================================================================
// 应用入口
// ============================================================================

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_process::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // 注册构建状态为 Tauri managed state（同一时刻只允许一个构建）
            app.manage(commands::build::BuildState::default());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // 配置 commands
            commands::config::pick_entry_point,
            commands::config::pick_icon,
            commands::config::pick_output_directory,
            commands::config::pick_data_source,
            // 构建 commands
            commands::build::start_build,
            commands::build::detect_compressor,
            commands::build::open_output_folder,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

// ============================================================================
// 配置相关 Commands
// 负责：各类路径选择对话框（入口脚本、图标、输出目录、数据文件/文件夹）
// ============================================================================

use std::path::MAIN_SEPARATOR;

use tauri_plugin_dialog::DialogExt;

use crate::models::dtos::DataSourcePick;

/// 选择入口脚本：弹出原生文件选择对话框，限定 Python 脚本
#[tauri::command]
pub async fn pick_entry_point(app: tauri::AppHandle) -> Result<String, String> {
    let file = app
        .dialog()
        .file()
        .add_filter("Python 脚本", &["py"])
        .blocking_pick_file();

    // 用户取消了对话框
    let file = match file {
        Some(f) => f,
        None => return Err("cancelled".to_string()),
    };

    let path = file
        .as_path()
        .ok_or_else(|| "无法解析所选文件路径".to_string())?;
    Ok(path.to_string_lossy().to_string())
}

/// 选择图标文件：优先展示 .ico，也允许任意文件
#[tauri::command]
pub async fn pick_icon(app: tauri::AppHandle) -> Result<String, String> {
    let file = app
        .dialog()
        .file()
        .add_filter("图标文件", &["ico"])
        .add_filter("所有文件", &["*"])
        .blocking_pick_file();

    let file = match file {
        Some(f) => f,
        None => return Err("cancelled".to_string()),
    };

    let path = file
        .as_path()
        .ok_or_else(|| "无法解析所选文件路径".to_string())?;
    Ok(path.to_string_lossy().to_string())
}

/// 选择输出目录：弹出原生文件夹选择对话框
#[tauri::command]
pub async fn pick_output_directory(app: tauri::AppHandle) -> Result<String, String> {
    let folder = app.dialog().file().blocking_pick_folder();

    let folder = match folder {
        Some(f) => f,
        None => return Err("cancelled".to_string()),
    };

    let path = folder
        .as_path()
        .ok_or_else(|| "无法解析所选文件夹路径".to_string())?;
    Ok(path.to_string_lossy().to_string())
}

/// 选择要附带的数据源（文件或文件夹）
///
/// 文件夹路径末尾追加路径分隔符，作为"源是目录"的记号原样传给打包
/// 工具；同时给出建议目标目录（文件 → "."，文件夹 → 其自身名字），
/// 用户在前端可以改掉再确认添加。
#[tauri::command]
pub async fn pick_data_source(
    app: tauri::AppHandle,
    directory: bool,
) -> Result<DataSourcePick, String> {
    if directory {
        let folder = app.dialog().file().blocking_pick_folder();
        let folder = match folder {
            Some(f) => f,
            None => return Err("cancelled".to_string()),
        };

        let path = folder
            .as_path()
            .ok_or_else(|| "无法解析所选文件夹路径".to_string())?;
        let base_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Ok(DataSourcePick {
            source: format!("{}{}", path.to_string_lossy(), MAIN_SEPARATOR),
            suggested_destination: base_name,
            is_directory: true,
        })
    } else {
        let file = app.dialog().file().blocking_pick_file();
        let file = match file {
            Some(f) => f,
            None => return Err("cancelled".to_string()),
        };

        let path = file
            .as_path()
            .ok_or_else(|| "无法解析所选文件路径".to_string())?;

        Ok(DataSourcePick {
            source: path.to_string_lossy().to_string(),
            suggested_destination: ".".to_string(),
            is_directory: false,
        })
    }
}

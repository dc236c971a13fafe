// ============================================================================
// 构建相关 Commands
// 负责：驱动一次构建（后台线程 + 事件转发）、压缩工具探测、打开输出目录
// ============================================================================

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tauri::{Emitter, Manager};

use crate::models::dtos::{BuildConfiguration, BuildOutcome, CompressorInfo};
use crate::services::command_line::{assemble_command, find_compressor_dir};
use crate::services::runner::{self, BuildLog};
use crate::utils::error::AppError;

/// 构建单飞行状态：同一时刻只允许一个构建在跑
///
/// 前端在构建期间会禁用启动按钮，这里是后端兜底。
#[derive(Default)]
pub struct BuildState {
    running: AtomicBool,
}

impl BuildState {
    /// 尝试进入"构建中"；已有构建在跑时返回 false
    fn try_begin(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// 回到空闲，允许下一次构建启动
    fn finish(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// 把日志行作为 `build-log` 事件转发给前端的 BuildLog 实现
///
/// 工作线程不直接触碰任何界面状态，全部更新经由事件队列送达前端。
struct EventLog {
    app: tauri::AppHandle,
}

impl BuildLog for EventLog {
    fn append(&self, line: &str) {
        // 事件发送失败（如窗口已销毁）时丢弃该行，不中断构建
        let _ = self.app.emit("build-log", line.to_string());
    }
}

/// 启动一次构建
///
/// 验证失败时同步返回错误，不触碰文件系统也不启动进程；验证通过后
/// 立即返回，构建在后台线程进行，过程经 `build-log` 事件逐行回报，
/// 结束经 `build-finished` 事件给出最终状态。构建一旦开始无法取消，
/// 只能等打包进程自行退出。
#[tauri::command]
pub async fn start_build(
    app: tauri::AppHandle,
    state: tauri::State<'_, BuildState>,
    config: BuildConfiguration,
) -> Result<(), String> {
    if !state.try_begin() {
        return Err(AppError::BuildInProgress.into());
    }

    // 验证与装配先行，失败即回到空闲并把错误交回前端
    let compressor_dir = find_compressor_dir();
    let command = match assemble_command(&config, compressor_dir.as_deref()) {
        Ok(command) => command,
        Err(err) => {
            state.finish();
            return Err(err.into());
        }
    };

    let workdir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            state.finish();
            return Err(AppError::IoError(err).into());
        }
    };

    log::info!("开始构建: {}", config.entry_point);

    let worker_app = app.clone();
    tauri::async_runtime::spawn_blocking(move || {
        // 即使 run_build panic 也要回到空闲，否则启动按钮永久失效
        let guard_app = worker_app.clone();
        let idle_guard = scopeguard::guard((), move |_| {
            guard_app.state::<BuildState>().finish();
        });

        let log_sink = EventLog { app: worker_app.clone() };
        let outcome = match runner::run_build(&command, &workdir, &log_sink) {
            Ok(outcome) => outcome,
            Err(err) => {
                // 启动失败等异常：错误文本已写入日志，这里再走错误通道
                log::warn!("构建未能完成: {}", err);
                BuildOutcome {
                    success: false,
                    exit_code: None,
                    error: Some(err.to_string()),
                    finished_at: runner::finished_timestamp(),
                }
            }
        };

        // 先回到空闲再发最终事件，前端收到事件时即可再次启动构建
        drop(idle_guard);
        let _ = worker_app.emit("build-finished", outcome);
    });

    Ok(())
}

/// 探测压缩工具（UPX）：返回是否可用及其所在目录，供界面提示
///
/// 找不到不是错误 —— 构建会静默跳过压缩，这里只是把这个静默降级
/// 摆到用户眼前。
#[tauri::command]
pub async fn detect_compressor() -> Result<CompressorInfo, String> {
    let directory = find_compressor_dir();
    Ok(CompressorInfo {
        available: directory.is_some(),
        directory: directory.map(|dir| dir.to_string_lossy().to_string()),
    })
}

/// 打开输出目录：在系统文件管理器中展示构建产物
#[tauri::command]
pub async fn open_output_folder(path: String) -> Result<(), String> {
    if !Path::new(&path).is_dir() {
        return Err(AppError::OpenFolderError(format!("输出目录不存在：{}", path)).into());
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer.exe")
            .arg(&path)
            .spawn()
            .map_err(|e| format!("打开文件夹失败：无法启动资源管理器 - {}", e))?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(&path)
            .spawn()
            .map_err(|e| format!("打开文件夹失败：无法启动 Finder - {}", e))?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(&path)
            .spawn()
            .map_err(|e| format!("打开文件夹失败：无法启动文件管理器 - {}", e))?;
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        return Err("打开文件夹失败：不支持当前操作系统".to_string());
    }

    Ok(())
}

// ============================================================================
// 单元测试
// ============================================================================

// ============================================================================
// 构建执行服务：清理临时产物、驱动打包子进程、逐行转发输出
// 通过 BuildLog 接口与界面解耦，不依赖 tauri::*，方便单元测试
// ============================================================================

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::models::dtos::BuildOutcome;
use crate::services::{BUILD_DIRECTORY, SPECIFICATION_EXTENSION};
use crate::utils::error::{AppError, AppResult};

/// 日志接收端最小能力接口：只需要"追加一行"
///
/// command 层用 Tauri 事件实现它，测试用内存 Vec 实现它。
pub trait BuildLog: Send + Sync {
    /// 追加一行日志（不含换行符），按到达顺序呈现
    fn append(&self, line: &str);
}

/// 清理打包工具留下的临时产物：build/ 目录与工作目录下的 *.spec 文件
///
/// 产物不存在时为无操作。构建开始前调用一次（上次失败的残留不得污染
/// 本次构建），结束后无论成败再调用一次。
pub fn cleanup_build_artifacts(workdir: &Path) -> AppResult<()> {
    let build_dir = workdir.join(BUILD_DIRECTORY);
    if build_dir.is_dir() {
        std::fs::remove_dir_all(&build_dir)?;
    }

    for entry in std::fs::read_dir(workdir)? {
        let path = entry?.path();
        let is_specification = path
            .extension()
            .map(|ext| ext == SPECIFICATION_EXTENSION)
            .unwrap_or(false);
        if is_specification && path.is_file() {
            std::fs::remove_file(&path)?;
        }
    }

    Ok(())
}

/// 执行一次构建：前置清理 → 启动子进程 → 逐行转发 → 收尾清理 → 最终通知
///
/// 日志行按到达顺序逐行转发，不攒批；成功/失败通知严格排在最后一行
/// 输出与收尾清理之后。进程未能启动或输出流异常时返回 SpawnError，
/// 错误文本同时写入日志。不支持取消，也不做任何重试。
pub fn run_build(command: &[String], workdir: &Path, log: &dyn BuildLog) -> AppResult<BuildOutcome> {
    cleanup_build_artifacts(workdir)?;

    log.append(&format!("运行命令：{}", command.join(" ")));
    log.append("");

    let result = stream_process(command, workdir, log);

    // 收尾清理无条件执行，且先于最终通知
    if let Err(err) = cleanup_build_artifacts(workdir) {
        log::warn!("收尾清理失败: {}", err);
        log.append(&format!("清理临时产物失败：{}", err));
    }

    match result {
        Ok(status) if status.success() => {
            log.append("");
            log.append("构建成功，产物已写入输出目录。");
            Ok(BuildOutcome {
                success: true,
                exit_code: status.code(),
                error: None,
                finished_at: finished_timestamp(),
            })
        }
        Ok(status) => {
            log.append("");
            log.append("构建失败，请检查上方日志定位原因。");
            Ok(BuildOutcome {
                success: false,
                exit_code: status.code(),
                error: None,
                finished_at: finished_timestamp(),
            })
        }
        Err(err) => {
            log.append("");
            log.append(&err.to_string());
            Err(err)
        }
    }
}

/// 启动子进程并把 stdout/stderr 逐行汇入日志，返回退出状态
///
/// 两个输出流各占一个读线程，汇入同一 channel：单个流内的行序精确保持，
/// 两个流之间按到达顺序交错，等价于把 stderr 并入 stdout。
fn stream_process(
    command: &[String],
    workdir: &Path,
    log: &dyn BuildLog,
) -> AppResult<ExitStatus> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| AppError::SpawnError("命令为空".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::SpawnError(format!("{}: {}", program, e)))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::SpawnError("无法接管子进程标准输出".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AppError::SpawnError("无法接管子进程标准错误".to_string()))?;

    let (tx, rx) = mpsc::channel::<String>();
    let readers = [
        spawn_line_reader(stdout, tx.clone()),
        spawn_line_reader(stderr, tx),
    ];

    // 两个发送端都关闭后循环自然结束，此时全部输出行已转发完毕
    for line in rx {
        log.append(&line);
    }
    for reader in readers {
        let _ = reader.join();
    }

    child
        .wait()
        .map_err(|e| AppError::SpawnError(format!("等待子进程退出失败：{}", e)))
}

/// 在独立线程上逐行读取一个输出流，读到的行发往汇聚 channel
fn spawn_line_reader<R: Read + Send + 'static>(
    stream: R,
    tx: mpsc::Sender<String>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    })
}

/// 构建结束时刻的本地时间字符串；拿不到本地时区时退回 UTC
pub fn finished_timestamp() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    let format = time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]");
    match format {
        Ok(format) => now.format(&format).unwrap_or_else(|_| now.to_string()),
        Err(_) => now.to_string(),
    }
}

// ============================================================================
// 单元测试
// ============================================================================

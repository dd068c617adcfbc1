//! 日志初始化
//!
//! 控制台 + 日志文件双输出：步骤级的详细错误进文件，
//! 运行汇总同时出现在两处。进程启动时初始化一次，
//! 返回的 guard 由 main 持有，保证退出前刷新文件缓冲。

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化全局日志订阅器
///
/// # 参数
/// - `log_file_path`: 日志文件路径，父目录不存在时自动创建
pub fn init(log_file_path: &str) -> WorkerGuard {
    let path = Path::new(log_file_path);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        // 目录创建失败时 appender 会自行报错，这里不中断启动
        let _ = std::fs::create_dir_all(dir);
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rpa_challenge.log".to_string());

    let file_appender = tracing_appender::rolling::never(
        dir.unwrap_or_else(|| Path::new(".")),
        file_name,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}

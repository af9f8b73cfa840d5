use crate::utils::file_ops::app_subdir;
use once_cell::sync::Lazy;
use std::fs::{create_dir_all, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// 程序启动时间
static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

// 自定义启动时间计时器
struct UptimeTimer;

impl FormatTime for UptimeTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> Result<(), std::fmt::Error> {
        write!(w, "{}", elapsed_time())
    }
}

// 返回程序启动后的运行时间
fn elapsed_time() -> String {
    format_uptime(START_TIME.elapsed().as_millis())
}

fn format_uptime(millis: u128) -> String {
    let seconds = millis / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    let millis = millis % 1000;
    let seconds = seconds % 60;
    let minutes = minutes % 60;
    let hours = hours % 24;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

// 初始化日志系统
pub fn init_logging(debug_enabled: bool) {
    init_logging_in(&app_subdir("logs"), debug_enabled);
}

pub fn init_logging_in(logs_dir: &Path, debug_enabled: bool) {
    let latest_log_file = logs_dir.join("latest.log");

    // 确保日志目录存在
    if let Err(e) = create_dir_all(logs_dir) {
        eprintln!("Failed to create logs directory: {}", e);
        return;
    }

    // 清空 `latest.log`
    let latest = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&latest_log_file)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to clear latest.log: {}", e);
            return;
        }
    };

    let log_level = if debug_enabled { "debug" } else { "info" };

    // 控制台层
    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(UptimeTimer)
        .with_ansi(true)
        .with_target(true)
        .with_writer(std::io::stderr);

    // 文件层 - 按日期滚动
    let file_layer = tracing_subscriber::fmt::layer()
        .with_timer(UptimeTimer)
        .with_ansi(false)
        .with_target(true)
        .with_writer(tracing_appender::rolling::daily(logs_dir, "language-changer.log"));

    // 文件层 - latest.log
    let latest_log_layer = tracing_subscriber::fmt::layer()
        .with_timer(UptimeTimer)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(latest));

    // 已有全局订阅器时（例如测试中重复初始化）忽略
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(console_layer)
        .with(file_layer)
        .with(latest_log_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info, warn};

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00:00:00.000");
        assert_eq!(format_uptime(3_723_004), "01:02:03.004");
    }

    #[test]
    fn test_logging_init() {
        let dir = tempfile::tempdir().unwrap();
        init_logging_in(dir.path(), true);
        info!("info test log");
        debug!("debug test log");
        warn!("warn test log");
        error!("error test log");
        assert!(dir.path().join("latest.log").exists());
    }
}

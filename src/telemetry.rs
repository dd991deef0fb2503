//! 日志初始化

use crate::config::RuntimeMode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

/// 未设置 `RUST_LOG` 时使用的过滤规则
const DEFAULT_FILTER: &str = "info";

/// 初始化全局日志订阅器。
///
/// Lambda 中关闭颜色和时间戳（CloudWatch 会为每行加上时间），
/// 本地运行时使用本地时区的 RFC 3339 时间戳。
pub fn init(runtime: RuntimeMode) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match runtime {
        RuntimeMode::Lambda => builder
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .init(),
        RuntimeMode::Local => builder.with_timer(LocalTime::rfc_3339()).init(),
    }
}

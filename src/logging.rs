//! One-time `tracing-subscriber` initialization, env-filter driven with
//! an optional JSON formatter (§6, §10).

use crate::config::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

use std::io;
use std::io::IsTerminal;
use std::path::Path;
use streamlist_config::LoggingConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub fn init_logging(verbose_level: u8, quiet: bool, config: &LoggingConfig) -> Result<(), String> {
    // 0 = configured level, 1 = debug (noisy HTTP internals suppressed), 2+ = trace
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default_filter = match verbose_level {
            0 => config.level.as_str(),
            1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn,reqwest=info",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or(config.json);

    let registry = Registry::default().with(filter);

    if let Some(log_path) = &config.file {
        let (log_dir, log_prefix) = rotation_target(log_path)?;
        std::fs::create_dir_all(log_dir).map_err(|e| format!("Failed to create log directory {}: {}", log_dir.display(), e))?;

        // Files are named streamlist.2026-10-18 etc.
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);

            registry.with(json_layer).try_init().map_err(|e| e.to_string())?;
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);

            registry.with(fmt_layer).try_init().map_err(|e| e.to_string())?;
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(json_layer).try_init().map_err(|e| e.to_string())?;
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr);

        registry.with(fmt_layer).try_init().map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Split a log file path into its directory and rotation prefix
/// ("streamlist" for "logs/streamlist.log")
fn rotation_target(log_path: &Path) -> Result<(&Path, &str), String> {
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("Invalid log filename: {}", log_path.display()))?;

    let log_prefix = log_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(log_filename);

    Ok((log_dir, log_prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_target() {
        let (dir, prefix) = rotation_target(Path::new("/var/log/streamlist.log")).unwrap();
        assert_eq!(dir, Path::new("/var/log"));
        assert_eq!(prefix, "streamlist");

        let (dir, prefix) = rotation_target(Path::new("streamlist")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(prefix, "streamlist");
    }
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 優先，其次是設定檔的 `log_level`，最後才依 verbose 決定
fn build_filter(verbose: bool, log_level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match log_level {
        Some(level) => EnvFilter::new(format!("pesel_etl={}", level)),
        None if verbose => EnvFilter::new("pesel_etl=debug,info"),
        None => EnvFilter::new("pesel_etl=info"),
    }
}

fn init_cli_logger(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON 格式，方便交給日誌收集系統
fn init_json_logger(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}

/// 依設定選擇日誌格式；`log_level` 僅在未設定 RUST_LOG 時生效
pub fn init_logger(verbose: bool, json: bool, log_level: Option<&str>) {
    let filter = build_filter(verbose, log_level);
    if json {
        init_json_logger(filter);
    } else {
        init_cli_logger(filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_prefers_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(
            build_filter(false, Some("warn")).to_string(),
            "pesel_etl=warn"
        );
        assert_eq!(build_filter(false, None).to_string(), "pesel_etl=info");
        assert!(build_filter(true, None)
            .to_string()
            .contains("pesel_etl=debug"));
    }
}

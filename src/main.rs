use clap::Parser;
use pesel_etl::utils::{logger, validation::Validate};
use pesel_etl::{BatchReport, BirthdayPipeline, CliConfig, EtlEngine, LocalStorage};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json, None);

    tracing::info!("🚀 Starting pesel-etl");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }

    // 輸入檔一律以絕對路徑處理與回報
    config.files = config.files.iter().map(|f| absolute_path(f)).collect();

    let inputs = config.files.clone();
    let verbose = config.verbose;
    let print_json = config.json;
    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = BirthdayPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run(&inputs).await {
        Ok(report) => {
            print_report(&report, verbose);
            if print_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn absolute_path(path: &str) -> String {
    if Path::new(path).is_absolute() {
        return path.to_string();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path).to_string_lossy().into_owned(),
        Err(_) => path.to_string(),
    }
}

fn print_report(report: &BatchReport, verbose: bool) {
    for failed in &report.failed_files {
        println!("{}: {}", failed.path, failed.error);
    }

    if verbose {
        for message in report.invalid_messages() {
            println!("{}", message);
        }
    }

    println!("{}", report.summary());
}

use clap::Parser;
use pesel_etl::core::ConfigProvider;
use pesel_etl::utils::{logger, validation::Validate};
use pesel_etl::{BirthdayPipeline, EtlEngine, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-batch")]
#[command(about = "PESEL batch processing driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pesel-batch.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    logger::init_logger(verbose, config.json_logs(), config.log_level());

    tracing::info!("🚀 Starting TOML-based PESEL batch");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        for input in config.input_files() {
            println!("  would process: {}", input);
        }
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let inputs = config.input_files().to_vec();
    let report_path = config.output.report_path.clone();
    let storage = LocalStorage::new(config.base_path().to_string());

    let pipeline = BirthdayPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let report = match engine.run(&inputs).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("❌ Batch failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code().max(1));
        }
    };

    for failed in &report.failed_files {
        println!("{}: {}", failed.path, failed.error);
    }
    if verbose {
        for message in report.invalid_messages() {
            println!("{}", message);
        }
    }
    println!("{}", report.summary());

    if let Some(path) = report_path {
        std::fs::write(&path, serde_json::to_vec_pretty(&report)?)?;
        tracing::info!("📁 Report saved to: {}", path);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Batch: {}", config.batch_name());
    println!("  Inputs: {}", config.input_files().join(", "));
    println!("  Base path: {}", config.base_path());
    println!("  Date format: {}", config.date_format());
    println!("  Output format: {}", config.output_format().as_str());
    println!("  Suffix: {}", config.output_suffix());
}

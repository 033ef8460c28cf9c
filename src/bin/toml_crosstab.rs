use clap::Parser;
use contract_crosstab::core::ConfigProvider;
use contract_crosstab::utils::{logger, validation::Validate};
use contract_crosstab::{CrosstabPipeline, EtlEngine, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-crosstab")]
#[command(about = "Contract × category crosstab driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "crosstab.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the output file from config
    #[arg(long)]
    output: Option<String>,

    /// Show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(args.verbose, config.log_level(), config.log_format());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(output) = args.output {
        tracing::info!("🔧 Output file overridden to: {}", output);
        config.load.output_file = Some(output);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.base_path());
    let pipeline = CrosstabPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    if let Err(e) = engine.run().await {
        tracing::error!(
            "❌ Crosstab failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("   Jobs: {}", config.jobs_file());
    tracing::info!("   Professions: {}", config.professions_file());
    tracing::info!(
        "   Output: {}",
        config.output_file().unwrap_or("stdout")
    );
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let base = std::path::Path::new(config.base_path());

    for (label, file) in [
        ("jobs", config.jobs_file()),
        ("professions", config.professions_file()),
    ] {
        let path = base.join(file);
        match tokio::fs::metadata(&path).await {
            Ok(meta) => tracing::info!("✅ {} file {} ({} bytes)", label, path.display(), meta.len()),
            Err(e) => tracing::warn!("⚠️ {} file {} is not readable: {}", label, path.display(), e),
        }
    }

    Ok(())
}

use clap::Parser;
use sign_estimator::core::{ConfigProvider, Pipeline};
use sign_estimator::utils::{logger, validation::Validate};
use sign_estimator::{render_summary, EstimatePipeline, EstimationEngine, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-estimate")]
#[command(about = "Sign cost estimation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "estimate.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the analytics setting from config
    #[arg(long)]
    analytics: Option<bool>,

    /// Estimate and print the summary without writing report files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置（日誌格式由配置決定，因此先載入）
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based sign estimator");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(analytics) = args.analytics {
        config.output.include_analytics = Some(analytics);
        tracing::info!("🔧 Analytics overridden to: {}", analytics);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let pipeline = EstimatePipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no report files will be written");
        return perform_dry_run(&pipeline).await;
    }

    let engine = EstimationEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            println!("{}", render_summary(&outcome.report));
            println!("📁 Report saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Estimation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let spec = &config.specification;

    println!("📋 Configuration Summary:");
    println!("  Estimator: {}", config.estimator.name);
    if let Some(description) = &config.estimator.description {
        println!("  Description: {}", description);
    }
    println!(
        "  Source: {} ({})",
        config.project_source().describe(),
        config.source.r#type
    );
    println!(
        "  Sign: {} {}' x {}' {} | quality {} | complexity {} | lighting {}",
        spec.sign_type.label(),
        spec.height,
        spec.width,
        spec.material_type,
        spec.quality,
        spec.complexity,
        if spec.has_lighting { "yes" } else { "no" }
    );
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));
    println!("  Analytics: {}", config.include_analytics());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(
    pipeline: &EstimatePipeline<LocalStorage, TomlConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    let projects = pipeline.extract().await?;
    println!("📥 {} historical projects available", projects.len());

    let report = pipeline.transform(projects).await?;
    println!("{}", render_summary(&report));

    println!();
    println!("✅ Dry run complete. No files were written.");
    Ok(())
}

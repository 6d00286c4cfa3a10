use clap::Parser;
use cinema_watch::core::Notifier;
use cinema_watch::utils::error::ErrorSeverity;
use cinema_watch::utils::{logger, shutdown::shutdown_signal, validation::Validate};
use cinema_watch::{CinemaError, CliArgs, LogNotifier, Poller, TomlConfig};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if args.json_logs || config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting cinema-watch");
    tracing::info!("📁 Configuration loaded from: {}", args.config);
    args.apply_overrides(&mut config);

    if let Err(e) = run(&config, &args).await {
        tracing::error!("❌ cinema-watch stopped: {} (Severity: {:?})", e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: &TomlConfig, args: &CliArgs) -> Result<(), CinemaError> {
    config.validate()?;

    tracing::info!("✅ Configuration validated successfully");
    tracing::info!("  Source: {}", config.source.endpoint);
    tracing::info!("  Fixed delay: {}ms", config.schedule.fixed_delay_ms);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - notifications are only logged");
        watch(config, args, LogNotifier).await
    } else {
        let notifier = config.build_telegram()?;
        watch(config, args, notifier).await
    }
}

async fn watch<N: Notifier>(config: &TomlConfig, args: &CliArgs, notifier: N) -> Result<(), CinemaError> {
    let client = config.build_client()?;
    let mut poller = Poller::new(client, notifier, config.poller_settings());

    poller.initialize().await?;

    if args.once {
        let report = poller.cycle().await;
        println!(
            "✅ Call #{}: movie tickets {}, promotional {}, changed: {}",
            report.call_count, report.total_count, report.promo_count, report.changed
        );
        return Ok(());
    }

    poller.run(shutdown_signal()).await;
    tracing::info!("👋 cinema-watch stopped after {} calls", poller.call_count());
    Ok(())
}

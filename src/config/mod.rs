pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cinema-watch")]
#[command(about = "Watches the Lotte Cinema gift shop for new 1+1 and early-bird tickets")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cinema-watch.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Initialize, run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Override source.endpoint from config
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override schedule.fixed_delay_ms from config
    #[arg(long)]
    pub fixed_delay_ms: Option<u64>,
}

#[cfg(feature = "cli")]
impl CliArgs {
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(endpoint) = &self.endpoint {
            tracing::info!("🔧 Endpoint overridden to: {}", endpoint);
            config.source.endpoint = endpoint.clone();
        }
        if let Some(fixed_delay_ms) = self.fixed_delay_ms {
            tracing::info!("🔧 Fixed delay overridden to: {}ms", fixed_delay_ms);
            config.schedule.fixed_delay_ms = fixed_delay_ms;
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["cinema-watch"]).unwrap();
        assert_eq!(args.config, "cinema-watch.toml");
        assert!(!args.dry_run);
        assert!(!args.once);
    }

    #[test]
    fn test_overrides_are_applied() {
        let args = CliArgs::try_parse_from([
            "cinema-watch",
            "--endpoint",
            "http://127.0.0.1:9000/mall",
            "--fixed-delay-ms",
            "500",
            "--dry-run",
        ])
        .unwrap();

        let mut config = TomlConfig::from_toml_str(
            r#"
[source]
endpoint = "https://api.example.com/mall"

[schedule]
fixed_delay_ms = 60000
"#,
        )
        .unwrap();

        args.apply_overrides(&mut config);
        assert_eq!(config.source.endpoint, "http://127.0.0.1:9000/mall");
        assert_eq!(config.schedule.fixed_delay_ms, 500);
        assert!(args.dry_run);
    }
}

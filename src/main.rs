use clap::Parser;
use json_sift::core::export::export_json;
use json_sift::utils::{logger, validation::Validate};
use json_sift::{CliConfig, LocalStorage, SiftEngine, SiftError, TomlConfig};

fn fail(e: &SiftError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // the config file is read and checked before logging starts so its log level applies
    let file = match config.config.as_deref().map(TomlConfig::from_file) {
        Some(Ok(file)) => {
            if let Err(e) = file.validate() {
                fail(&e);
            }
            Some(file)
        }
        Some(Err(e)) => fail(&e),
        None => None,
    };
    let level = file.as_ref().and_then(|f| f.log_level()).map(str::to_string);

    logger::init_cli_logger(config.verbose, config.log_json, level.as_deref());

    tracing::info!("Starting json-sift");

    if let Some(file) = &file {
        tracing::info!(
            "📁 Loaded configuration from: {}",
            config.config.as_deref().unwrap_or_default()
        );
        config.merge_file(file);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let print = config.print;
    let engine = SiftEngine::new_with_monitoring(LocalStorage::default(), config, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Done, {} records", summary.records.len());
            if let Some(path) = &summary.output_path {
                tracing::info!("📁 Output saved to: {}", path);
                println!("📁 Output saved to: {}", path);
            }
            if print {
                let bytes = export_json(&summary.records)?;
                print!("{}", String::from_utf8_lossy(&bytes));
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

use anyhow::{bail, Result};
use clap::Parser;
use log::{debug, info};
use db_studio_cli::{execute, load_script, logger_builder, run_script, Args, Command};
use db_studio_core::TableStore;

fn main() -> Result<()> {
    // Pick up STUDIO_* variables from a local .env, if any
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration
    let config = args.store_config()?;

    // Initialize logging
    logger_builder(env_logger::Env::default(), &config, args.log_level.is_some()).init();
    debug!("Resolved configuration: {:?}", config);

    // Create store
    let store = TableStore::from_config(&config)?;
    info!("Store ready with {} tables", store.list_tables().len());

    match &args.command {
        Command::Run { script } => {
            let operations = load_script(script)?;
            let report = run_script(&store, &operations);

            println!("{}", serde_json::to_string_pretty(&report.outcomes)?);
            if report.failures > 0 {
                bail!("{} of {} operations failed", report.failures, operations.len());
            }
        }
        command => {
            if let Some(operation) = command.to_operation()? {
                let outcome = execute(&store, &operation)?;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
    }

    Ok(())
}

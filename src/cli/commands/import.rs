//! Import command: run one flow against the roster

use tracing::info;

use super::shared::{print_summary, setup_logging};
use crate::Result;
use crate::app::adapters::json_file::JsonFileStore;
use crate::app::adapters::memory::MemoryStore;
use crate::app::adapters::record_store::RecordStore;
use crate::app::services::reconciler::{ImportRunner, ImportSummary};
use crate::cli::args::ImportArgs;
use crate::config::Config;

/// Run the import command
pub async fn run_import(args: &ImportArgs) -> Result<ImportSummary> {
    setup_logging(args.get_log_level(), args.quiet)?;
    args.validate()?;

    let config = load_configuration(args).await?;
    let collection = config.collection_for(args.flow);
    let store = JsonFileStore::new(&config.store_dir, collection);
    info!(
        "Importing {} as {} into '{}' ({})",
        args.file.display(),
        args.flow,
        collection,
        store.path().display()
    );

    let runner = ImportRunner::from_config(args.flow, &config).with_progress(args.show_progress());

    let summary = if args.dry_run {
        // Work on a copy so nothing reaches the file
        let records = store.fetch_all(None).await?;
        let scratch = MemoryStore::with_records(collection, records);
        runner.run_file(&args.file, &scratch).await?
    } else {
        runner.run_file(&args.file, &store).await?
    };

    print_summary(&summary, args.dry_run, args.quiet);
    Ok(summary)
}

/// Resolve defaults, config file and CLI overrides, then validate
pub async fn load_configuration(args: &ImportArgs) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref()).await?;

    if let Some(store_dir) = &args.store_dir {
        config = config.with_store_dir(store_dir);
    }

    config.validate()?;
    Ok(config)
}

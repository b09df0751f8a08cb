mod app;
mod error;
mod input;
mod paths;
mod settings;
mod view;

use std::fs::File;
use std::sync::Arc;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use usertable_core::{BlobBackend, RecordStore, TableSession};
use usertable_term::Terminal;

use crate::app::App;
use crate::error::AppError;
use crate::paths::AppPaths;
use crate::settings::{SettingsProvider, SqliteBackend};

fn init_logging(paths: &AppPaths) {
    paths.rotate_logs(&chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());

    let path = paths.log_file();
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

async fn run(paths: &AppPaths) -> Result<(), AppError> {
    let backend: Arc<dyn BlobBackend> = Arc::new(SqliteBackend::open(paths.store_db()).await?);
    let settings = SettingsProvider::from_shared(Arc::clone(&backend));
    let config = settings.table_config().await?;
    info!("Table config: {:?}", config);

    let store = RecordStore::from_shared(backend);
    let records = store.load_or_generate(config.row_count).await?;
    let session = TableSession::new(records, &config);

    let terminal = Terminal::new()?;
    App::new(session, store, settings, config).run(terminal).await
}

#[tokio::main]
async fn main() {
    let paths = AppPaths::resolve();
    if let Err(e) = paths.create_dirs() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(&paths);
    info!("Starting usertable");

    if let Err(e) = run(&paths).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod api;
mod config;
mod database;
mod jobs;
mod middleware;
mod models;
mod services;
mod utils;

use dotenv::dotenv;

use api::portal::Portal;
use config::Config;
use database::{loader::loader_for, session_store::FileSessionStore, DataStore};
use jobs::TokioClock;

#[tokio::main]
async fn main() -> Result<(), utils::AppError> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;

    log::info!("🚀 Starting Union Portal...");
    log::info!("📂 Data source: {}", config.data_source);
    log::info!("💾 Session file: {}", config.session_file);

    // Every collection is loaded before the session check.
    let loader = loader_for(&config.data_source, config.fetch_timeout);
    let data = DataStore::load(loader.as_ref(), &config.paths).await;

    let store = FileSessionStore::new(&config.session_file);
    let mut portal = Portal::start(data, store, TokioClock::new(), config.timing).await;

    api::console::run(&mut portal).await
}

use tracing::warn;

mod access;
mod config;
mod engine;
mod error;
mod logging;
mod models;
mod rest;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    logging::init();

    let db_conn = models::establish_db_connection()
        .await
        .expect("Failed connecting to the database");
    if let Err(e) = models::check_schema(&db_conn).await {
        warn!("Schema check failed, did the migrations run? {}", e);
    }

    let settings = engine::EngineSettings::from_config();
    let observer = engine::GrowObserver::for_pg(db_conn, settings);

    rest::dispatch_server_daemon(observer).await;
    Ok(())
}

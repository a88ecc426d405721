use actix_web::middleware::{from_fn, Logger};
use actix_web::{web::Data, App, HttpServer};
use anyhow::{Context, Result};
use log::info;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod lifecycle;
pub mod models;
pub mod renderer;
pub mod routes;
pub mod schema;
pub mod session;

pub async fn run() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("journal=info,actix_web=info"),
    )
    .init();

    let config = config::Config::from_env()?;
    let pool = db::create_connection_pool(&config.database_url, config.pool_size)?;
    {
        let mut conn = pool.get().context("Failed to connect to the database")?;
        db::init_schema(&mut conn).context("Failed to create the entries table")?;
    }
    let state = Data::new(auth::AppState::from_config(&config));
    let pool = Data::new(pool);

    info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(state.clone())
            .wrap(from_fn(lifecycle::connection_lifecycle))
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{Compress, ErrorHandlers, Logger};
use actix_web::{http::header, web, App, HttpServer};
use dotenv::dotenv;

use trip_planner_api::api;
use trip_planner_api::config::Config;
use trip_planner_api::database::{MongoStore, TravelStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Trip Planner API...");

    // Only an unparsable connection string stops the process here
    let store = MongoStore::connect(&config.mongodb_uri, &config.database_name)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    // A store that cannot be reached is logged and the server starts anyway;
    // requests will fail with 500 until it comes back.
    match store.ping().await {
        Ok(()) => {
            log::info!("✅ MongoDB connected");
            store.ensure_indexes().await;
        }
        Err(e) => log::error!("❌ MongoDB connection error: {}", e),
    }

    let shared: Arc<dyn TravelStore> = Arc::new(store.clone());
    let store_data = web::Data::from(shared);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 API docs available at: http://{}:{}/api-docs/", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .app_data(store_data.clone())
            .wrap(ErrorHandlers::new().default_handler_server(api::render_unhandled))
            .wrap(Compress::default())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(api::configure)
            .default_service(web::to(api::route_not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("🛑 Server stopped, closing MongoDB connections");
    store.shutdown().await;

    Ok(())
}

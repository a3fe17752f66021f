//! Resets the database to the demo fixtures.

use dotenv::dotenv;

use trip_planner_api::config::Config;
use trip_planner_api::database::{MongoStore, TravelStore};
use trip_planner_api::seeds::fixtures_seed::seed_fixtures;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store = match MongoStore::connect(&config.mongodb_uri, &config.database_name).await {
        Ok(store) => store,
        Err(e) => {
            log::error!("❌ Invalid MongoDB connection string: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = store.ping().await {
        log::error!("❌ MongoDB connection error: {}", e);
        std::process::exit(1);
    }
    log::info!("✅ MongoDB connected");

    match seed_fixtures(&store).await {
        Ok(summary) => log::info!(
            "✅ Database seeding completed: {} users, {} destinations, {} trips",
            summary.users,
            summary.destinations,
            summary.trips
        ),
        Err(e) => {
            log::error!("❌ Seeding error: {}", e);
            store.shutdown().await;
            std::process::exit(1);
        }
    }

    store.shutdown().await;
}

use std::env;
use std::sync::Arc;

use aerorun::api::DynRouteStore;
use aerorun::db::PgPool;
use aerorun::simulation;
use aerorun::store::{MemoryRouteStore, PgRouteStore};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let store: DynRouteStore = match env::var("DATABASE_URL") {
        Ok(uri) => {
            let PgPool(pool) = PgPool::new(&uri, 5).await.unwrap();
            Arc::new(PgRouteStore::new(pool))
        }
        Err(_) => Arc::new(MemoryRouteStore::new()),
    };

    simulation::run(store).await;
}

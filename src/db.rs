use sqlx::{postgres::PgPoolOptions, Executor, Pool, Postgres};

pub struct PgPool(pub Pool<Postgres>);

impl PgPool {
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        // route summary store (KV store)
        pool.execute(
            "CREATE TABLE IF NOT EXISTS routes (id UUID PRIMARY KEY, saved_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL)",
        )
        .await?;

        Ok(Self(pool))
    }
}

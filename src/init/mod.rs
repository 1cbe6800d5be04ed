mod db;
pub use db::init_mysql_pool;

mod http;
pub use http::add_layers;

mod seed;
pub use seed::seed_demo;

use crate::{
    prelude::*,
    store::{MemoryStore, MySqlStore, Store},
};

use std::sync::Arc;

pub async fn init_store(cfg: &Config) -> anyhow::Result<Arc<dyn Store>> {
    let Some(connection_url) = cfg.db_connection_url.as_deref() else {
        if cfg.db_seed_demo {
            tracing::warn!("SEED_DEMO is set but no DATABASE_URL is configured, skipping seed");
        }
        tracing::warn!("no DATABASE_URL configured, attempts are kept in memory only");

        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = init_mysql_pool(cfg, connection_url).await?;

    if cfg.db_seed_demo {
        seed_demo(&pool).await?;
    }

    return Ok(Arc::new(MySqlStore::new(pool)));
}

use crate::prelude::*;

use sqlx::{mysql::MySqlPoolOptions, MySqlPool};

pub async fn init_mysql_pool(cfg: &Config, connection_url: &str) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .connect(connection_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    tracing::info!(
        max_connections = cfg.db_max_connections,
        "connected to mysql and applied migrations"
    );

    return Ok(pool);
}

use sqlx::MySqlPool;

const DEMO_EMAIL: &str = "demo@coco.local";
const DEMO_CHILD_ID: i64 = 1;
const DEMO_CHILD_NAME: &str = "Eduardo";

const GAMES: [(&str, &str); 1] = [("color_balloons", "Globos de colores")];

/// Demo parent, child and game dictionary. Safe to run on every start.
pub async fn seed_demo(db: &MySqlPool) -> anyhow::Result<()> {
    // no login yet, the password hash is a placeholder
    sqlx::query(
        "INSERT INTO users (email, password_hash, role) VALUES (?, 'dev', 'parent') ON DUPLICATE KEY UPDATE email = email",
    )
    .bind(DEMO_EMAIL)
    .execute(db)
    .await?;

    let (user_id,): (i64,) = sqlx::query_as("SELECT user_id FROM users WHERE email = ? LIMIT 1")
        .bind(DEMO_EMAIL)
        .fetch_one(db)
        .await?;

    sqlx::query(
        "INSERT INTO children (child_id, user_id, name) VALUES (?, ?, ?) ON DUPLICATE KEY UPDATE child_id = child_id",
    )
    .bind(DEMO_CHILD_ID)
    .bind(user_id)
    .bind(DEMO_CHILD_NAME)
    .execute(db)
    .await?;

    for (code, name) in GAMES {
        sqlx::query("INSERT INTO games (code, name) VALUES (?, ?) ON DUPLICATE KEY UPDATE code = code")
            .bind(code)
            .bind(name)
            .execute(db)
            .await?;
    }

    tracing::info!(user_id, child_id = DEMO_CHILD_ID, "seeded demo data");

    return Ok(());
}

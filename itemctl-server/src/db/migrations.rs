//! Schema setup for the items table

use sqlx::PgPool;

/// Create the items table if it does not exist.
///
/// Ids come from `gen_random_uuid()`, so the database assigns them.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running item migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT,
            description TEXT,
            quantity DOUBLE PRECISION CHECK (quantity IS NULL OR quantity >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_created_at ON items(created_at)")
        .execute(pool)
        .await?;

    tracing::info!("Item migrations complete");
    Ok(())
}

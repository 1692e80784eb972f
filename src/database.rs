use bson::doc;
use mongodb::{Client, Database};

use crate::config::Config;

/// Connects once at startup and pings the deployment. A failed ping here is
/// the only fatal store condition in the process lifetime.
pub async fn connect(config: &Config) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&config.mongodb_uri).await?;
    let db = client.database(&config.mongodb_database);

    db.run_command(doc! { "ping": 1 }).await?;

    tracing::info!(database = %config.mongodb_database, "Connected to MongoDB");

    Ok(db)
}

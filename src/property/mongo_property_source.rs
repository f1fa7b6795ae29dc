use super::PropertySource;
use async_trait::async_trait;
use eyre::Context;
use eyre::Result;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Database;
use tracing::debug;

pub struct MongoPropertySource {
    db: Database,
}

impl MongoPropertySource {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertySource for MongoPropertySource {
    async fn fetch_properties_from_collection(
        &self,
        collection_name: &str,
    ) -> Result<Vec<Document>> {
        let cursor = self
            .db
            .collection::<Document>(collection_name)
            .find(None, None)
            .await
            .wrap_err_with(|| format!("Error querying collection {}", collection_name))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .wrap_err_with(|| format!("Error reading collection {}", collection_name))?;

        debug!("Fetched {} documents from {}", documents.len(), collection_name);

        Ok(documents)
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .wrap_err("MongoDB ping failed")?;

        Ok(())
    }
}

use bson::{Bson, Document, doc, oid::ObjectId};
use futures_util::stream::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::instrument;

use super::ArticleStore;

const COLLECTION: &str = "allNewsCollection";

/// Projection returned by the list endpoint. Full documents are only served
/// by the single-article lookup.
fn list_projection() -> Document {
    doc! {
        "headline": 1,
        "image": 1,
        "date_published": 1,
        "author": 1,
    }
}

#[derive(Clone)]
pub struct ArticleRepository {
    collection: Collection<Document>,
}

impl ArticleRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl ArticleStore for ArticleRepository {
    #[instrument(name = "db.article.find_by_id", skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, mongodb::error::Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    /// Skip/limit page over the collection in store-default order.
    #[instrument(name = "db.article.list", skip(self))]
    async fn list(&self, skip: u64, limit: i64) -> Result<Vec<Document>, mongodb::error::Error> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .projection(list_projection())
            .skip(skip)
            .limit(limit)
            .await?;

        let mut articles = Vec::new();
        while let Some(article) = cursor.try_next().await? {
            articles.push(article);
        }

        Ok(articles)
    }

    #[instrument(name = "db.article.count", skip(self))]
    async fn count(&self) -> Result<u64, mongodb::error::Error> {
        self.collection.estimated_document_count().await
    }

    /// Inserts any well-formed document; the store assigns the id. Returns
    /// the generated id as Bson since a caller-supplied `_id` may not be an
    /// ObjectId.
    #[instrument(name = "db.article.insert", skip(self, doc))]
    async fn insert(&self, doc: Document) -> Result<Bson, mongodb::error::Error> {
        let result = self.collection.insert_one(doc).await?;

        Ok(result.inserted_id)
    }
}

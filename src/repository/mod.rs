use bson::{Bson, Document, oid::ObjectId};

use crate::models::Favorite;

mod article;
mod favorite;

pub use article::ArticleRepository;
pub use favorite::FavoriteRepository;

/// Affected-count pair reported by owner-scoped favorite updates.
#[derive(Debug, Clone, Copy)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

/// Article-collection operations. The service layer is generic over the
/// store traits so tests can substitute an in-memory adapter for the live
/// collections.
#[allow(async_fn_in_trait)]
pub trait ArticleStore: Clone + Send + Sync + 'static {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, mongodb::error::Error>;
    async fn list(&self, skip: u64, limit: i64) -> Result<Vec<Document>, mongodb::error::Error>;
    async fn count(&self) -> Result<u64, mongodb::error::Error>;
    async fn insert(&self, doc: Document) -> Result<Bson, mongodb::error::Error>;
}

/// Favorite-collection operations. Mutations are owner-scoped: a missing or
/// foreign id reports zero affected rather than erroring.
#[allow(async_fn_in_trait)]
pub trait FavoriteStore: Clone + Send + Sync + 'static {
    async fn insert(&self, favorite: &Favorite) -> Result<Bson, mongodb::error::Error>;
    async fn find_by_user(&self, email: &str) -> Result<Vec<Favorite>, mongodb::error::Error>;
    async fn update_status(
        &self,
        id: ObjectId,
        owner: &str,
        status: &str,
    ) -> Result<UpdateCounts, mongodb::error::Error>;
    async fn delete(&self, id: ObjectId, owner: &str) -> Result<u64, mongodb::error::Error>;
}

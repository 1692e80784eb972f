use bson::{Bson, doc, oid::ObjectId};
use futures_util::stream::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::instrument;

use super::{FavoriteStore, UpdateCounts};
use crate::models::Favorite;

const COLLECTION: &str = "favoriteNewsCollection";

#[derive(Clone)]
pub struct FavoriteRepository {
    collection: Collection<Favorite>,
}

impl FavoriteRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

impl FavoriteStore for FavoriteRepository {
    /// Returns the driver's inserted id untouched; the service layer decides
    /// what shape it accepts.
    #[instrument(name = "db.favorite.insert", skip(self, favorite))]
    async fn insert(&self, favorite: &Favorite) -> Result<Bson, mongodb::error::Error> {
        let result = self.collection.insert_one(favorite).await?;

        Ok(result.inserted_id)
    }

    #[instrument(name = "db.favorite.find_by_user", skip(self))]
    async fn find_by_user(&self, email: &str) -> Result<Vec<Favorite>, mongodb::error::Error> {
        let mut cursor = self.collection.find(doc! { "user": email }).await?;

        let mut favorites = Vec::new();
        while let Some(favorite) = cursor.try_next().await? {
            favorites.push(favorite);
        }

        Ok(favorites)
    }

    /// Owner-scoped status update. Zero counts when the id is missing or
    /// belongs to another user.
    #[instrument(name = "db.favorite.update_status", skip(self))]
    async fn update_status(
        &self,
        id: ObjectId,
        owner: &str,
        status: &str,
    ) -> Result<UpdateCounts, mongodb::error::Error> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "user": owner },
                doc! { "$set": { "status": status } },
            )
            .await?;

        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    /// Owner-scoped delete; idempotent, zero deleted on miss.
    #[instrument(name = "db.favorite.delete", skip(self))]
    async fn delete(&self, id: ObjectId, owner: &str) -> Result<u64, mongodb::error::Error> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "user": owner })
            .await?;

        Ok(result.deleted_count)
    }
}

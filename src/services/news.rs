use bson::{Bson, Document, oid::ObjectId};
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        DeleteResponse, Favorite, FavoriteDto, InsertResponse, ListNewsQuery, NewsDto,
        UpdateFavoriteInput, UpdateResponse,
    },
    repository::{ArticleRepository, ArticleStore, FavoriteRepository, FavoriteStore},
    telemetry::{FAVORITES_ADDED, FAVORITES_REMOVED, FAVORITES_UPDATED, NEWS_CREATED},
};

const MAX_PAGE_SIZE: u64 = 100;

/// Computes the skip/limit pair for a page request. Size is clamped so a
/// zero size still yields one document and an oversized request cannot
/// drain the collection; unsigned inputs make negative skip unrepresentable.
fn page_window(page: u64, size: u64) -> (u64, i64) {
    let size = size.clamp(1, MAX_PAGE_SIZE);
    (page.saturating_mul(size), size as i64)
}

/// Generic over the store traits so tests can swap the live collections for
/// an in-memory adapter; production wiring uses the Mongo repositories.
#[derive(Clone)]
pub struct NewsService<A = ArticleRepository, F = FavoriteRepository> {
    articles: A,
    favorites: F,
}

impl<A, F> NewsService<A, F>
where
    A: ArticleStore,
    F: FavoriteStore,
{
    pub fn new(articles: A, favorites: F) -> Self {
        Self {
            articles,
            favorites,
        }
    }

    #[instrument(name = "news.list", skip(self))]
    pub async fn list(&self, query: ListNewsQuery) -> AppResult<Vec<NewsDto>> {
        let (skip, limit) = page_window(query.page, query.size);
        let docs = self.articles.list(skip, limit).await?;

        Ok(docs.into_iter().map(NewsDto::from_document).collect())
    }

    #[instrument(name = "news.count", skip(self))]
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.articles.count().await?)
    }

    /// Missing document is `Ok(None)`; a malformed id never reaches the
    /// store and is reported as a validation error instead.
    #[instrument(name = "news.get", skip(self))]
    pub async fn get(&self, id: &str) -> AppResult<Option<NewsDto>> {
        let oid = parse_object_id(id)?;

        Ok(self
            .articles
            .find_by_id(oid)
            .await?
            .map(NewsDto::from_document))
    }

    #[instrument(name = "news.create", skip(self, doc))]
    pub async fn create(&self, doc: Document) -> AppResult<InsertResponse> {
        let inserted_id = self.articles.insert(doc).await?;

        // A client-supplied `_id` may legitimately be any Bson shape.
        let id = match inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };

        NEWS_CREATED.add(1, &[]);

        tracing::info!(article_id = %id, "Article inserted");

        Ok(InsertResponse {
            acknowledged: true,
            inserted_id: id,
        })
    }

    /// The favorite's `user` field must match the verified claim; a payload
    /// claiming someone else's email is rejected, never rewritten.
    #[instrument(name = "news.add_favorite", skip(self, favorite))]
    pub async fn add_favorite(
        &self,
        claims_email: &str,
        mut favorite: Favorite,
    ) -> AppResult<InsertResponse> {
        if favorite.user != claims_email {
            tracing::warn!(payload_user = %favorite.user, "Favorite owner mismatch");
            return Err(AppError::Unauthorized);
        }

        // The store assigns the id.
        favorite.id = None;

        let inserted_id = self.favorites.insert(&favorite).await?;

        // Favorites are inserted without an `_id`, so the store must have
        // generated an ObjectId; anything else is a broken invariant, and
        // fabricating an id would hand the client a dangling reference.
        let id = match inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => {
                return Err(AppError::Internal(format!(
                    "unexpected inserted id shape: {other}"
                )));
            }
        };

        FAVORITES_ADDED.add(1, &[]);

        tracing::info!(favorite_id = %id, "Favorite inserted");

        Ok(InsertResponse {
            acknowledged: true,
            inserted_id: id,
        })
    }

    /// Mismatched email is 401, never a silently filtered result.
    #[instrument(name = "news.list_favorites", skip(self))]
    pub async fn list_favorites(
        &self,
        claims_email: &str,
        requested_email: &str,
    ) -> AppResult<Vec<FavoriteDto>> {
        if requested_email != claims_email {
            tracing::warn!(requested = %requested_email, "Favorites email mismatch");
            return Err(AppError::Unauthorized);
        }

        let favorites = self.favorites.find_by_user(requested_email).await?;

        Ok(favorites
            .into_iter()
            .map(FavoriteDto::from_favorite)
            .collect())
    }

    #[instrument(name = "news.update_favorite_status", skip(self, input))]
    pub async fn update_favorite_status(
        &self,
        claims_email: &str,
        id: &str,
        input: UpdateFavoriteInput,
    ) -> AppResult<UpdateResponse> {
        let oid = parse_object_id(id)?;

        let counts = self
            .favorites
            .update_status(oid, claims_email, &input.status)
            .await?;

        if counts.modified > 0 {
            FAVORITES_UPDATED.add(1, &[]);
        }

        Ok(UpdateResponse {
            acknowledged: true,
            matched_count: counts.matched,
            modified_count: counts.modified,
        })
    }

    #[instrument(name = "news.delete_favorite", skip(self))]
    pub async fn delete_favorite(&self, claims_email: &str, id: &str) -> AppResult<DeleteResponse> {
        let oid = parse_object_id(id)?;

        let deleted_count = self.favorites.delete(oid, claims_email).await?;

        if deleted_count > 0 {
            FAVORITES_REMOVED.add(1, &[]);
        }

        Ok(DeleteResponse {
            acknowledged: true,
            deleted_count,
        })
    }
}

fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::Validation(format!("malformed id: {id}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use bson::doc;

    use super::*;
    use crate::repository::UpdateCounts;

    #[derive(Clone, Default)]
    struct InMemoryArticles {
        docs: Arc<Mutex<Vec<Document>>>,
    }

    // Mirrors the projection the live store applies on list.
    fn project(doc: &Document) -> Document {
        let mut out = Document::new();
        for key in ["_id", "headline", "image", "date_published", "author"] {
            if let Some(value) = doc.get(key) {
                out.insert(key, value.clone());
            }
        }
        out
    }

    impl ArticleStore for InMemoryArticles {
        async fn find_by_id(
            &self,
            id: ObjectId,
        ) -> Result<Option<Document>, mongodb::error::Error> {
            let docs = self.docs.lock().unwrap();
            Ok(docs
                .iter()
                .find(|doc| doc.get_object_id("_id").ok() == Some(id))
                .cloned())
        }

        async fn list(&self, skip: u64, limit: i64) -> Result<Vec<Document>, mongodb::error::Error> {
            let docs = self.docs.lock().unwrap();
            Ok(docs
                .iter()
                .skip(skip as usize)
                .take(limit as usize)
                .map(project)
                .collect())
        }

        async fn count(&self) -> Result<u64, mongodb::error::Error> {
            Ok(self.docs.lock().unwrap().len() as u64)
        }

        async fn insert(&self, mut doc: Document) -> Result<Bson, mongodb::error::Error> {
            let oid = ObjectId::new();
            doc.insert("_id", oid);
            self.docs.lock().unwrap().push(doc);
            Ok(Bson::ObjectId(oid))
        }
    }

    #[derive(Clone, Default)]
    struct InMemoryFavorites {
        favorites: Arc<Mutex<Vec<Favorite>>>,
    }

    impl FavoriteStore for InMemoryFavorites {
        async fn insert(&self, favorite: &Favorite) -> Result<Bson, mongodb::error::Error> {
            let mut favorite = favorite.clone();
            let oid = ObjectId::new();
            favorite.id = Some(oid);
            self.favorites.lock().unwrap().push(favorite);
            Ok(Bson::ObjectId(oid))
        }

        async fn find_by_user(&self, email: &str) -> Result<Vec<Favorite>, mongodb::error::Error> {
            let favorites = self.favorites.lock().unwrap();
            Ok(favorites
                .iter()
                .filter(|favorite| favorite.user == email)
                .cloned()
                .collect())
        }

        async fn update_status(
            &self,
            id: ObjectId,
            owner: &str,
            status: &str,
        ) -> Result<UpdateCounts, mongodb::error::Error> {
            let mut favorites = self.favorites.lock().unwrap();
            let mut counts = UpdateCounts {
                matched: 0,
                modified: 0,
            };

            for favorite in favorites.iter_mut() {
                if favorite.id == Some(id) && favorite.user == owner {
                    counts.matched += 1;
                    if favorite.status != status {
                        favorite.status = status.to_string();
                        counts.modified += 1;
                    }
                }
            }

            Ok(counts)
        }

        async fn delete(&self, id: ObjectId, owner: &str) -> Result<u64, mongodb::error::Error> {
            let mut favorites = self.favorites.lock().unwrap();
            let before = favorites.len();
            favorites.retain(|favorite| !(favorite.id == Some(id) && favorite.user == owner));
            Ok((before - favorites.len()) as u64)
        }
    }

    /// Favorite store whose inserted ids are not ObjectIds.
    #[derive(Clone)]
    struct StringIdFavorites;

    impl FavoriteStore for StringIdFavorites {
        async fn insert(&self, _favorite: &Favorite) -> Result<Bson, mongodb::error::Error> {
            Ok(Bson::String("not-an-object-id".to_string()))
        }

        async fn find_by_user(&self, _email: &str) -> Result<Vec<Favorite>, mongodb::error::Error> {
            Ok(Vec::new())
        }

        async fn update_status(
            &self,
            _id: ObjectId,
            _owner: &str,
            _status: &str,
        ) -> Result<UpdateCounts, mongodb::error::Error> {
            Ok(UpdateCounts {
                matched: 0,
                modified: 0,
            })
        }

        async fn delete(&self, _id: ObjectId, _owner: &str) -> Result<u64, mongodb::error::Error> {
            Ok(0)
        }
    }

    fn test_service() -> NewsService<InMemoryArticles, InMemoryFavorites> {
        NewsService::new(InMemoryArticles::default(), InMemoryFavorites::default())
    }

    fn pending_favorite(user: &str, article_id: &str) -> Favorite {
        Favorite {
            id: None,
            user: user.to_string(),
            article_id: article_id.to_string(),
            status: "pending".to_string(),
            extra: doc! {},
        }
    }

    #[test]
    fn test_page_window_basic() {
        assert_eq!(page_window(0, 10), (0, 10));
        assert_eq!(page_window(3, 10), (30, 10));
    }

    #[test]
    fn test_page_window_clamps_size() {
        assert_eq!(page_window(0, 0), (0, 1));
        assert_eq!(page_window(2, 10_000), (200, 100));
    }

    #[test]
    fn test_page_window_saturates_skip() {
        let (skip, limit) = page_window(u64::MAX, 100);
        assert_eq!(skip, u64::MAX);
        assert_eq!(limit, 100);
    }

    #[test]
    fn test_parse_object_id_accepts_hex() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn test_parse_object_id_rejects_malformed() {
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_inserted_article_round_trips_by_id() {
        let service = test_service();

        let inserted = service
            .create(doc! { "headline": "h", "body": "long body" })
            .await
            .unwrap();

        let found = service
            .get(&inserted.inserted_id)
            .await
            .unwrap()
            .expect("inserted article should be found");

        assert_eq!(found.id, inserted.inserted_id);
    }

    #[tokio::test]
    async fn test_missing_article_is_none() {
        let service = test_service();

        let found = service.get(&ObjectId::new().to_hex()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_consecutive_pages_are_disjoint() {
        let service = test_service();

        for i in 0..25 {
            service
                .create(doc! { "headline": format!("headline {i}") })
                .await
                .unwrap();
        }

        let mut seen = HashSet::new();
        let mut sizes = Vec::new();

        for page in 0..3 {
            let news = service.list(ListNewsQuery { page, size: 10 }).await.unwrap();
            sizes.push(news.len());
            for item in news {
                assert!(seen.insert(item.id), "pages must not overlap");
            }
        }

        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(service.count().await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_list_returns_only_projected_fields() {
        let service = test_service();

        for i in 0..3 {
            service
                .create(doc! {
                    "headline": format!("headline {i}"),
                    "image": "img.png",
                    "date_published": "2024-01-01",
                    "author": { "name": "A. Writer" },
                    "body": "must not appear in the list",
                })
                .await
                .unwrap();
        }

        let news = service
            .list(ListNewsQuery { page: 0, size: 10 })
            .await
            .unwrap();

        assert_eq!(news.len(), 3);
        for item in &news {
            assert!(!item.id.is_empty());
            assert!(item.fields.contains_key("headline"));
            assert!(!item.fields.contains_key("body"));
        }
    }

    #[tokio::test]
    async fn test_favorites_flow_for_owner() {
        let service = test_service();
        let email = "a@x.com";

        let empty = service.list_favorites(email, email).await.unwrap();
        assert!(empty.is_empty());

        let inserted = service
            .add_favorite(email, pending_favorite(email, "65a1f0c2e4b0a1b2c3d4e5f6"))
            .await
            .unwrap();
        assert!(!inserted.inserted_id.is_empty());

        let favorites = service.list_favorites(email, email).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, inserted.inserted_id);
        assert_eq!(favorites[0].user, email);
        assert_eq!(favorites[0].status, "pending");
    }

    #[tokio::test]
    async fn test_update_then_delete_favorite() {
        let service = test_service();
        let email = "a@x.com";

        let inserted = service
            .add_favorite(email, pending_favorite(email, "65a1f0c2e4b0a1b2c3d4e5f6"))
            .await
            .unwrap();

        let updated = service
            .update_favorite_status(
                email,
                &inserted.inserted_id,
                UpdateFavoriteInput {
                    status: "read".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.matched_count, 1);
        assert_eq!(updated.modified_count, 1);

        let favorites = service.list_favorites(email, email).await.unwrap();
        assert_eq!(favorites[0].status, "read");

        let deleted = service
            .delete_favorite(email, &inserted.inserted_id)
            .await
            .unwrap();
        assert_eq!(deleted.deleted_count, 1);

        assert!(service.list_favorites(email, email).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_favorite_is_zero_count() {
        let service = test_service();

        let response = service
            .update_favorite_status(
                "a@x.com",
                &ObjectId::new().to_hex(),
                UpdateFavoriteInput {
                    status: "read".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.matched_count, 0);
        assert_eq!(response.modified_count, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_favorite_is_zero_count() {
        let service = test_service();

        let response = service
            .delete_favorite("a@x.com", &ObjectId::new().to_hex())
            .await
            .unwrap();

        assert_eq!(response.deleted_count, 0);
    }

    #[tokio::test]
    async fn test_mutating_foreign_favorite_is_zero_count() {
        let service = test_service();

        let inserted = service
            .add_favorite("a@x.com", pending_favorite("a@x.com", "65a1f0c2e4b0a1b2c3d4e5f6"))
            .await
            .unwrap();

        let deleted = service
            .delete_favorite("b@y.com", &inserted.inserted_id)
            .await
            .unwrap();
        assert_eq!(deleted.deleted_count, 0);

        let favorites = service.list_favorites("a@x.com", "a@x.com").await.unwrap();
        assert_eq!(favorites.len(), 1);
    }

    #[tokio::test]
    async fn test_list_favorites_mismatch_is_unauthorized() {
        let service = test_service();

        assert!(matches!(
            service.list_favorites("a@x.com", "b@y.com").await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_non_object_id_insert_result_is_internal_error() {
        let service = NewsService::new(InMemoryArticles::default(), StringIdFavorites);

        let result = service
            .add_favorite("a@x.com", pending_favorite("a@x.com", "abc"))
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}

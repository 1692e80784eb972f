use bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Favorite record: a user-owned bookmark referencing an article plus a
/// mutable status field. Snapshot fields sent by the client (headline, image
/// and so on) are preserved verbatim in the flattened tail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: String,
    #[serde(rename = "articleId")]
    pub article_id: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Serialize)]
pub struct FavoriteDto {
    pub id: String,
    pub user: String,
    #[serde(rename = "articleId")]
    pub article_id: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FavoriteDto {
    pub fn from_favorite(favorite: Favorite) -> Self {
        let extra = match Value::from(Bson::Document(favorite.extra)) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self {
            id: favorite.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            user: favorite.user,
            article_id: favorite.article_id,
            status: favorite.status,
            extra,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateFavoriteInput {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_favorite_roundtrip_preserves_snapshot_fields() {
        let json = serde_json::json!({
            "user": "a@x.com",
            "articleId": "65a1f0c2e4b0a1b2c3d4e5f6",
            "status": "pending",
            "headline": "Saved headline",
        });

        let favorite: Favorite = serde_json::from_value(json).unwrap();
        assert_eq!(favorite.user, "a@x.com");
        assert_eq!(favorite.status, "pending");
        assert_eq!(
            favorite.extra.get_str("headline").ok(),
            Some("Saved headline")
        );
    }

    #[test]
    fn test_favorite_dto_renders_hex_id() {
        let oid = ObjectId::new();
        let favorite = Favorite {
            id: Some(oid),
            user: "a@x.com".to_string(),
            article_id: "abc".to_string(),
            status: "pending".to_string(),
            extra: doc! {},
        };

        let dto = FavoriteDto::from_favorite(favorite);
        assert_eq!(dto.id, oid.to_hex());

        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json.get("articleId").and_then(Value::as_str), Some("abc"));
    }
}

use bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Article document as returned to clients. Articles carry no imposed schema,
/// so the body is the stored document itself with the id rendered as hex.
#[derive(Debug, Clone, Serialize)]
pub struct NewsDto {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NewsDto {
    pub fn from_document(mut doc: Document) -> Self {
        let id = match doc.remove("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let fields = match Value::from(Bson::Document(doc)) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self { id, fields }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListNewsQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_size() -> u64 {
    20
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    #[test]
    fn test_news_dto_renders_id_as_hex() {
        let oid = ObjectId::new();
        let doc = doc! {
            "_id": oid,
            "headline": "Rust ships new release",
            "author": { "name": "A. Writer" },
        };

        let dto = NewsDto::from_document(doc);

        assert_eq!(dto.id, oid.to_hex());
        assert_eq!(
            dto.fields.get("headline").and_then(Value::as_str),
            Some("Rust ships new release")
        );
    }

    #[test]
    fn test_news_dto_serializes_flat() {
        let doc = doc! { "_id": ObjectId::new(), "headline": "h", "image": "i" };
        let json = serde_json::to_value(NewsDto::from_document(doc)).unwrap();

        assert!(json.get("id").is_some());
        assert_eq!(json.get("headline").and_then(Value::as_str), Some("h"));
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListNewsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 20);
    }
}

/*
 * Responsibility
 * - Post エンティティと部分更新フィールドの定義
 * - 選択ファイル (FileSelection) とプレビュー data URL の生成
 */
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::remote::FieldMap;

/// One persisted post, as read from the record store.
///
/// Created and destroyed entirely by the external database; the card only
/// reads one instance and requests its update or deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    pub tweet: String,
    pub photo: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// The full record as a field map (seeding an in-memory store, mostly).
    pub fn to_fields(&self) -> FieldMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Post serializes to an object; nothing else is reachable.
            _ => FieldMap::new(),
        }
    }
}

/// Partial update touching only the text body.
pub fn tweet_field(text: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("tweet".to_string(), Value::String(text.to_string()));
    fields
}

/// Partial update touching only the photo URL.
pub fn photo_field(url: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("photo".to_string(), Value::String(url.to_string()));
    fields
}

/// One file picked by the user, content already in memory.
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileSelection {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Encode the file as a `data:` URL for the local preview.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_content_type_and_payload() {
        let file = FileSelection {
            name: "cat.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let url = file.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(url, format!("data:image/png;base64,{}", BASE64.encode([1u8, 2, 3])));
    }

    #[test]
    fn field_maps_touch_exactly_one_key() {
        let t = tweet_field("hello");
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("tweet"), Some(&Value::String("hello".into())));

        let p = photo_field("https://example.com/p.png");
        assert_eq!(p.len(), 1);
        assert!(p.contains_key("photo"));
    }
}

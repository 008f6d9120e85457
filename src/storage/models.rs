use serde::{Deserialize, Serialize};

/// Social-preview metadata attached to a link.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinkMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A stored short link, keyed by its path in the key-value store.
///
/// Field names stay camelCase on the wire so records written by earlier
/// deployments of the service parse unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub url: String,
    /// Creation time in epoch milliseconds. Gates the self-edit window;
    /// records imported from elsewhere may lack it and are never editable.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Whether crawler requests get a rich preview. `Some(false)` means the
    /// creator explicitly turned previews off; `None` means the record
    /// predates the flag.
    #[serde(default)]
    pub embeds: Option<bool>,
    #[serde(default)]
    pub metadata: Option<LinkMetadata>,
    #[serde(default)]
    pub cloaking: bool,
    #[serde(default)]
    pub domain: Option<String>,
}

impl LinkRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let record = LinkRecord {
            url: "https://example.com".to_string(),
            created_at: Some(1_700_000_000_000),
            embeds: Some(true),
            metadata: None,
            cloaking: false,
            domain: Some("s.example".to_string()),
        };
        let json = record.to_json().unwrap();
        assert!(json.contains("\"createdAt\":1700000000000"));
        assert!(json.contains("\"embeds\":true"));
        assert!(json.contains("\"domain\":\"s.example\""));
    }

    #[test]
    fn test_parses_record_written_by_original_deployment() {
        let raw = r#"{"url":"https://example.com/page","createdAt":1700000000000,"embeds":false,"metadata":{"title":"Hi","description":null,"image":null},"cloaking":true,"domain":null}"#;
        let record = LinkRecord::from_json(raw).unwrap();
        assert_eq!(record.url, "https://example.com/page");
        assert_eq!(record.embeds, Some(false));
        assert!(record.cloaking);
        assert_eq!(record.metadata.unwrap().title.as_deref(), Some("Hi"));
        assert!(record.domain.is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record = LinkRecord::from_json(r#"{"url":"https://example.com"}"#).unwrap();
        assert!(record.created_at.is_none());
        assert!(record.embeds.is_none());
        assert!(!record.cloaking);
        assert!(record.metadata.is_none());
    }

    #[test]
    fn test_record_without_url_fails_to_parse() {
        assert!(LinkRecord::from_json(r#"{"createdAt":123}"#).is_err());
        assert!(LinkRecord::from_json("not json").is_err());
    }
}

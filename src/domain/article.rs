use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque article identifier. The backend may send numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ArticleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ArticleId(n.to_string()),
            RawId::Text(s) => ArticleId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub img_url: String,
    /// Backend category value (`top`, `techsci`, `finance`, `artcul`).
    #[serde(default)]
    pub category: String,
}

impl Article {
    pub fn display_title(&self) -> std::borrow::Cow<'_, str> {
        html_escape::decode_html_entities(&self.title)
    }
}

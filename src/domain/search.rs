use serde::{Deserialize, Serialize};

/// A summarized answer for one query. Replaced wholesale by the next
/// successful fetch, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(rename = "relatedsearch", default)]
    pub related_search: Vec<String>,
}

impl SearchResult {
    /// True when there is nothing to show for the query.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.iter().all(|p| p.trim().is_empty())
    }

    pub fn display_title(&self) -> std::borrow::Cow<'_, str> {
        html_escape::decode_html_entities(&self.title)
    }

    pub fn display_paragraphs(&self) -> impl Iterator<Item = std::borrow::Cow<'_, str>> {
        self.content
            .iter()
            .map(|p| html_escape::decode_html_entities(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let result: SearchResult = serde_json::from_str(
            r#"{"title": "X", "content": ["a", "b"], "relatedsearch": ["Y"]}"#,
        )
        .unwrap();
        assert_eq!(result.title, "X");
        assert_eq!(result.content.len(), 2);
        assert_eq!(result.related_search, vec!["Y"]);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let result: SearchResult = serde_json::from_str(r#"{"title": "Only title"}"#).unwrap();
        assert!(result.content.is_empty());
        assert!(result.related_search.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(SearchResult::default().is_empty());
        let blank = SearchResult {
            title: "  ".into(),
            content: vec!["".into()],
            related_search: vec!["Z".into()],
        };
        assert!(blank.is_empty());
    }

    #[test]
    fn test_display_paragraphs_decode_entities() {
        let result = SearchResult {
            title: "Q&amp;A".into(),
            content: vec!["It&#39;s here".into()],
            related_search: vec![],
        };
        assert_eq!(result.display_title(), "Q&A");
        let paragraphs: Vec<_> = result.display_paragraphs().collect();
        assert_eq!(paragraphs, vec!["It's here"]);
    }
}

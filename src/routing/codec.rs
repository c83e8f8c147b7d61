use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by `encodeURIComponent`-style encoding.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const SEARCH_PATH: &str = "/search";
pub const QUERY_PARAM: &str = "query";

/// Converts free-text queries to and from a URL query parameter.
///
/// `decode(&encode(q)) == q.trim()` for every input. Emptiness is not
/// checked here.
pub struct QueryCodec;

impl QueryCodec {
    pub fn encode(query: &str) -> String {
        utf8_percent_encode(query.trim(), QUERY_COMPONENT).to_string()
    }

    /// Percent-decode a parameter. Invalid UTF-8 sequences are replaced
    /// rather than rejected.
    pub fn decode(param: &str) -> String {
        let decoded: Cow<'_, str> = percent_decode_str(param).decode_utf8_lossy();
        decoded.into_owned()
    }

    /// Navigation path for a search, e.g. `/search?query=Global%20Warming`.
    pub fn search_path(query: &str) -> String {
        format!("{}?{}={}", SEARCH_PATH, QUERY_PARAM, Self::encode(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trip_is_trim(q in "\\PC*") {
            prop_assert_eq!(QueryCodec::decode(&QueryCodec::encode(&q)), q.trim());
        }

        #[test]
        fn encoded_query_has_no_separators(q in "\\PC*") {
            let encoded = QueryCodec::encode(&q);
            prop_assert!(!encoded.contains(['&', '=', '#', ' ', '?', '+']));
        }
    }

    #[test]
    fn test_encode_spaces_and_reserved() {
        assert_eq!(QueryCodec::encode("Global Warming"), "Global%20Warming");
        assert_eq!(QueryCodec::encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(QueryCodec::encode("50,000 workers"), "50%2C000%20workers");
        assert_eq!(QueryCodec::encode("it's (ok)"), "it's%20(ok)");
    }

    #[test]
    fn test_encode_trims() {
        assert_eq!(QueryCodec::encode("  padded  "), "padded");
        assert_eq!(QueryCodec::encode("   "), "");
    }

    #[test]
    fn test_encode_unicode() {
        assert_eq!(QueryCodec::encode("café"), "caf%C3%A9");
    }

    #[test]
    fn test_decode_leaves_plus_alone() {
        assert_eq!(QueryCodec::decode("a+b"), "a+b");
    }

    #[test]
    fn test_search_path() {
        assert_eq!(
            QueryCodec::search_path("Global Warming"),
            "/search?query=Global%20Warming"
        );
    }
}

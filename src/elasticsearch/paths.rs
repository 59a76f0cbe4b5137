//! Elasticsearch REST paths used by the helper
use reqwest::Url;

use crate::config_error;
use crate::error::Result;

pub const ROOT: &str = "/";
pub const CLUSTER_HEALTH: &str = "/_cluster/health";

pub fn index_mapping(index: &str) -> [&str; 2] {
    [index, "_mapping"]
}

pub fn index_settings(index: &str) -> [&str; 2] {
    [index, "_settings"]
}

pub fn index_stats(index: &str) -> [&str; 2] {
    [index, "_stats"]
}

pub fn search(index: &str) -> [&str; 2] {
    [index, "_search"]
}

pub fn documents(index: &str) -> [&str; 2] {
    [index, "_doc"]
}

pub fn document<'a>(index: &'a str, doc_id: &'a str) -> [&'a str; 3] {
    [index, "_doc", doc_id]
}

/// Join an endpoint under a base URL, keeping any path prefix of the base.
pub fn join(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Append path segments to `base`. `/`, `?`, `#` and `%` inside a segment
/// are percent-encoded so a segment never spills into another one.
pub fn with_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| config_error!("cluster address '{}' cannot take a path", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(address: &str) -> Url {
        Url::parse(address).unwrap()
    }

    #[test]
    fn test_join() {
        assert_eq!(
            join("http://localhost:9200", CLUSTER_HEALTH),
            "http://localhost:9200/_cluster/health"
        );
        assert_eq!(
            join("http://localhost:9200/", "_cat/indices"),
            "http://localhost:9200/_cat/indices"
        );
        assert_eq!(join("http://localhost:9200", ROOT), "http://localhost:9200/");
        assert_eq!(
            join("https://proxy.local/es/", "/logs/_search"),
            "https://proxy.local/es/logs/_search"
        );
    }

    #[test]
    fn test_document_paths() {
        let es = base("http://localhost:9200");
        assert_eq!(
            with_segments(&es, &document("logs", "42")).unwrap().as_str(),
            "http://localhost:9200/logs/_doc/42"
        );
        assert_eq!(
            with_segments(&es, &documents("logs")).unwrap().as_str(),
            "http://localhost:9200/logs/_doc"
        );
        assert_eq!(
            with_segments(&base("https://proxy.local/es/"), &search("logs"))
                .unwrap()
                .as_str(),
            "https://proxy.local/es/logs/_search"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let es = base("http://localhost:9200");
        for (doc_id, expected) in [
            ("a/b", "http://localhost:9200/logs/_doc/a%2Fb"),
            ("a?x=1", "http://localhost:9200/logs/_doc/a%3Fx=1"),
            ("a#b", "http://localhost:9200/logs/_doc/a%23b"),
            ("100%", "http://localhost:9200/logs/_doc/100%25"),
        ] {
            let url = with_segments(&es, &document("logs", doc_id)).unwrap();
            assert_eq!(url.as_str(), expected);
            assert_eq!(url.query(), None);
            assert_eq!(url.fragment(), None);
        }
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strata_types::ObjectStats;

use crate::error::RemoteResult;

/// One page of a remote listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPage {
    /// Objects on this page, ascending by path.
    pub results: Vec<ObjectStats>,
    /// Whether more pages follow.
    pub has_more: bool,
    /// Value to pass as `after` to fetch the next page.
    pub next_offset: String,
}

/// Paginated access to the objects of a remote repository reference.
///
/// Implementations return objects whose path starts with `prefix` and sorts
/// strictly after `after`, ascending by path, at most `amount` per page.
/// Retrying transient failures is the implementation's job.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    async fn list_page(&self, prefix: &str, after: &str, amount: usize) -> RemoteResult<ObjectPage>;
}

/// How a listing is fetched and buffered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Only list objects under this prefix.
    pub prefix: String,
    /// Remove `prefix` from every returned path, so paths line up with a
    /// local directory that mirrors the prefix.
    pub strip_prefix: bool,
    /// Objects requested per page.
    pub page_size: usize,
    /// Records buffered between the producer and the consumer.
    pub channel_capacity: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            strip_prefix: true,
            page_size: 1000,
            channel_capacity: 1024,
        }
    }
}

impl ListingConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// `prefix` read as a directory: empty, or ending in `/`.
    ///
    /// `datasets/v1` and `datasets/v1/` both select `datasets/v1/a.txt` and
    /// neither selects `datasets/v10/a.txt`.
    pub fn directory_prefix(&self) -> String {
        if self.prefix.is_empty() || self.prefix.ends_with('/') {
            self.prefix.clone()
        } else {
            format!("{}/", self.prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ListingConfig::default();
        assert_eq!(c.page_size, 1000);
        assert_eq!(c.channel_capacity, 1024);
        assert!(c.strip_prefix);
        assert!(c.prefix.is_empty());
    }

    #[test]
    fn prefix_is_read_as_directory() {
        assert_eq!(ListingConfig::default().directory_prefix(), "");
        assert_eq!(ListingConfig::default().with_prefix("datasets/v1").directory_prefix(), "datasets/v1/");
        assert_eq!(ListingConfig::default().with_prefix("datasets/v1/").directory_prefix(), "datasets/v1/");
    }

    #[test]
    fn page_deserializes_from_api_shape() {
        let json = r#"{"results":[{"path":"a","size_bytes":1,"mtime":2}],"has_more":true,"next_offset":"a"}"#;
        let page: ObjectPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results, vec![ObjectStats::new("a", 1, 2)]);
        assert!(page.has_more);
        assert_eq!(page.next_offset, "a");
    }
}

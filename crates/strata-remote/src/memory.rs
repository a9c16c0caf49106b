//! In-memory object lister.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use strata_types::ObjectStats;

use crate::error::RemoteResult;
use crate::lister::{ObjectLister, ObjectPage};

/// A lister over a fixed set of objects held in memory.
///
/// Objects are keyed by path in a `BTreeMap`, which orders `String` keys by
/// bytes, the same order a remote listing uses.
#[derive(Clone, Debug, Default)]
pub struct MemoryLister {
    objects: BTreeMap<String, ObjectStats>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lister from records in any order. A later record with the
    /// same path replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = ObjectStats>) -> Self {
        let objects = records
            .into_iter()
            .map(|r| (r.path.clone(), r))
            .collect();
        Self { objects }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectLister for MemoryLister {
    async fn list_page(&self, prefix: &str, after: &str, amount: usize) -> RemoteResult<ObjectPage> {
        let amount = amount.max(1);
        let mut matching = self
            .objects
            .range::<str, _>((Bound::Excluded(after), Bound::Unbounded))
            .skip_while(|(path, _)| path.as_str() < prefix)
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(_, record)| record.clone());

        let results: Vec<ObjectStats> = matching.by_ref().take(amount).collect();
        let has_more = matching.next().is_some();
        let next_offset = results.last().map(|r| r.path.clone()).unwrap_or_default();

        Ok(ObjectPage {
            results,
            has_more,
            next_offset,
        })
    }
}

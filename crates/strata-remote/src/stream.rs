//! Concurrent page producer.
//!
//! [`spawn_listing`] starts a task that walks the pages of a listing and
//! pushes each record into a bounded channel. The returned
//! [`RemoteListing`] is the receiving end. It is an ordinary blocking
//! [`Iterator`], so the synchronous merge can pull from it while the next
//! page is already in flight. Use it from a blocking context such as
//! `tokio::task::spawn_blocking`, or call [`RemoteListing::recv`] from async
//! code.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use strata_types::ObjectStats;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::error::{RemoteError, RemoteResult};
use crate::lister::{ListingConfig, ObjectLister};

type Item = RemoteResult<ObjectStats>;

/// Receiving end of a listing produced by [`spawn_listing`].
///
/// Yields records in listing order. A fetch error is yielded once and ends
/// the listing. If the producer dies without finishing, the listing ends
/// with [`RemoteError::ProducerAborted`] rather than looking complete.
/// Dropping the listing stops the producer.
pub struct RemoteListing {
    rx: mpsc::Receiver<Item>,
    complete: Arc<AtomicBool>,
    producer: JoinHandle<()>,
    finished: bool,
}

impl RemoteListing {
    /// Receive the next record without blocking the runtime.
    pub async fn recv(&mut self) -> Option<Item> {
        if self.finished {
            return None;
        }
        let item = self.rx.recv().await;
        self.settle(item)
    }

    fn settle(&mut self, item: Option<Item>) -> Option<Item> {
        match item {
            Some(Ok(record)) => Some(Ok(record)),
            Some(Err(err)) => {
                self.finished = true;
                Some(Err(err))
            }
            None => {
                self.finished = true;
                if self.complete.load(Ordering::Acquire) {
                    None
                } else {
                    Some(Err(RemoteError::ProducerAborted))
                }
            }
        }
    }
}

impl Iterator for RemoteListing {
    type Item = Item;

    /// Blocks the current thread until a record arrives.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    fn next(&mut self) -> Option<Item> {
        if self.finished {
            return None;
        }
        let item = self.rx.blocking_recv();
        self.settle(item)
    }
}

impl Drop for RemoteListing {
    fn drop(&mut self) {
        self.producer.abort();
    }
}

/// Start fetching `lister`'s pages in a background task.
///
/// A non-empty prefix is treated as a directory (see
/// [`ListingConfig::directory_prefix`]). Placeholder records for the prefix
/// itself or for folders below it are not yielded.
///
/// Must be called from within a tokio runtime.
pub fn spawn_listing<L>(lister: Arc<L>, mut config: ListingConfig) -> RemoteListing
where
    L: ObjectLister + ?Sized + 'static,
{
    config.prefix = config.directory_prefix();
    let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
    let complete = Arc::new(AtomicBool::new(false));
    let producer = tokio::spawn(produce(lister, config, tx, Arc::clone(&complete)));
    RemoteListing {
        rx,
        complete,
        producer,
        finished: false,
    }
}

async fn produce<L>(
    lister: Arc<L>,
    config: ListingConfig,
    tx: mpsc::Sender<Item>,
    complete: Arc<AtomicBool>,
) where
    L: ObjectLister + ?Sized,
{
    let page_size = config.page_size.max(1);
    let mut after = String::new();
    let mut pages = 0u64;
    let mut records = 0u64;

    loop {
        let page = match lister.list_page(&config.prefix, &after, page_size).await {
            Ok(page) => page,
            Err(err) => {
                warn!(prefix = %config.prefix, after = %after, error = %err, "listing page failed");
                let _ = tx.send(Err(err)).await;
                return;
            }
        };
        pages += 1;
        debug!(page = pages, results = page.results.len(), has_more = page.has_more, "listing page fetched");

        for mut record in page.results {
            if config.strip_prefix && !config.prefix.is_empty() {
                if let Some(rest) = record.path.strip_prefix(config.prefix.as_str()) {
                    record.path = rest.to_string();
                }
            }
            if record.path.is_empty() || record.is_directory_marker() {
                trace!(path = %record.path, "skipping folder placeholder");
                continue;
            }
            if tx.send(Ok(record)).await.is_err() {
                debug!(pages, records, "listing consumer dropped, stopping producer");
                return;
            }
            records += 1;
        }

        if !page.has_more {
            break;
        }
        if page.next_offset.as_str() <= after.as_str() {
            let err = RemoteError::StalledPagination {
                after,
                next_offset: page.next_offset,
            };
            warn!(error = %err, "listing pagination stalled");
            let _ = tx.send(Err(err)).await;
            return;
        }
        after = page.next_offset;
    }

    complete.store(true, Ordering::Release);
    debug!(pages, records, "listing complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::lister::ObjectPage;
    use crate::memory::MemoryLister;

    fn records(n: usize) -> Vec<ObjectStats> {
        (0..n)
            .map(|i| ObjectStats::new(format!("obj{i:04}"), i as u64, 1))
            .collect()
    }

    async fn drain(listing: RemoteListing) -> Vec<Item> {
        tokio::task::spawn_blocking(move || listing.collect())
            .await
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn pages_arrive_complete_and_in_order() {
        let lister = Arc::new(MemoryLister::from_records(records(7)));
        let config = ListingConfig::default().with_page_size(2).with_channel_capacity(1);
        let items = drain(spawn_listing(lister, config)).await;

        let paths: Vec<String> = items.into_iter().map(|r| r.unwrap().path).collect();
        let expected: Vec<String> = records(7).into_iter().map(|r| r.path).collect();
        assert_eq!(paths, expected);
    }

    #[tokio::test]
    async fn async_recv_reads_whole_listing() {
        let lister = Arc::new(MemoryLister::from_records(records(3)));
        let mut listing = spawn_listing(lister, ListingConfig::default().with_page_size(1));

        let mut seen = 0;
        while let Some(item) = listing.recv().await {
            item.unwrap();
            seen += 1;
        }
        assert_eq!(seen, 3);
        assert!(listing.recv().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn prefix_is_stripped() {
        let lister = Arc::new(MemoryLister::from_records(vec![
            ObjectStats::new("repo/main/a.txt", 1, 1),
            ObjectStats::new("repo/main/sub/b.txt", 1, 1),
            ObjectStats::new("repo/other/c.txt", 1, 1),
        ]));
        let config = ListingConfig::default().with_prefix("repo/main/");
        let paths: Vec<String> = drain(spawn_listing(lister, config))
            .await
            .into_iter()
            .map(|r| r.unwrap().path)
            .collect();
        assert_eq!(paths, vec!["a.txt", "sub/b.txt"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn folder_placeholders_are_not_yielded() {
        let lister = Arc::new(MemoryLister::from_records(vec![
            ObjectStats::new("repo/main/", 0, 1),
            ObjectStats::new("repo/main/a.txt", 1, 1),
            ObjectStats::new("repo/main/sub/", 0, 1),
            ObjectStats::new("repo/main/sub/b.txt", 1, 1),
        ]));
        let config = ListingConfig::default().with_prefix("repo/main").with_page_size(1);
        let paths: Vec<String> = drain(spawn_listing(lister, config))
            .await
            .into_iter()
            .map(|r| r.unwrap().path)
            .collect();
        assert_eq!(paths, vec!["a.txt", "sub/b.txt"]);
    }

    /// Serves `inner` but fails every page after the first `ok_pages`.
    struct FlakyLister {
        inner: MemoryLister,
        ok_pages: usize,
        served: AtomicUsize,
    }

    #[async_trait]
    impl ObjectLister for FlakyLister {
        async fn list_page(&self, prefix: &str, after: &str, amount: usize) -> RemoteResult<ObjectPage> {
            if self.served.fetch_add(1, Ordering::SeqCst) >= self.ok_pages {
                return Err(RemoteError::RemoteError("503 service unavailable".into()));
            }
            self.inner.list_page(prefix, after, amount).await
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn page_error_ends_listing() {
        let lister = Arc::new(FlakyLister {
            inner: MemoryLister::from_records(records(5)),
            ok_pages: 1,
            served: AtomicUsize::new(0),
        });
        let items = drain(spawn_listing(lister, ListingConfig::default().with_page_size(2))).await;

        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok() && items[1].is_ok());
        assert!(matches!(items[2], Err(RemoteError::RemoteError(_))));
    }

    struct StalledLister;

    #[async_trait]
    impl ObjectLister for StalledLister {
        async fn list_page(&self, _: &str, _: &str, _: usize) -> RemoteResult<ObjectPage> {
            Ok(ObjectPage {
                results: vec![],
                has_more: true,
                next_offset: String::new(),
            })
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stalled_pagination_is_an_error() {
        let items = drain(spawn_listing(Arc::new(StalledLister), ListingConfig::default())).await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(RemoteError::StalledPagination { .. })));
    }

    struct PanickingLister;

    #[async_trait]
    impl ObjectLister for PanickingLister {
        async fn list_page(&self, _: &str, _: &str, _: usize) -> RemoteResult<ObjectPage> {
            panic!("lister bug");
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn dead_producer_is_not_a_complete_listing() {
        let items = drain(spawn_listing(Arc::new(PanickingLister), ListingConfig::default())).await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(RemoteError::ProducerAborted)));
    }

    /// Counts pages served, one record per page.
    struct CountingLister {
        inner: MemoryLister,
        served: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ObjectLister for CountingLister {
        async fn list_page(&self, prefix: &str, after: &str, amount: usize) -> RemoteResult<ObjectPage> {
            self.served.fetch_add(1, Ordering::SeqCst);
            self.inner.list_page(prefix, after, amount).await
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn dropping_listing_stops_producer() {
        let served = Arc::new(AtomicUsize::new(0));
        let lister = Arc::new(CountingLister {
            inner: MemoryLister::from_records(records(500)),
            served: Arc::clone(&served),
        });
        let config = ListingConfig::default().with_page_size(1).with_channel_capacity(1);
        let mut listing = spawn_listing(lister, config);

        assert!(listing.recv().await.unwrap().is_ok());
        drop(listing);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let after_drop = served.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(served.load(Ordering::SeqCst), after_drop);
        assert!(after_drop < 500);
    }
}

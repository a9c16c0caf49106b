//! Two-pointer merge of the local walk against the remote listing.
//!
//! Both inputs must be ascending by path under plain byte comparison. The
//! walker guarantees this for the local side; the remote side is the
//! caller's contract and is checked when [`DiffOptions::check_remote_order`]
//! is set.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::error::Error as StdError;
use std::path::Path;

use strata_types::{Change, ChangeSummary, ObjectStats, PathEntry};
use strata_walk::{OrderedIter, OrderedWalker, WalkOptions, WalkResult};
use tracing::{debug, info, trace};

use crate::error::{DiffError, DiffResult};
use crate::options::DiffOptions;

/// A diff in progress, yielding one [`Change`] at a time in ascending path
/// order.
///
/// `L` is the local side (normally an [`OrderedIter`]), `R` the remote
/// listing. Each side is pulled only when the merge needs its next element,
/// so a remote listing fed by a network producer is consumed as pages
/// arrive. The first error ends the stream.
pub struct DiffStream<L, R> {
    local: L,
    remote: R,
    local_head: Option<PathEntry>,
    remote_head: Option<ObjectStats>,
    local_done: bool,
    remote_done: bool,
    last_remote: Option<String>,
    check_order: bool,
    remote_filter: WalkOptions,
    summary: ChangeSummary,
    finished: bool,
}

/// A [`DiffStream`] driven by an ordered walk of a local directory.
pub type LocalDiffStream<R> = DiffStream<OrderedIter, R>;

impl<R, E> DiffStream<OrderedIter, R>
where
    R: Iterator<Item = Result<ObjectStats, E>>,
    E: StdError + Send + Sync + 'static,
{
    /// Start a diff of `local_root` against `remote`.
    ///
    /// Remote records under a name the walk ignores are dropped too, so an
    /// ignored path is never reported from either side.
    pub fn new(local_root: impl AsRef<Path>, remote: R, options: &DiffOptions) -> Self {
        let walker = OrderedWalker::with_options(local_root.as_ref(), options.walk.clone());
        debug!(root = %walker.root().display(), "starting local diff");
        let remote_filter = walker.options().clone();
        let mut stream = Self::from_parts(walker.into_iter(), remote, options.check_remote_order);
        stream.remote_filter = remote_filter;
        stream
    }
}

impl<L, R, E> DiffStream<L, R>
where
    L: Iterator<Item = WalkResult<PathEntry>>,
    R: Iterator<Item = Result<ObjectStats, E>>,
    E: StdError + Send + Sync + 'static,
{
    /// Merge an arbitrary ordered local sequence against `remote`.
    pub fn from_parts(local: L, remote: R, check_order: bool) -> Self {
        Self {
            local,
            remote,
            local_head: None,
            remote_head: None,
            local_done: false,
            remote_done: false,
            last_remote: None,
            check_order,
            remote_filter: WalkOptions::all_files(),
            summary: ChangeSummary::default(),
            finished: false,
        }
    }

    /// Counts of the changes yielded so far.
    pub fn summary(&self) -> ChangeSummary {
        self.summary
    }

    fn fill_local(&mut self) -> DiffResult<()> {
        if self.local_head.is_some() || self.local_done {
            return Ok(());
        }
        match self.local.next() {
            Some(entry) => self.local_head = Some(entry?),
            None => self.local_done = true,
        }
        Ok(())
    }

    fn fill_remote(&mut self) -> DiffResult<()> {
        while self.remote_head.is_none() && !self.remote_done {
            let Some(item) = self.remote.next() else {
                self.remote_done = true;
                break;
            };
            let record = item.map_err(|e| DiffError::Remote(Box::new(e)))?;

            if self.check_order {
                if let Some(previous) = &self.last_remote {
                    if record.path.as_bytes() <= previous.as_bytes() {
                        return Err(DiffError::UnsortedRemote {
                            previous: previous.clone(),
                            current: record.path,
                        });
                    }
                }
                self.last_remote = Some(record.path.clone());
            }

            if record.is_directory_marker() {
                trace!(path = %record.path, "skipping remote directory marker");
                continue;
            }
            if self.remote_filter.is_ignored_path(&record.path) {
                trace!(path = %record.path, "skipping ignored remote record");
                continue;
            }
            self.remote_head = Some(record);
        }
        Ok(())
    }

    fn emit(&mut self, change: Change) -> Option<DiffResult<Change>> {
        self.summary.record(change.kind);
        Some(Ok(change))
    }

    fn fail(&mut self, err: DiffError) -> Option<DiffResult<Change>> {
        self.finished = true;
        debug!(error = %err, "diff aborted");
        Some(Err(err))
    }
}

impl<L, R, E> Iterator for DiffStream<L, R>
where
    L: Iterator<Item = WalkResult<PathEntry>>,
    R: Iterator<Item = Result<ObjectStats, E>>,
    E: StdError + Send + Sync + 'static,
{
    type Item = DiffResult<Change>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if let Err(err) = self.fill_local().and_then(|()| self.fill_remote()) {
                return self.fail(err);
            }

            match (self.local_head.take(), self.remote_head.take()) {
                (None, None) => {
                    self.finished = true;
                    info!(
                        added = self.summary.added,
                        removed = self.summary.removed,
                        modified = self.summary.modified,
                        "diff complete"
                    );
                    return None;
                }
                (Some(local), None) => return self.emit(Change::added(local.path)),
                (None, Some(remote)) => return self.emit(Change::removed(remote.path)),
                (Some(local), Some(remote)) => {
                    match local.path.as_bytes().cmp(remote.path.as_bytes()) {
                        Ordering::Less => {
                            self.remote_head = Some(remote);
                            return self.emit(Change::added(local.path));
                        }
                        Ordering::Greater => {
                            self.local_head = Some(local);
                            return self.emit(Change::removed(remote.path));
                        }
                        Ordering::Equal => {
                            if !local.same_metadata(remote.size(), remote.mtime) {
                                return self.emit(Change::modified(local.path));
                            }
                        }
                    }
                }
            }
        }
    }
}

impl<L, R, E> std::iter::FusedIterator for DiffStream<L, R>
where
    L: Iterator<Item = WalkResult<PathEntry>>,
    R: Iterator<Item = Result<ObjectStats, E>>,
    E: StdError + Send + Sync + 'static,
{
}

/// Diff `local_root` against a sorted remote listing with default options.
///
/// The remote listing must be strictly ascending by path. Any error aborts
/// the whole diff; partial results are never returned.
pub fn diff_local_with_head<I, E>(remote: I, local_root: impl AsRef<Path>) -> DiffResult<Vec<Change>>
where
    I: IntoIterator<Item = Result<ObjectStats, E>>,
    E: StdError + Send + Sync + 'static,
{
    diff_local_with_options(remote, local_root, &DiffOptions::default())
}

/// [`diff_local_with_head`] with explicit options.
pub fn diff_local_with_options<I, E>(
    remote: I,
    local_root: impl AsRef<Path>,
    options: &DiffOptions,
) -> DiffResult<Vec<Change>>
where
    I: IntoIterator<Item = Result<ObjectStats, E>>,
    E: StdError + Send + Sync + 'static,
{
    DiffStream::new(local_root, remote.into_iter(), options).collect()
}

/// Diff against remote records that cannot fail, such as an in-memory list.
pub fn diff_local_with_records<I>(records: I, local_root: impl AsRef<Path>) -> DiffResult<Vec<Change>>
where
    I: IntoIterator<Item = ObjectStats>,
{
    diff_local_with_head(records.into_iter().map(Ok::<_, Infallible>), local_root)
}

//! The ordered walker.
//!
//! Directory listing is delegated to `walkdir`, which already walks
//! depth-first and sorts each directory's children with a caller-supplied
//! comparator before descending. Supplying [`compare_augmented`] as that
//! comparator is all it takes to reproduce flat key order.

use std::fs;
use std::path::{Path, PathBuf};

use strata_types::{unix_seconds, PathEntry};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::error::{WalkError, WalkResult};
use crate::key::compare_augmented;
use crate::options::WalkOptions;

/// A lazy walk over the files under `root`, in flat key order.
#[derive(Clone, Debug)]
pub struct OrderedWalker {
    root: PathBuf,
    options: WalkOptions,
}

impl OrderedWalker {
    /// Walk `root` with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, WalkOptions::default())
    }

    pub fn with_options(root: impl Into<PathBuf>, options: WalkOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }
}

impl IntoIterator for OrderedWalker {
    type Item = WalkResult<PathEntry>;
    type IntoIter = OrderedIter;

    fn into_iter(self) -> OrderedIter {
        let follow_links = self.options.follow_links;
        let inner = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(follow_links)
            .sort_by(move |a, b| {
                compare_augmented(
                    a.file_name().as_encoded_bytes(),
                    sorts_as_dir(a, follow_links),
                    b.file_name().as_encoded_bytes(),
                    sorts_as_dir(b, follow_links),
                )
            })
            .into_iter();

        OrderedIter {
            root: self.root,
            options: self.options,
            inner,
            checked_root: false,
            done: false,
            emitted: 0,
        }
    }
}

/// Iterator returned by [`OrderedWalker::into_iter`].
///
/// Yields every file once, in ascending byte order of its relative path.
/// After the first error it yields nothing more.
pub struct OrderedIter {
    root: PathBuf,
    options: WalkOptions,
    inner: walkdir::IntoIter,
    checked_root: bool,
    done: bool,
    emitted: u64,
}

impl OrderedIter {
    fn check_root(&self) -> WalkResult<()> {
        let metadata = fs::metadata(&self.root).map_err(|source| WalkError::Io {
            path: self.root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(WalkError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    fn to_entry(&self, entry: &DirEntry) -> WalkResult<PathEntry> {
        let metadata = entry.metadata()?;
        let modified = metadata.modified().map_err(|source| WalkError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        Ok(PathEntry {
            path: relative_path(&self.root, entry.path())?,
            size: metadata.len(),
            mtime: unix_seconds(modified),
            is_dir: false,
        })
    }

    fn fail(&mut self, err: WalkError) -> Option<WalkResult<PathEntry>> {
        self.done = true;
        debug!(root = %self.root.display(), error = %err, "ordered walk aborted");
        Some(Err(err))
    }
}

impl Iterator for OrderedIter {
    type Item = WalkResult<PathEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.checked_root {
            self.checked_root = true;
            if let Err(err) = self.check_root() {
                return self.fail(err);
            }
        }

        loop {
            let entry = match self.inner.next() {
                None => {
                    self.done = true;
                    debug!(root = %self.root.display(), files = self.emitted, "ordered walk complete");
                    return None;
                }
                Some(Err(err)) => return self.fail(err.into()),
                Some(Ok(entry)) => entry,
            };

            let file_type = entry.file_type();
            if self.options.is_ignored(entry.file_name()) {
                if file_type.is_dir() {
                    self.inner.skip_current_dir();
                }
                trace!(path = %entry.path().display(), "ignored");
                continue;
            }
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() && self.options.skip_non_regular_files {
                debug!(path = %entry.path().display(), "skipping non-regular file");
                continue;
            }

            return match self.to_entry(&entry) {
                Ok(path_entry) => {
                    self.emitted += 1;
                    Some(Ok(path_entry))
                }
                Err(err) => self.fail(err),
            };
        }
    }
}

impl std::iter::FusedIterator for OrderedIter {}

/// Visit every file under `root` in flat key order, with default options.
///
/// `visit` is called once per file. Returning an error from it stops the
/// walk and that error is returned; walk failures are converted with
/// `From<WalkError>`.
pub fn walk_ordered<F, E>(root: impl AsRef<Path>, visit: F) -> Result<(), E>
where
    F: FnMut(&PathEntry) -> Result<(), E>,
    E: From<WalkError>,
{
    walk_ordered_with(root, &WalkOptions::default(), visit)
}

/// [`walk_ordered`] with explicit options.
pub fn walk_ordered_with<F, E>(
    root: impl AsRef<Path>,
    options: &WalkOptions,
    mut visit: F,
) -> Result<(), E>
where
    F: FnMut(&PathEntry) -> Result<(), E>,
    E: From<WalkError>,
{
    let walker = OrderedWalker::with_options(root.as_ref(), options.clone());
    for entry in walker {
        visit(&entry?)?;
    }
    Ok(())
}

/// Whether a listed child is descended into, and so gets the `/` key suffix.
///
/// `walkdir` sorts children before resolving links, so a link that will be
/// followed is resolved here. A dangling link sorts as a file.
fn sorts_as_dir(entry: &DirEntry, follow_links: bool) -> bool {
    let file_type = entry.file_type();
    if follow_links && file_type.is_symlink() {
        return fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false);
    }
    file_type.is_dir()
}

/// `path` relative to `root`, joined with `/`.
fn relative_path(root: &Path, path: &Path) -> WalkResult<String> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for component in rel.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| WalkError::NonUtf8Path(path.to_path_buf()))?;
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(part);
    }
    Ok(out)
}

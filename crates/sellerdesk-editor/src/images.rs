//! The product's ordered image set: pending local files and persisted URLs.

use sellerdesk_core::{ImageFile, ImagePolicy};

use crate::error::ResourceLimitError;
use crate::previews::{PreviewHandle, PreviewStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Selected locally, not uploaded yet.
    Pending {
        handle: PreviewHandle,
        file: ImageFile,
    },
    Persisted { remote_url: String },
}

impl ImageRef {
    /// The URL a surface would display: the preview for pending entries.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            ImageRef::Pending { handle, .. } => handle.url(),
            ImageRef::Persisted { remote_url } => remote_url,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, ImageRef::Pending { .. })
    }
}

/// Outcome of [`ImageSet::accept_files`].
#[derive(Debug, Default)]
pub struct AcceptReport {
    pub accepted: usize,
    pub rejected: Vec<ResourceLimitError>,
}

/// Ordered image set owning the previews of its pending entries.
///
/// Dropping the set releases every preview still live.
#[derive(Debug)]
pub struct ImageSet {
    entries: Vec<ImageRef>,
    previews: PreviewStore,
    policy: ImagePolicy,
}

impl ImageSet {
    #[must_use]
    pub fn new(policy: ImagePolicy) -> Self {
        Self {
            entries: Vec::new(),
            previews: PreviewStore::new(),
            policy,
        }
    }

    /// A set seeded with already-uploaded images (edit flow).
    #[must_use]
    pub fn from_persisted(urls: Vec<String>, policy: ImagePolicy) -> Self {
        let mut set = Self::new(policy);
        set.entries = urls
            .into_iter()
            .map(|remote_url| ImageRef::Persisted { remote_url })
            .collect();
        set
    }

    /// Accepts files in order. Each file is rejected if the set is full or
    /// the file exceeds the size ceiling; accepted files become pending
    /// entries with a fresh preview.
    pub fn accept_files(&mut self, files: Vec<ImageFile>) -> AcceptReport {
        let mut report = AcceptReport::default();
        for file in files {
            if self.entries.len() >= self.policy.max_images {
                report.rejected.push(ResourceLimitError::TooMany {
                    max: self.policy.max_images,
                });
                continue;
            }
            let size = file.size_bytes();
            if size > self.policy.max_image_bytes {
                report.rejected.push(ResourceLimitError::TooLarge {
                    file_name: file.file_name,
                    size,
                    limit: self.policy.max_image_bytes,
                });
                continue;
            }
            let handle = self.previews.allocate();
            self.entries.push(ImageRef::Pending { handle, file });
            report.accepted += 1;
        }
        if !report.rejected.is_empty() {
            tracing::debug!(
                accepted = report.accepted,
                rejected = report.rejected.len(),
                "some images were not accepted"
            );
        }
        report
    }

    /// Removes the entry shown as `url`, releasing its preview if pending.
    /// Returns `false` when no entry matches.
    pub fn remove(&mut self, url: &str) -> bool {
        let Some(position) = self.entries.iter().position(|e| e.url() == url) else {
            return false;
        };
        if let ImageRef::Pending { handle, .. } = self.entries.remove(position) {
            self.previews.release(&handle);
        }
        true
    }

    #[must_use]
    pub fn pending_files(&self) -> Vec<ImageFile> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                ImageRef::Pending { file, .. } => Some(file.clone()),
                ImageRef::Persisted { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    /// Replaces pending entries, in order, with the uploaded URLs and
    /// releases their previews. Extra URLs are ignored; pending entries
    /// without a URL stay pending.
    pub fn mark_uploaded(&mut self, urls: Vec<String>) {
        let mut urls = urls.into_iter();
        for entry in &mut self.entries {
            if !entry.is_pending() {
                continue;
            }
            let Some(remote_url) = urls.next() else {
                break;
            };
            let old = std::mem::replace(entry, ImageRef::Persisted { remote_url });
            if let ImageRef::Pending { handle, .. } = old {
                self.previews.release(&handle);
            }
        }
    }

    /// Remote URLs of persisted entries, in display order.
    #[must_use]
    pub fn persisted_urls(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                ImageRef::Persisted { remote_url } => Some(remote_url.clone()),
                ImageRef::Pending { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(ImageRef::url).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageRef] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }

    /// Releases every live preview. Entries are kept.
    pub fn release_all(&mut self) -> usize {
        self.previews.release_all()
    }
}

impl Drop for ImageSet {
    fn drop(&mut self) {
        let released = self.previews.release_all();
        if released > 0 {
            tracing::trace!(released, "released previews on teardown");
        }
    }
}

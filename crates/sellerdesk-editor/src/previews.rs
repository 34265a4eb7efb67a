//! Local preview handles for images that have not been uploaded yet.
//!
//! A handle stands for a browser-style object URL: it is allocated when a
//! file is accepted and must be released exactly once, when the file is
//! removed, uploaded, or the session ends.

use std::collections::HashSet;

use uuid::Uuid;

/// Preview URL of a pending image, e.g. `blob:sellerdesk/6f1c…`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tracks live preview handles.
#[derive(Debug, Default)]
pub struct PreviewStore {
    live: HashSet<PreviewHandle>,
    released: usize,
}

impl PreviewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> PreviewHandle {
        let handle = PreviewHandle(format!("blob:sellerdesk/{}", Uuid::new_v4()));
        self.live.insert(handle.clone());
        handle
    }

    /// Releases `handle`. Returns `false` (and changes nothing) when it is
    /// not live, e.g. already released.
    pub fn release(&mut self, handle: &PreviewHandle) -> bool {
        if self.live.remove(handle) {
            self.released += 1;
            tracing::trace!(preview = %handle, "released preview");
            true
        } else {
            tracing::debug!(preview = %handle, "ignoring release of unknown preview");
            false
        }
    }

    /// Releases every live handle; returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let count = self.live.len();
        for handle in self.live.drain() {
            tracing::trace!(preview = %handle, "released preview");
        }
        self.released += count;
        count
    }

    #[must_use]
    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.live.contains(handle)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total releases over the store's lifetime.
    #[must_use]
    pub fn released_count(&self) -> usize {
        self.released
    }
}

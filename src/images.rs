//! Item pictures

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::menu::ItemId;

/// Shown in place of a missing or broken picture.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Remembers which item pictures failed to load so they render as the placeholder.
#[derive(Debug, Default, Clone)]
pub struct ImageFallback {
    failed: FxHashSet<ItemId>,
}

impl ImageFallback {
    /// Create a tracker with no failures
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the picture for `id` could not be loaded.
    pub fn mark_failed(&mut self, id: &ItemId) {
        if self.failed.insert(id.clone()) {
            debug!(item = %id, "image failed to load, using placeholder");
        }
    }

    /// Whether the picture for `id` has failed
    pub fn has_failed(&self, id: &ItemId) -> bool {
        self.failed.contains(id)
    }

    /// The picture to show for an item.
    pub fn source<'s>(&self, id: &ItemId, image: Option<&'s str>) -> &'s str {
        match image {
            Some(path) if !self.has_failed(id) => path,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}

//! Registry of compiled masks, keyed by format string.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use log::trace;
use parking_lot::RwLock;

use crate::format::FormatError;
use crate::mask::Mask;

static SHARED: LazyLock<MaskCache> = LazyLock::new(MaskCache::new);

/// Compiled masks by format string.
///
/// Entries are created on first request and never evicted. A format is
/// compiled at most once per cache, and failures are not stored.
#[derive(Debug, Default)]
pub struct MaskCache {
    masks: RwLock<HashMap<String, Arc<Mask>>>,
}

impl MaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache, created on first use.
    pub fn shared() -> &'static MaskCache {
        &SHARED
    }

    /// Get the mask for `format`, compiling and storing it if absent.
    pub fn get_or_create(&self, format: &str) -> Result<Arc<Mask>, FormatError> {
        if let Some(mask) = self.get(format) {
            trace!("mask cache hit for {format:?}");
            return Ok(mask);
        }

        let mut masks = self.masks.write();
        // Another thread may have compiled it while we waited.
        if let Some(mask) = masks.get(format) {
            return Ok(Arc::clone(mask));
        }
        let mask = Arc::new(Mask::new(format)?);
        masks.insert(format.to_string(), Arc::clone(&mask));
        Ok(mask)
    }

    /// Look up `format` without compiling.
    pub fn get(&self, format: &str) -> Option<Arc<Mask>> {
        self.masks.read().get(format).cloned()
    }

    pub fn len(&self) -> usize {
        self.masks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.read().is_empty()
    }
}

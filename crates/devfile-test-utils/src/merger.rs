//! Merger wrapper that counts how often each operation runs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use devfile_api::{Overrides, TemplateContent};
use devfile_merge::{DefaultMerger, Merger, Result};

/// Delegates to [`DefaultMerger`] and counts calls.
///
/// Clones share their counters, so a test can keep one clone and hand the
/// other to the resolver.
#[derive(Debug, Clone, Default)]
pub struct RecordingMerger {
    merges: Arc<AtomicUsize>,
    overrides: Arc<AtomicUsize>,
}

impl RecordingMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_count(&self) -> usize {
        self.merges.load(Ordering::SeqCst)
    }

    pub fn override_count(&self) -> usize {
        self.overrides.load(Ordering::SeqCst)
    }
}

impl Merger for RecordingMerger {
    fn merge(
        &self,
        local: TemplateContent,
        parent: Option<TemplateContent>,
        plugins: Vec<TemplateContent>,
    ) -> Result<TemplateContent> {
        self.merges.fetch_add(1, Ordering::SeqCst);
        DefaultMerger.merge(local, parent, plugins)
    }

    fn override_content(
        &self,
        base: TemplateContent,
        overrides: &Overrides,
    ) -> Result<TemplateContent> {
        self.overrides.fetch_add(1, Ordering::SeqCst);
        DefaultMerger.override_content(base, overrides)
    }
}

//! Import progress reporting.

/// Trait for receiving deck-list import progress updates.
pub trait ImportProgress {
    /// Called after each deck-list entry is resolved against the catalog.
    fn on_entry(&self, current: usize, total: usize, name: &str, applied: u32);

    /// Called for an entry whose card name is not in the catalog.
    fn on_skipped(&self, line: usize, name: &str);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_entry(&self, _current: usize, _total: usize, _name: &str, _applied: u32) {}
    fn on_skipped(&self, _line: usize, _name: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_entry(&self, current: usize, total: usize, name: &str, applied: u32) {
        log::debug!("  [{}/{}] {} (+{})", current, total, name, applied);
    }

    fn on_skipped(&self, line: usize, name: &str) {
        log::warn!("  line {}: card '{}' is not in the catalog, skipped", line, name);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}

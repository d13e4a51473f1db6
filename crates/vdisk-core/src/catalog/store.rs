use tracing::debug;

use super::models::DiskRecord;
use super::path::normalize_path;

/// Result of [`CatalogStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Same filename, size and format, and the same path after normalization.
    Duplicate,
    /// The exact `full_path` string is already cataloged with different metadata.
    PathExists,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// In-memory, insertion-ordered catalog of disk records for one session.
///
/// Lookups are linear scans; a catalog is expected to hold at most a few hundred
/// entries.
#[derive(Debug, Default, Clone)]
pub struct CatalogStore {
    records: Vec<DiskRecord>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` at the end unless it collides with an existing entry.
    ///
    /// The four-field duplicate check runs first; the exact path check only sees
    /// records that survived it.
    pub fn add(&mut self, record: DiskRecord) -> AddOutcome {
        let normalized = normalize_path(&record.full_path);

        let is_duplicate = self.records.iter().any(|existing| {
            existing.filename == record.filename
                && existing.size == record.size
                && existing.format == record.format
                && normalize_path(&existing.full_path) == normalized
        });
        if is_duplicate {
            debug!("Duplicate disk record: {}", record.full_path);
            return AddOutcome::Duplicate;
        }

        if self.records.iter().any(|existing| existing.full_path == record.full_path) {
            debug!("Path already cataloged: {}", record.full_path);
            return AddOutcome::PathExists;
        }

        self.records.push(record);
        AddOutcome::Added
    }

    /// Remove the first record matching both fields. The image file is left alone.
    pub fn remove(&mut self, filename: &str, full_path: &str) -> bool {
        match self.position(filename, full_path) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, filename: &str, full_path: &str) -> Option<&DiskRecord> {
        self.position(filename, full_path).map(|index| &self.records[index])
    }

    /// Records in insertion order.
    pub fn all(&self) -> &[DiskRecord] {
        &self.records
    }

    /// Zero-based access, in the same order as [`CatalogStore::all`].
    pub fn get(&self, index: usize) -> Option<&DiskRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, filename: &str, full_path: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.filename == filename && r.full_path == full_path)
    }
}

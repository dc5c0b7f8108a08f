//! Slot: a single persisted key-value location
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cra_core::STORAGE_KEY;
use tempfile::NamedTempFile;
use tracing::debug;

/// Whole-value storage for the serialized state
pub trait Slot {
    /// Current value, or `None` when nothing has been stored yet
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the stored value
    fn write(&mut self, value: &str) -> io::Result<()>;

    /// Delete the stored value; deleting an empty slot succeeds
    fn remove(&mut self) -> io::Result<()>;
}

/// A slot backed by one JSON file
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/change_risk_autopilot_v1.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    /// A missing file reads as `None`
    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write to a temp file beside the target, then rename over it
    /// Write to a sibling temp file, then rename it over the slot
    fn write(&mut self, value: &str) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {:?}", value.len(), self.path);
        Ok(())
    }

    /// Removing a missing file succeeds
    fn remove(&mut self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// An in-process slot
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `value`
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Current contents, if any
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn remove(&mut self) -> io::Result<()> {
        self.value = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slot_absent_reads_none() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path());
        assert_eq!(slot.read().unwrap(), None);
        assert!(slot.path().ends_with("change_risk_autopilot_v1.json"));
    }

    #[test]
    fn test_file_slot_write_read_remove() {
        let dir = TempDir::new().unwrap();
        let mut slot = FileSlot::new(dir.path().join("nested").join("state.json"));

        slot.write("{\"a\":1}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{\"a\":1}"));

        slot.write("{\"a\":2}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{\"a\":2}"));

        slot.remove().unwrap();
        assert_eq!(slot.read().unwrap(), None);
        slot.remove().unwrap();
    }

    #[test]
    fn test_file_slot_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let mut slot = FileSlot::in_dir(dir.path());
        slot.write("one").unwrap();
        slot.write("two").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_memory_slot() {
        let mut slot = MemorySlot::new();
        assert_eq!(slot.read().unwrap(), None);
        slot.write("x").unwrap();
        assert_eq!(slot.value(), Some("x"));
        slot.remove().unwrap();
        assert_eq!(slot.value(), None);
    }
}

//! File-backed draft of a stall's weekly operating hours.
//!
//! The owner edits hours locally and the draft persists across runs until
//! it is saved to the backend or discarded. A missing or unreadable draft is
//! simply "no draft".

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hawkersg_core::WeeklySchedule;

use crate::error::CatalogError;

#[derive(Debug, Clone)]
pub struct DraftHoursStore {
    path: PathBuf,
}

impl DraftHoursStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored draft, or `None` when there is none. A corrupt file is
    /// logged and treated as absent.
    #[must_use]
    pub fn load(&self) -> Option<WeeklySchedule> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to read hours draft");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(schedule) => Some(schedule),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "ignoring corrupt hours draft");
                None
            }
        }
    }

    /// Writes `schedule` as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DraftIo`] on filesystem failure,
    /// [`CatalogError::Encode`] if the schedule cannot be serialized.
    pub fn save(&self, schedule: &WeeklySchedule) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(schedule).map_err(|e| CatalogError::Encode {
            context: "hours draft".to_owned(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "hours draft saved");
        Ok(())
    }

    /// Deletes the draft. Clearing a draft that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DraftIo`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), CatalogError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> CatalogError {
        CatalogError::DraftIo {
            path: self.path.display().to_string(),
            source,
        }
    }
}

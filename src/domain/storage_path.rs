use std::fmt;

use chrono::{DateTime, Utc};

use super::{AudioFormat, TranscriptionId};

/// Relative location of a stored audio file: `YYYY/MM/DD/<uuid>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn for_audio(id: &TranscriptionId, format: AudioFormat, date: DateTime<Utc>) -> Self {
        Self(format!(
            "{}/{}.{}",
            date.format("%Y/%m/%d"),
            id.as_uuid(),
            format.extension()
        ))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use serde::Serialize;

use std::{fmt, path::Path};

use crate::{
    duration::Timestamp,
    error::{SplitError, SplitResult},
};

pub const DEFAULT_VOLUME: &str = "0.8";

// max display length of filenames in the table
pub const FILENAME_BUDGET: usize = 25;

const ELLIPSIS: char = '\u{2026}';

/// Which side of the alignment a clip is on. `A` is the clip the user gave
/// explicit start and end points for, `B` has its bounds derived from `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipRole {
    A,
    B,
}

impl ClipRole {
    pub fn other(&self) -> ClipRole {
        match self {
            ClipRole::A => ClipRole::B,
            ClipRole::B => ClipRole::A,
        }
    }
}

impl fmt::Display for ClipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipRole::A => f.write_str("A"),
            ClipRole::B => f.write_str("B"),
        }
    }
}

/// A clip as given on the command line. Timestamps are still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawClip {
    pub filename: String,
    pub sync: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub volume: Option<String>,
}

impl RawClip {
    pub fn new(filename: &str, sync: &str) -> Self {
        RawClip {
            filename: filename.into(),
            sync: sync.into(),
            start: None,
            end: None,
            volume: None,
        }
    }

    pub fn with_bounds(mut self, start: &str, end: &str) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    pub fn with_volume(mut self, volume: &str) -> Self {
        self.volume = Some(volume.into());
        self
    }

    /// Start and end if both are present, `None` if neither is.
    fn bounds(&self) -> SplitResult<Option<(&str, &str)>> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Ok(Some((start, end))),
            (None, None) => Ok(None),
            _ => Err(SplitError::validation(format!(
                "'{}' needs both a start and an end point, or neither",
                self.filename
            ))),
        }
    }
}

// FILE SYNC [START END] [VOL]
impl TryFrom<&[String]> for RawClip {
    type Error = SplitError;

    fn try_from(values: &[String]) -> Result<Self, Self::Error> {
        match values {
            [file, sync] => Ok(RawClip::new(file, sync)),
            [file, sync, vol] => Ok(RawClip::new(file, sync).with_volume(vol)),
            [file, sync, start, end] => Ok(RawClip::new(file, sync).with_bounds(start, end)),
            [file, sync, start, end, vol] => Ok(RawClip::new(file, sync)
                .with_bounds(start, end)
                .with_volume(vol)),
            _ => Err(SplitError::validation(format!(
                "expected FILE SYNC [START END] [VOL], got {} value(s)",
                values.len()
            ))),
        }
    }
}

/// The two input clips sorted by role. Exactly one of them carries both
/// start and end points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPair {
    pub complete: RawClip,
    pub partial: RawClip,
}

impl ClipPair {
    pub fn identify(first: RawClip, second: RawClip) -> SplitResult<Self> {
        match (first.bounds()?.is_some(), second.bounds()?.is_some()) {
            (true, false) => Ok(ClipPair {
                complete: first,
                partial: second,
            }),
            (false, true) => Ok(ClipPair {
                complete: second,
                partial: first,
            }),
            (true, true) => Err(SplitError::validation(
                "only one clip may have start and end points; the other's are derived from it",
            )),
            (false, false) => Err(SplitError::validation(
                "one clip needs start and end points to derive the other's from",
            )),
        }
    }

    pub(crate) fn complete_bounds(&self) -> SplitResult<(&str, &str)> {
        self.complete.bounds()?.ok_or_else(|| {
            SplitError::validation(format!(
                "'{}' is missing its start and end points",
                self.complete.filename
            ))
        })
    }
}

/// A clip whose start, sync and end are known in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedClip {
    pub filename: String,
    pub start: Timestamp,
    pub sync: Timestamp,
    pub end: Timestamp,
    pub volume: Option<String>,
}

impl TimedClip {
    pub fn length(&self) -> Timestamp {
        Timestamp::from_millis(self.end.as_millis() - self.start.as_millis())
    }

    pub fn pre_sync(&self) -> u64 {
        self.sync.as_millis() - self.start.as_millis()
    }

    pub fn post_sync(&self) -> u64 {
        self.end.as_millis() - self.sync.as_millis()
    }
}

/// A fully populated clip ready for the table and the encoder command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayClip {
    pub role: ClipRole,
    pub filename: String,
    pub short_name: String,
    pub start: Timestamp,
    pub sync: Timestamp,
    pub end: Timestamp,
    pub length: Timestamp,
    pub volume: String,
}

impl DisplayClip {
    pub fn new(clip: TimedClip, role: ClipRole) -> Self {
        let length = clip.length();
        DisplayClip {
            role,
            short_name: shorten_filename(&clip.filename),
            volume: clip.volume.unwrap_or_else(|| DEFAULT_VOLUME.into()),
            filename: clip.filename,
            start: clip.start,
            sync: clip.sync,
            end: clip.end,
            length,
        }
    }
}

/// Display name for a clip: the base name of `filename`, with the stem
/// shortened by an ellipsis so stem and extension fit in `FILENAME_BUDGET`
/// characters.
pub fn shorten_filename(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename);
    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    };

    let room = FILENAME_BUDGET.saturating_sub(ext.chars().count());
    let stem_len = stem.chars().count();
    if stem_len <= room {
        return name.to_string();
    }

    let prefix_len = room.div_ceil(2);
    let suffix_len = room.saturating_sub(prefix_len + 1);
    let prefix: String = stem.chars().take(prefix_len).collect();
    let suffix: String = stem.chars().skip(stem_len - suffix_len).collect();
    format!("{prefix}{ELLIPSIS}{suffix}{ext}")
}

#![forbid(unsafe_code)]

//! Program catalog payload.
//!
//! The dashboard backend ships programs as a JSON object keyed by program
//! name:
//!
//! ```json
//! {
//!   "terminal": {
//!     "visible": true,
//!     "display-name": "Terminal",
//!     "url": "/term",
//!     "icon-image": "17",
//!     "width": 2,
//!     "height": 1,
//!     "program-type": 0
//!   }
//! }
//! ```
//!
//! Key order decides the order of equal-area tiles. Programs are kept in the
//! order a browser enumerates object keys: integer-like names (`"2048"`)
//! first in ascending numeric order, then every other name in payload order.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::placement::PlacementItem;

/// Border colours indexed by program type. Types outside this table are not
/// rendered.
pub const PROGRAM_COLORS: [&str; 5] = ["#EEEEEE", "#EB4034", "#C634EB", "#34EB62", "#EB9334"];

/// Largest width/height the program editor accepts.
pub const MAX_EDITOR_SPAN: i64 = 5;

/// Known program categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramKind {
    Program,
    Website,
    Game,
}

impl ProgramKind {
    /// Map a payload type index to a kind.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Program),
            1 => Some(Self::Website),
            2 => Some(Self::Game),
            _ => None,
        }
    }
}

/// Border colour for a payload type index, if the renderer draws that type.
pub fn border_color(program_type: i64) -> Option<&'static str> {
    usize::try_from(program_type)
        .ok()
        .and_then(|i| PROGRAM_COLORS.get(i).copied())
}

/// Icon reference: the backend sends image ids either as strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconRef {
    Id(u64),
    Name(String),
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

fn default_visible() -> bool {
    true
}

/// One program as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProgramEntry {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon_image: Option<IconRef>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub width: i64,
    pub height: i64,
    pub program_type: i64,
}

impl ProgramEntry {
    /// Category, if the type index names a known one.
    pub fn kind(&self) -> Option<ProgramKind> {
        ProgramKind::from_index(self.program_type)
    }

    /// Border colour, if the renderer draws this type.
    pub fn border_color(&self) -> Option<&'static str> {
        border_color(self.program_type)
    }

    /// Tile dimensions as `(width, height)` when both are positive and fit a `u16`.
    pub fn dimensions(&self) -> Option<(u16, u16)> {
        let width = u16::try_from(self.width).ok().filter(|&w| w >= 1)?;
        let height = u16::try_from(self.height).ok().filter(|&h| h >= 1)?;
        Some((width, height))
    }

    /// Dimensions coerced the way the program editor stores them: a side
    /// outside `1..=5` becomes 1.
    pub fn sanitized_dimensions(&self) -> (u16, u16) {
        let clamp = |v: i64| {
            if (1..=MAX_EDITOR_SPAN).contains(&v) {
                v as u16
            } else {
                1
            }
        };
        (clamp(self.width), clamp(self.height))
    }
}

/// Array-index key as enumerated first by a browser: canonical decimal below
/// `u32::MAX`.
fn index_key(name: &str) -> Option<u32> {
    let n = name.parse::<u32>().ok().filter(|&n| n != u32::MAX)?;
    (n.to_string() == name).then_some(n)
}

/// Failure to read a program payload.
#[derive(Debug)]
pub enum CatalogError {
    /// The text is not valid JSON.
    Json(serde_json::Error),
    /// The program storage is not a JSON object.
    NotAnObject,
    /// The initial payload has no member with this name.
    MissingMember(&'static str),
    /// One program entry has the wrong shape.
    InvalidEntry {
        name: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "program payload is not valid JSON: {err}"),
            Self::NotAnObject => f.write_str("program storage must be a JSON object"),
            Self::MissingMember(name) => write!(f, "payload has no `{name}` member"),
            Self::InvalidEntry { name, source } => {
                write!(f, "program `{name}` is malformed: {source}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidEntry { source, .. } => Some(source),
            Self::NotAnObject | Self::MissingMember(_) => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Programs in payload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramCatalog {
    entries: Vec<(String, ProgramEntry)>,
}

impl ProgramCatalog {
    /// Member of the initial payload holding the programs.
    pub const STORAGE_KEY: &'static str = "program-storage";

    /// Parse a program storage object.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the text is not JSON, is not an object, or
    /// an entry does not match [`ProgramEntry`].
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Read the programs out of the full initial payload.
    ///
    /// A `null` payload means the backend has nothing to show and yields an
    /// empty catalog.
    pub fn from_connect_init(text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(mut payload) => match payload.remove(Self::STORAGE_KEY) {
                Some(storage) => Self::from_value(storage),
                None => Err(CatalogError::MissingMember(Self::STORAGE_KEY)),
            },
            _ => Err(CatalogError::NotAnObject),
        }
    }

    /// Build from an already parsed storage object.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };
        let mut entries = Vec::with_capacity(map.len());
        for (name, raw) in map {
            match serde_json::from_value::<ProgramEntry>(raw) {
                Ok(entry) => entries.push((name, entry)),
                Err(source) => return Err(CatalogError::InvalidEntry { name, source }),
            }
        }
        // Stable: non-index names keep payload order.
        entries.sort_by_key(|(name, _)| match index_key(name) {
            Some(n) => (0, n),
            None => (1, 0),
        });
        Ok(Self { entries })
    }

    /// Build from entries directly.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ProgramEntry)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by program name.
    pub fn get(&self, name: &str) -> Option<&ProgramEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    /// Entries in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProgramEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Coerce every entry's dimensions the way the program editor saves them.
    pub fn sanitize(&mut self) {
        for (_, entry) in &mut self.entries {
            let (width, height) = entry.sanitized_dimensions();
            entry.width = i64::from(width);
            entry.height = i64::from(height);
        }
    }

    /// Items to hand to the placement engine, keyed by program name.
    ///
    /// Hidden programs, programs whose type has no border colour, and programs
    /// with non-positive dimensions are left out.
    pub fn placement_items(&self) -> Vec<PlacementItem<String>> {
        self.iter()
            .filter(|(_, entry)| entry.visible && entry.border_color().is_some())
            .filter_map(|(name, entry)| {
                let (width, height) = entry.dimensions()?;
                Some(PlacementItem::new(name.to_owned(), width, height))
            })
            .collect()
    }
}

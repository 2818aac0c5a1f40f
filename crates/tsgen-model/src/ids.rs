use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based position of a sheet inside the tabular input.
///
/// CSV and TSV inputs only ever have sheet 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(u32);

impl SheetId {
    pub const FIRST: SheetId = SheetId(1);

    /// Returns `None` for position 0.
    pub fn new(position: u32) -> Option<Self> {
        (position >= 1).then_some(Self(position))
    }

    pub fn position(self) -> u32 {
        self.0
    }

    /// Zero-based index for positional lookups in a workbook.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Default for SheetId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

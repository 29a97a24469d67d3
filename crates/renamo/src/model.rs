//! Value types produced by the parsers and consumed by the batch renamer.
//!
//! Everything here is plain data: derived once per folder or per file and
//! never retained beyond a single batch run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel core for a whole-mix stem with no specific instrument.
pub const FULL: &str = "Full";

/// Result of one canonical-table lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Canonical {
    /// The token matched an alias in the canonical instrument table.
    Classified(String),
    /// No alias matched; the token was title-cased as a best-effort core.
    Fallback(String),
}

impl Canonical {
    pub fn as_str(&self) -> &str {
        match self {
            Canonical::Classified(s) | Canonical::Fallback(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Canonical::Classified(s) | Canonical::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Canonical::Fallback(_))
    }
}

/// A (core, adjective) pair for one sample file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentClassification {
    /// Never empty. [`FULL`] means no instrument was detected.
    pub core: String,
    /// Empty, or title-cased residue words.
    pub adjective: String,
    /// True when the core came from the unmapped-vocabulary fallback.
    pub fallback: bool,
}

impl InstrumentClassification {
    pub fn new(core: impl Into<String>, adjective: impl Into<String>) -> Self {
        InstrumentClassification {
            core: core.into(),
            adjective: adjective.into(),
            fallback: false,
        }
    }

    pub fn full() -> Self {
        Self::new(FULL, "")
    }

    pub fn from_canonical(canonical: Canonical) -> Self {
        let fallback = canonical.is_fallback();
        InstrumentClassification {
            core: canonical.into_string(),
            adjective: String::new(),
            fallback,
        }
    }

    pub fn is_full(&self) -> bool {
        self.core == FULL
    }
}

/// Metadata parsed from a composition folder name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompositionMeta {
    pub comp_name: String,
    /// Raw key segment, trimmed. Normalized at naming time.
    pub key: Option<String>,
    /// Tempo token such as `92bpm`.
    pub bpm: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    pub fn from_char(c: char) -> Option<NoteName> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    Major,
    Minor,
}

impl Quality {
    pub fn suffix(&self) -> &'static str {
        match self {
            Quality::Major => "maj",
            Quality::Minor => "min",
        }
    }
}

/// A key in canonical spelling: natural or sharp root, explicit quality.
///
/// Displays as `<Root>[#]<maj|min>`, e.g. `G#min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedKey {
    pub root: NoteName,
    pub sharp: bool,
    pub quality: Quality,
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.as_char())?;
        if self.sharp {
            f.write_str("#")?;
        }
        f.write_str(self.quality.suffix())
    }
}

/// Up to three cores standing in for a whole-mix stem: at most two
/// non-bass cores in first-encounter order, then the bass core.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultiTrackDescriptor {
    pub cores: Vec<String>,
}

impl MultiTrackDescriptor {
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }
}

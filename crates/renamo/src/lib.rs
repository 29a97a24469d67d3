//! Sample-pack renaming engine.
//!
//! Takes a folder of composition subfolders holding `.wav` stems and copies
//! every stem into a sibling `_<folder>` tree under a structured name:
//!
//! ```text
//! P&J_<Pack>_<Instrument...>_[[<Comp>]]_<Tempo>[_<Key>].wav
//! ```
//!
//! Names are derived from folder and file names alone; audio content is
//! never read.
//!
//! # Example
//!
//! ```
//! use renamo::{classify_phrase, normalize_key, parse_comp_folder};
//!
//! let meta = parse_comp_folder("Sunset Groove - Abm - 92BPM");
//! assert_eq!(meta.comp_name, "Sunset Groove");
//! assert_eq!(meta.bpm.as_deref(), Some("92bpm"));
//! assert_eq!(normalize_key("Abm"), "G#min");
//!
//! let c = classify_phrase("Dreamy Rhodes");
//! assert_eq!(c.core, "Electric_Piano");
//! assert_eq!(c.adjective, "Dreamy");
//! ```
//!
//! Whole batches go through [`Renamer`], or [`rename_pack`] for the
//! defaults.

pub mod batch;
pub mod error;
pub mod feedback;
pub mod model;
pub mod naming;
pub mod parser;
pub mod tables;

pub use batch::{
    normalize_pack_prefix, rename_pack, validate_output_prefix, FolderPlan, Phase, PlannedCopy,
    ProgressSink, RenamePlan, Renamer,
};
pub use error::{RenameError, Result};
pub use feedback::{Feedback, FeedbackCollector, FeedbackLevel};
pub use model::*;
pub use naming::{instrument_segments, multi_track_descriptor, OutputName};
pub use parser::{
    classify_phrase, classify_phrase_with, instrument_phrase, normalize_key, pack_abbrev_from_name,
    parse_comp_folder, parse_key, tempo_from_filename,
};
pub use tables::InstrumentTables;

//! Batch renaming of a pack's composition folders.
//!
//! Layout handled:
//!
//! ```text
//! <pack folder>/                     e.g. "FL - Pelham & Junior Lofi Keys"
//! ├── <source>/                      the directory handed to the renamer
//! │   ├── <composition folder>/      "Sunset Groove - Abm - 92BPM"
//! │   │   ├── Sunset Groove.wav
//! │   │   └── Sunset Groove - Rhodes.wav
//! │   └── ...
//! └── _<source>/                     created; mirrors the folder grouping
//! ```
//!
//! Work is split in two. [`Renamer::plan`] reads the tree and computes
//! every output name without writing anything. [`Renamer::execute`] creates
//! the destination folders and copies the files. Within a folder, files are
//! handled in sorted-filename order; that order decides "first encounter"
//! for the multi-track descriptor.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{RenameError, Result};
use crate::feedback::{Feedback, FeedbackCollector};
use crate::model::{CompositionMeta, InstrumentClassification, MultiTrackDescriptor};
use crate::naming::{
    instrument_segments, multi_track_descriptor, OutputName, DEFAULT_LABEL, OUTPUT_EXTENSION,
    UNKNOWN_TEMPO,
};
use crate::parser::{
    classify_phrase_with, instrument_phrase, normalize_key, pack_abbrev_from_name,
    parse_comp_folder, parse_key, tempo_from_filename,
};
use crate::tables::InstrumentTables;

/// Prefix of the destination root, which sits next to the source.
pub const DEFAULT_OUTPUT_PREFIX: &str = "_";

const PACK_PREFIX_LEN: std::ops::RangeInclusive<usize> = 3..=8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Preparing,
    Renaming,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Preparing => f.write_str("Preparing…"),
            Phase::Renaming => f.write_str("Renaming…"),
        }
    }
}

/// Receives progress notifications from a running batch.
///
/// Implementations may forward to another thread; the engine only calls
/// `notify` synchronously between file copies.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, phase: Phase, done: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: Fn(Phase, usize, usize) + Send + Sync,
{
    fn notify(&self, phase: Phase, done: usize, total: usize) {
        self(phase, done, total)
    }
}

/// Paths serialize as (lossy) strings so non-UTF-8 names still render.
fn lossy_path<P, S>(path: &P, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

/// One file copy: source path -> destination path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedCopy {
    #[serde(serialize_with = "lossy_path")]
    pub source: PathBuf,
    #[serde(serialize_with = "lossy_path")]
    pub destination: PathBuf,
    pub file_name: String,
    pub classification: InstrumentClassification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderPlan {
    pub name: String,
    pub meta: CompositionMeta,
    pub multi_track: MultiTrackDescriptor,
    #[serde(serialize_with = "lossy_path")]
    pub destination: PathBuf,
    pub files: Vec<PlannedCopy>,
}

/// Everything a batch will do, computed without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenamePlan {
    #[serde(serialize_with = "lossy_path")]
    pub source_dir: PathBuf,
    #[serde(serialize_with = "lossy_path")]
    pub destination_dir: PathBuf,
    pub pack_abbrev: String,
    pub folders: Vec<FolderPlan>,
    pub feedback: Vec<Feedback>,
}

impl RenamePlan {
    pub fn total_files(&self) -> usize {
        self.folders.iter().map(|f| f.files.len()).sum()
    }

    pub fn copies(&self) -> impl Iterator<Item = &PlannedCopy> {
        self.folders.iter().flat_map(|f| f.files.iter())
    }
}

/// Validate a caller-supplied pack prefix.
///
/// Blank means "no override". Anything else must be 3-8 ASCII letters and
/// is upper-cased.
pub fn normalize_pack_prefix(raw: &str) -> Result<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !PACK_PREFIX_LEN.contains(&trimmed.len())
        || !trimmed.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Err(RenameError::InvalidPackPrefix(trimmed.to_string()));
    }
    Ok(Some(trimmed.to_ascii_uppercase()))
}

/// Check the destination root prefix.
///
/// The destination must be a sibling of the source, so the prefix may not
/// be empty and may not contain a path separator or `..`.
pub fn validate_output_prefix(prefix: &str) -> Result<()> {
    let escapes = prefix.is_empty()
        || prefix.contains(['/', '\\'])
        || prefix.contains("..");
    if escapes {
        return Err(RenameError::InvalidOutputPrefix(prefix.to_string()));
    }
    Ok(())
}

/// A configured batch renamer.
#[derive(Debug, Clone)]
pub struct Renamer {
    tables: InstrumentTables,
    label: String,
    output_prefix: String,
    pack_prefix: Option<String>,
}

impl Default for Renamer {
    fn default() -> Self {
        Renamer {
            tables: InstrumentTables::standard(),
            label: DEFAULT_LABEL.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            pack_prefix: None,
        }
    }
}

impl Renamer {
    pub fn new() -> Self {
        Renamer::default()
    }

    pub fn with_tables(mut self, tables: InstrumentTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Override the pack abbreviation. Validated when planning.
    pub fn with_pack_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.pack_prefix = Some(prefix.into());
        self
    }

    /// Plan and execute in one go.
    pub fn run(&self, source: impl AsRef<Path>, progress: Option<&dyn ProgressSink>) -> Result<()> {
        let plan = self.plan(source)?;
        self.execute(&plan, progress)
    }

    /// Read the source tree and compute every output name.
    pub fn plan(&self, source: impl AsRef<Path>) -> Result<RenamePlan> {
        let source = source.as_ref();
        validate_output_prefix(&self.output_prefix)?;
        if !source.exists() {
            return Err(RenameError::PathNotFound(source.to_path_buf()));
        }
        if !source.is_dir() {
            return Err(RenameError::NotADirectory(source.to_path_buf()));
        }
        let source_dir = fs::canonicalize(source).map_err(|e| RenameError::io(source, e))?;

        let parent_dir = source_dir.parent().unwrap_or(&source_dir).to_path_buf();
        let pack_abbrev = self.pack_abbrev(&parent_dir)?;

        let source_name = file_name_lossy(&source_dir);
        let destination_dir = parent_dir.join(format!("{}{}", self.output_prefix, source_name));
        if destination_dir == source_dir {
            return Err(RenameError::InvalidOutputPrefix(self.output_prefix.clone()));
        }

        let mut collector = FeedbackCollector::new();
        let mut folders = Vec::new();
        for folder in composition_folders(&source_dir)? {
            let dest = destination_dir.join(file_name_lossy(&folder));
            folders.push(self.plan_folder(&folder, dest, &pack_abbrev, &mut collector)?);
        }

        let plan = RenamePlan {
            source_dir,
            destination_dir,
            pack_abbrev,
            folders,
            feedback: collector.into_feedback(),
        };

        info!(
            source = %plan.source_dir.display(),
            destination = %plan.destination_dir.display(),
            pack = %plan.pack_abbrev,
            folders = plan.folders.len(),
            files = plan.total_files(),
            "Planned batch"
        );

        Ok(plan)
    }

    /// Create the destination tree and copy every planned file.
    ///
    /// Existing destination files are overwritten. The first failed copy
    /// aborts the batch; files copied before it stay on disk.
    pub fn execute(&self, plan: &RenamePlan, progress: Option<&dyn ProgressSink>) -> Result<()> {
        fs::create_dir_all(&plan.destination_dir)
            .map_err(|e| RenameError::io(&plan.destination_dir, e))?;

        let total = plan.total_files();
        let mut done = 0;
        if let Some(sink) = progress {
            sink.notify(Phase::Preparing, done, total);
        }

        for folder in &plan.folders {
            fs::create_dir_all(&folder.destination)
                .map_err(|e| RenameError::io(&folder.destination, e))?;

            for copy in &folder.files {
                fs::copy(&copy.source, &copy.destination)
                    .map_err(|e| RenameError::io(&copy.source, e))?;
                debug!(
                    from = %copy.source.display(),
                    to = %copy.file_name,
                    "Copied"
                );

                done += 1;
                if let Some(sink) = progress {
                    sink.notify(Phase::Renaming, done, total);
                }
            }
        }

        info!(files = done, destination = %plan.destination_dir.display(), "Batch complete");
        Ok(())
    }

    fn pack_abbrev(&self, parent_dir: &Path) -> Result<String> {
        if let Some(raw) = &self.pack_prefix {
            if let Some(prefix) = normalize_pack_prefix(raw)? {
                return Ok(prefix);
            }
        }
        Ok(pack_abbrev_from_name(&file_name_lossy(parent_dir)))
    }

    fn plan_folder(
        &self,
        folder: &Path,
        destination: PathBuf,
        pack_abbrev: &str,
        collector: &mut FeedbackCollector,
    ) -> Result<FolderPlan> {
        let name = file_name_lossy(folder);
        let meta = parse_comp_folder(&name);
        collector.set_subject(name.as_str());

        let key = match meta.key.as_deref().filter(|k| !k.is_empty()) {
            Some(raw) => {
                if parse_key(raw).is_none() {
                    warn!(folder = %name, key = raw, "Unrecognized key, passing through");
                    collector.warning_with_suggestion(
                        format!("Unrecognized key '{}' passed through unchanged", raw),
                        "Use a key like Am, F#, Bbmaj",
                    );
                }
                Some(normalize_key(raw))
            }
            None => None,
        };

        // Pass 1: classify every file, in sorted order.
        let wavs = wav_files(folder)?;
        let classified: Vec<(PathBuf, String, InstrumentClassification)> = wavs
            .into_iter()
            .map(|path| {
                let file_name = file_name_lossy(&path);
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let phrase = instrument_phrase(&stem, &meta.comp_name);
                let classification = classify_phrase_with(&self.tables, &phrase);
                (path, file_name, classification)
            })
            .collect();

        let multi_track = multi_track_descriptor(
            &self.tables,
            classified.iter().map(|(_, _, c)| c.core.as_str()),
        );

        // Pass 2: name every file.
        let mut seen = HashSet::new();
        let mut files = Vec::with_capacity(classified.len());
        for (source, file_name, classification) in classified {
            collector.set_subject(file_name.as_str());

            if classification.fallback {
                collector.info(format!(
                    "Unmapped instrument '{}' used as-is",
                    classification.core
                ));
            }

            let tempo = match meta.bpm.clone().or_else(|| tempo_from_filename(&file_name)) {
                Some(tempo) => tempo,
                None => {
                    collector.warning_with_suggestion(
                        "No tempo found, using literal 'bpm'",
                        "Add a tempo segment to the folder name, e.g. 'Song - Am - 90BPM'",
                    );
                    UNKNOWN_TEMPO.to_string()
                }
            };

            let output = OutputName {
                label: self.label.clone(),
                pack: pack_abbrev.to_string(),
                instrument: instrument_segments(&classification, &multi_track),
                comp_name: meta.comp_name.clone(),
                tempo,
                key: key.clone(),
            };
            let new_name = output.file_name();

            if !seen.insert(new_name.clone()) {
                warn!(file = %file_name, name = %new_name, "Duplicate output name");
                collector.warning(format!(
                    "'{}' is produced by more than one file; the later copy wins",
                    new_name
                ));
            }

            debug!(
                file = %file_name,
                core = %classification.core,
                adjective = %classification.adjective,
                name = %new_name,
                "Named"
            );

            files.push(PlannedCopy {
                destination: destination.join(&new_name),
                source,
                file_name: new_name,
                classification,
            });
        }

        Ok(FolderPlan {
            name,
            meta,
            multi_track,
            destination,
            files,
        })
    }
}

/// Rename a pack with the standard vocabulary and defaults.
///
/// `pack_prefix`, when non-blank, replaces the abbreviation derived from the
/// pack folder name.
pub fn rename_pack(
    source: impl AsRef<Path>,
    progress: Option<&dyn ProgressSink>,
    pack_prefix: Option<&str>,
) -> Result<()> {
    let mut renamer = Renamer::new();
    if let Some(prefix) = pack_prefix {
        renamer = renamer.with_pack_prefix(prefix);
    }
    renamer.run(source, progress)
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immediate subdirectories, sorted by name.
fn composition_folders(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.path().is_dir() {
            folders.push(entry.into_path());
        }
    }
    Ok(folders)
}

/// `.wav` files (any case) directly inside `dir`, sorted by name.
fn wav_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let is_wav = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(OUTPUT_EXTENSION));
        if is_wav && path.is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Preparing.to_string(), "Preparing…");
        assert_eq!(Phase::Renaming.to_string(), "Renaming…");
    }

    #[test]
    fn test_pack_prefix_normalization() {
        assert_eq!(normalize_pack_prefix("demo").unwrap(), Some("DEMO".to_string()));
        assert_eq!(normalize_pack_prefix("  LoFi ").unwrap(), Some("LOFI".to_string()));
        assert_eq!(normalize_pack_prefix("   ").unwrap(), None);
        assert!(matches!(
            normalize_pack_prefix("ab"),
            Err(RenameError::InvalidPackPrefix(_))
        ));
        assert!(normalize_pack_prefix("ABCDEFGHI").is_err());
        assert!(normalize_pack_prefix("AB1").is_err());
        assert!(normalize_pack_prefix("A B C").is_err());
    }

    #[test]
    fn test_output_prefix_must_stay_sibling() {
        assert!(validate_output_prefix("_").is_ok());
        assert!(validate_output_prefix("renamed ").is_ok());
        for bad in ["", "/", "out/", "..", "..x", "a\\b"] {
            assert!(
                matches!(
                    validate_output_prefix(bad),
                    Err(RenameError::InvalidOutputPrefix(_))
                ),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_closure_is_progress_sink() {
        use std::sync::Mutex;

        let seen = Mutex::new(Vec::new());
        let sink = |phase: Phase, done: usize, total: usize| {
            seen.lock().unwrap().push((phase, done, total));
        };
        let sink_ref: &dyn ProgressSink = &sink;
        sink_ref.notify(Phase::Preparing, 0, 2);
        sink_ref.notify(Phase::Renaming, 1, 2);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Phase::Preparing, 0, 2), (Phase::Renaming, 1, 2)]
        );
    }

    #[test]
    fn test_plan_rejects_missing_path() {
        let err = Renamer::new().plan("/nonexistent/renamo/path").unwrap_err();
        assert!(err.is_path_error());
    }
}

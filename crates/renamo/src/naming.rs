//! Output filename grammar:
//!
//! ```text
//! <Label>_<Pack>_<Core1>[_<Core2>]..._<Multi|Adjective>_[[<CompNoSpaces>]]_<Tempo>[_<Key>].wav
//! ```

use serde::Serialize;

use crate::model::{InstrumentClassification, MultiTrackDescriptor};
use crate::tables::InstrumentTables;

/// Default first segment of every output name.
pub const DEFAULT_LABEL: &str = "P&J";
/// Marks a whole-mix stem.
pub const MULTI: &str = "Multi";
/// Tempo token used when neither folder nor file name has one.
pub const UNKNOWN_TEMPO: &str = "bpm";
pub const OUTPUT_EXTENSION: &str = "wav";

/// Most non-bass cores a descriptor carries.
const MAX_LEAD_CORES: usize = 2;

/// Build a folder's multi-track descriptor from its file cores, given in
/// sorted-filename order. `Full` stems are skipped; duplicates keep their
/// first position; the first bass-family core always goes last.
pub fn multi_track_descriptor<'a, I>(tables: &InstrumentTables, cores: I) -> MultiTrackDescriptor
where
    I: IntoIterator<Item = &'a str>,
{
    let mut distinct: Vec<&str> = Vec::new();
    for core in cores {
        if core == crate::model::FULL || distinct.contains(&core) {
            continue;
        }
        distinct.push(core);
    }

    let mut picked: Vec<String> = distinct
        .iter()
        .filter(|c| !tables.is_bass_family(c))
        .take(MAX_LEAD_CORES)
        .map(|c| c.to_string())
        .collect();

    if let Some(bass) = distinct.iter().find(|c| tables.is_bass_family(c)) {
        picked.push(bass.to_string());
    }

    MultiTrackDescriptor { cores: picked }
}

/// Instrument segments for one file: the descriptor plus `Multi` for a
/// whole-mix stem, else the core and its adjective.
pub fn instrument_segments(
    classification: &InstrumentClassification,
    descriptor: &MultiTrackDescriptor,
) -> Vec<String> {
    if classification.is_full() {
        let mut segments = descriptor.cores.clone();
        segments.push(MULTI.to_string());
        return segments;
    }

    let mut segments = vec![classification.core.clone()];
    if !classification.adjective.is_empty() {
        segments.push(classification.adjective.clone());
    }
    segments
}

/// All the pieces of one output file name, before joining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputName {
    pub label: String,
    pub pack: String,
    pub instrument: Vec<String>,
    pub comp_name: String,
    pub tempo: String,
    /// Already normalized; omitted from the name when absent or empty
    pub key: Option<String>,
}

impl OutputName {
    /// `[[CompNoSpaces]]`
    pub fn comp_descriptor(&self) -> String {
        format!("[[{}]]", self.comp_name.replace(' ', ""))
    }

    pub fn file_name(&self) -> String {
        let mut parts = vec![self.label.clone(), self.pack.clone()];
        parts.extend(self.instrument.iter().cloned());
        parts.push(self.comp_descriptor());
        parts.push(self.tempo.clone());
        if let Some(key) = self.key.as_ref().filter(|k| !k.is_empty()) {
            parts.push(key.clone());
        }

        let joined = parts
            .iter()
            .map(|p| p.replace(' ', "_"))
            .collect::<Vec<_>>()
            .join("_");
        format!("{}.{}", joined, OUTPUT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn descriptor(cores: &[&str]) -> Vec<String> {
        multi_track_descriptor(InstrumentTables::shared(), cores.iter().copied()).cores
    }

    #[test]
    fn test_descriptor_caps_and_puts_bass_last() {
        assert_eq!(
            descriptor(&["Guitar", "Pad", "Bass", "Lead"]),
            vec!["Guitar", "Pad", "Bass"]
        );
        assert_eq!(descriptor(&["Bass", "Pad"]), vec!["Pad", "Bass"]);
    }

    #[test]
    fn test_descriptor_skips_full_and_duplicates() {
        assert_eq!(
            descriptor(&["Full", "Pad", "Pad", "Full", "Lead"]),
            vec!["Pad", "Lead"]
        );
        assert!(descriptor(&["Full"]).is_empty());
        assert!(descriptor(&[]).is_empty());
    }

    #[test]
    fn test_descriptor_first_bass_family_core() {
        assert_eq!(
            descriptor(&["Synth Bass", "Piano", "Bass"]),
            vec!["Piano", "Synth Bass"]
        );
    }

    #[test]
    fn test_full_stem_segments() {
        let full = InstrumentClassification::full();
        let empty = MultiTrackDescriptor::default();
        assert_eq!(instrument_segments(&full, &empty), vec!["Multi"]);

        let desc = MultiTrackDescriptor {
            cores: vec!["Pad".into(), "Bass".into()],
        };
        assert_eq!(instrument_segments(&full, &desc), vec!["Pad", "Bass", "Multi"]);
    }

    #[test]
    fn test_instrument_segments_with_adjective() {
        let desc = MultiTrackDescriptor::default();
        let c = InstrumentClassification::new("Pad", "Dark Warm");
        assert_eq!(instrument_segments(&c, &desc), vec!["Pad", "Dark Warm"]);
        let c = InstrumentClassification::new("Lead", "");
        assert_eq!(instrument_segments(&c, &desc), vec!["Lead"]);
    }

    #[test]
    fn test_file_name_assembly() {
        let name = OutputName {
            label: DEFAULT_LABEL.into(),
            pack: "DEMO".into(),
            instrument: vec!["Electric_Piano".into()],
            comp_name: "Sunset Groove".into(),
            tempo: "92bpm".into(),
            key: Some("G#min".into()),
        };
        assert_eq!(
            name.file_name(),
            "P&J_DEMO_Electric_Piano_[[SunsetGroove]]_92bpm_G#min.wav"
        );
    }

    #[test]
    fn test_file_name_spaces_become_underscores() {
        let name = OutputName {
            label: DEFAULT_LABEL.into(),
            pack: "LofiKeys".into(),
            instrument: vec!["Upright Bass".into(), "Dark Warm".into()],
            comp_name: "Night Walk".into(),
            tempo: UNKNOWN_TEMPO.into(),
            key: None,
        };
        assert_eq!(
            name.file_name(),
            "P&J_LofiKeys_Upright_Bass_Dark_Warm_[[NightWalk]]_bpm.wav"
        );
    }

    #[test]
    fn test_empty_key_omitted() {
        let name = OutputName {
            label: DEFAULT_LABEL.into(),
            pack: "X".into(),
            instrument: vec!["Multi".into()],
            comp_name: "A".into(),
            tempo: "90bpm".into(),
            key: Some(String::new()),
        };
        assert_eq!(name.file_name(), "P&J_X_Multi_[[A]]_90bpm.wav");
    }
}

//! File stem and pack folder conventions.

use winnow::ascii::{multispace0, Caseless};
use winnow::combinator::alt;
use winnow::prelude::*;

use super::{collapse_whitespace, find_tempo_marker, split_dash_once, strip_leading_dash, PResult};
use crate::model::FULL;

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

/// Isolate the instrument phrase of a file stem.
///
/// When the stem starts with the composition name, the phrase is what
/// follows it (minus a leading dash). Otherwise it is whatever follows the
/// first dash. An empty result means a whole-mix stem: [`FULL`].
pub fn instrument_phrase(stem: &str, comp_name: &str) -> String {
    let raw = match strip_prefix_ignore_case(stem, comp_name) {
        Some(remainder) => strip_leading_dash(remainder),
        None => split_dash_once(stem).map(|(_, after)| after).unwrap_or(""),
    };

    let phrase = collapse_whitespace(raw);
    if phrase.is_empty() {
        FULL.to_string()
    } else {
        phrase
    }
}

/// Tempo embedded in a file name (`... 92 BPM.wav` -> `92bpm`).
pub fn tempo_from_filename(file_name: &str) -> Option<String> {
    find_tempo_marker(file_name).map(|value| format!("{}bpm", value))
}

/// The label's own name, which pack folders often repeat
fn label_phrase(input: &mut &str) -> PResult<()> {
    (
        Caseless("pelham"),
        multispace0,
        alt(("&", Caseless("and"))),
        multispace0,
        Caseless("junior"),
        multispace0,
    )
        .void()
        .parse_next(input)
}

/// Derive the pack abbreviation from the pack folder name: the part after
/// the first dash, without a leading label phrase, with spaces removed.
pub fn pack_abbrev_from_name(name: &str) -> String {
    let pack_raw = split_dash_once(name)
        .map(|(_, after)| after)
        .unwrap_or(name);

    let mut input = pack_raw;
    let without_label = match label_phrase(&mut input) {
        Ok(()) => input,
        Err(_) => pack_raw,
    };

    without_label.trim().replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_after_comp_prefix() {
        assert_eq!(instrument_phrase("Sunset Groove - Rhodes", "Sunset Groove"), "Rhodes");
        assert_eq!(instrument_phrase("sunset groove -Soft  Pad", "Sunset Groove"), "Soft Pad");
        assert_eq!(instrument_phrase("Sunset Groove Bass", "Sunset Groove"), "Bass");
    }

    #[test]
    fn test_phrase_after_first_dash() {
        assert_eq!(
            instrument_phrase("PJ Vol2 Midnight Drive - Lead - Wet", "Midnight Drive"),
            "Lead - Wet"
        );
        assert_eq!(instrument_phrase("Other Name - Guitar", "Sunset Groove"), "Guitar");
    }

    #[test]
    fn test_phrase_full_when_nothing_remains() {
        assert_eq!(instrument_phrase("Sunset Groove", "Sunset Groove"), "Full");
        assert_eq!(instrument_phrase("Sunset Groove - ", "Sunset Groove"), "Full");
        assert_eq!(instrument_phrase("Bounce", "Sunset Groove"), "Full");
    }

    #[test]
    fn test_tempo_from_filename() {
        assert_eq!(tempo_from_filename("Song - Bass 92 BPM.wav"), Some("92bpm".to_string()));
        assert_eq!(tempo_from_filename("Song - Pad 87.5bpm.WAV"), Some("87.5bpm".to_string()));
        assert_eq!(tempo_from_filename("Song 2 - Pad.wav"), None);
    }

    #[test]
    fn test_pack_abbrev() {
        assert_eq!(pack_abbrev_from_name("2024 - Pelham & Junior Lofi Keys"), "LofiKeys");
        assert_eq!(pack_abbrev_from_name("FL - pelham and junior Neo Soul"), "NeoSoul");
        assert_eq!(pack_abbrev_from_name("FL-Chill Hop"), "ChillHop");
        assert_eq!(pack_abbrev_from_name("Cloud Pack"), "CloudPack");
        assert_eq!(pack_abbrev_from_name("FL - Pelham Juniors"), "PelhamJuniors");
        assert_eq!(pack_abbrev_from_name(""), "");
    }
}

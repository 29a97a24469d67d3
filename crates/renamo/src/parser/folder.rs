//! Composition folder names: `<RawComp> [- <Key>] [- <TempoText>]`.

use super::{find_decimal, split_dash};
use crate::model::CompositionMeta;

/// Parse a composition folder name into (composition, key, tempo).
///
/// Never fails. A name without dashes is all composition.
pub fn parse_comp_folder(folder_name: &str) -> CompositionMeta {
    let parts = split_dash(folder_name);

    let raw_comp = parts.first().map(|p| p.trim()).unwrap_or_default();
    let key = parts.get(1).map(|k| k.trim().to_string());
    // a blank tempo segment counts as no tempo
    let bpm = parts
        .get(2)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(parse_tempo);

    CompositionMeta {
        comp_name: comp_name(raw_comp),
        key,
        bpm,
    }
}

/// The first two words of a three-or-more word composition are pack and
/// variant words; the composition name is what follows them.
fn comp_name(raw_comp: &str) -> String {
    let tokens: Vec<&str> = raw_comp.split_whitespace().collect();
    if tokens.len() < 3 {
        return raw_comp.to_string();
    }

    let name = tokens[2..].join(" ");
    if name.is_empty() {
        raw_comp.to_string()
    } else {
        name
    }
}

fn parse_tempo(raw: &str) -> String {
    match find_decimal(raw) {
        Some(value) => format!("{}bpm", value),
        None => raw.replace("BPM", "bpm").replace("Bpm", "bpm"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_folder_name() {
        let meta = parse_comp_folder("Sunset Groove - Abm - 92BPM");
        assert_eq!(meta.comp_name, "Sunset Groove");
        assert_eq!(meta.key.as_deref(), Some("Abm"));
        assert_eq!(meta.bpm.as_deref(), Some("92bpm"));
    }

    #[test]
    fn test_pack_and_variant_words_dropped() {
        let meta = parse_comp_folder("PJ Vol2 Midnight Drive - C#m - 120 BPM");
        assert_eq!(meta.comp_name, "Midnight Drive");
        assert_eq!(meta.bpm.as_deref(), Some("120bpm"));
    }

    #[test]
    fn test_dash_spacing_tolerated() {
        let meta = parse_comp_folder("Sunset Groove-Abm -92BPM");
        assert_eq!(meta.comp_name, "Sunset Groove");
        assert_eq!(meta.key.as_deref(), Some("Abm"));
        assert_eq!(meta.bpm.as_deref(), Some("92bpm"));
    }

    #[test]
    fn test_fractional_tempo() {
        let meta = parse_comp_folder("Song - Am - 87.5 bpm");
        assert_eq!(meta.bpm.as_deref(), Some("87.5bpm"));
    }

    #[test]
    fn test_tempo_without_numeral() {
        let meta = parse_comp_folder("Song - Am - Free BPM");
        assert_eq!(meta.bpm.as_deref(), Some("Free bpm"));

        let meta = parse_comp_folder("Song - Am - Slow Bpm");
        assert_eq!(meta.bpm.as_deref(), Some("Slow bpm"));
    }

    #[test]
    fn test_blank_tempo_segment_is_absent() {
        let meta = parse_comp_folder("Song - Am - ");
        assert_eq!(meta.key.as_deref(), Some("Am"));
        assert_eq!(meta.bpm, None);
    }

    #[test]
    fn test_key_only() {
        let meta = parse_comp_folder("Song - Dmin");
        assert_eq!(meta.comp_name, "Song");
        assert_eq!(meta.key.as_deref(), Some("Dmin"));
        assert_eq!(meta.bpm, None);
    }

    #[test]
    fn test_bare_name() {
        let meta = parse_comp_folder("  Lonely Song  ");
        assert_eq!(meta.comp_name, "Lonely Song");
        assert_eq!(meta.key, None);
        assert_eq!(meta.bpm, None);
    }

    #[test]
    fn test_empty_name() {
        let meta = parse_comp_folder("");
        assert_eq!(meta.comp_name, "");
        assert_eq!(meta.key, None);
    }
}

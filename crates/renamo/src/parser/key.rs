//! Musical key normalization.
//!
//! Grammar: `[A-Ga-g] [#bB]? (ws* (maj|MAJ|Maj|min|MIN|m))?`
//!
//! Flats are respelled as sharps so every key has one canonical spelling,
//! and a missing quality means major.

use winnow::ascii::multispace0;
use winnow::combinator::{alt, opt, preceded};
use winnow::prelude::*;
use winnow::token::one_of;

use super::PResult;
use crate::model::{NormalizedKey, NoteName, Quality};

/// Flat root -> enharmonic sharp root (the result always carries `#`).
const FLAT_TO_SHARP: &[(NoteName, NoteName)] = &[
    (NoteName::A, NoteName::G),
    (NoteName::B, NoteName::A),
    (NoteName::D, NoteName::C),
    (NoteName::E, NoteName::D),
    (NoteName::G, NoteName::F),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accidental {
    Sharp,
    Flat,
}

fn root(input: &mut &str) -> PResult<NoteName> {
    let c = one_of(|c: char| matches!(c, 'A'..='G' | 'a'..='g')).parse_next(input)?;
    // one_of already restricted the letter
    Ok(NoteName::from_char(c).unwrap_or(NoteName::C))
}

fn accidental(input: &mut &str) -> PResult<Accidental> {
    alt((
        '#'.value(Accidental::Sharp),
        one_of(['b', 'B']).value(Accidental::Flat),
    ))
    .parse_next(input)
}

fn quality(input: &mut &str) -> PResult<Quality> {
    alt((
        alt(("maj", "MAJ", "Maj")).value(Quality::Major),
        alt(("min", "MIN", "m")).value(Quality::Minor),
    ))
    .parse_next(input)
}

fn key_spelling(input: &mut &str) -> PResult<NormalizedKey> {
    let root = root.parse_next(input)?;
    let accidental = opt(accidental).parse_next(input)?;
    let quality = opt(preceded(multispace0, quality))
        .parse_next(input)?
        .unwrap_or(Quality::Major);

    let (root, sharp) = match accidental {
        Some(Accidental::Sharp) => (root, true),
        Some(Accidental::Flat) => FLAT_TO_SHARP
            .iter()
            .find(|(flat, _)| *flat == root)
            .map(|(_, sharp)| (*sharp, true))
            // no table entry (Cb, Fb): drop to natural
            .unwrap_or((root, false)),
        None => (root, false),
    };

    Ok(NormalizedKey {
        root,
        sharp,
        quality,
    })
}

/// Parse a raw key token. `None` when it does not fit the key grammar.
pub fn parse_key(raw: &str) -> Option<NormalizedKey> {
    let mut input = raw.trim();
    let key = key_spelling.parse_next(&mut input).ok()?;
    input.is_empty().then_some(key)
}

/// Normalize a raw key to `<Root>[#]<maj|min>`.
///
/// Input outside the key grammar is returned trimmed but otherwise
/// unchanged, so the function is idempotent on every input.
pub fn normalize_key(raw: &str) -> String {
    match parse_key(raw) {
        Some(key) => key.to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_minor_to_sharp() {
        assert_eq!(normalize_key("Abm"), "G#min");
    }

    #[test]
    fn test_bare_root_defaults_major() {
        assert_eq!(normalize_key("B"), "Bmaj");
        assert_eq!(normalize_key("Ab"), "G#maj");
    }

    #[test]
    fn test_explicit_qualities() {
        assert_eq!(normalize_key("Dmin"), "Dmin");
        assert_eq!(normalize_key("C#m"), "C#min");
        assert_eq!(normalize_key("Bmaj"), "Bmaj");
        assert_eq!(normalize_key("F MAJ"), "Fmaj");
        assert_eq!(normalize_key("e MIN"), "Emin");
    }

    #[test]
    fn test_flat_table() {
        assert_eq!(normalize_key("Bb"), "A#maj");
        assert_eq!(normalize_key("Dbm"), "C#min");
        assert_eq!(normalize_key("Ebmin"), "D#min");
        assert_eq!(normalize_key("GBm"), "F#min");
    }

    #[test]
    fn test_unknown_flat_drops_to_natural() {
        assert_eq!(normalize_key("Cb"), "Cmaj");
        assert_eq!(normalize_key("Fbm"), "Fmin");
    }

    #[test]
    fn test_lowercase_root() {
        assert_eq!(normalize_key("g"), "Gmaj");
        assert_eq!(normalize_key("bbm"), "A#min");
    }

    #[test]
    fn test_unparseable_passes_through() {
        assert_eq!(normalize_key("H"), "H");
        assert_eq!(normalize_key("A dorian"), "A dorian");
        assert_eq!(normalize_key("Amajor"), "Amajor");
        assert_eq!(normalize_key("  weird  "), "weird");
        assert_eq!(normalize_key(""), "");
        assert!(parse_key("Zm").is_none());
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "Abm", "B", "Dmin", "Ab", "C#m", "Cb", "F MAJ", "bbm", "H", "A dorian", "", "  x ",
        ] {
            let once = normalize_key(raw);
            assert_eq!(normalize_key(&once), once, "not idempotent for {:?}", raw);
        }
    }
}

//! Name grammars for sample packs, built on winnow.
//!
//! Each grammar lives in its own module and is testable on its own:
//! keys, composition folders, instrument phrases and file stems. The
//! helpers here are the shared lexical pieces: the dash separator,
//! whitespace handling, title-casing and decimal numerals.
//!
//! All parsers are lenient. None of them fail on odd input; they degrade
//! to a pass-through or a default value.

mod folder;
mod key;
mod phrase;
mod stem;

pub use folder::parse_comp_folder;
pub use key::{normalize_key, parse_key};
pub use phrase::{classify_phrase, classify_phrase_with};
pub use stem::{instrument_phrase, pack_abbrev_from_name, tempo_from_filename};

use winnow::ascii::{digit1, multispace0, Caseless};
use winnow::combinator::opt;
use winnow::prelude::*;

type PResult<T> = winnow::ModalResult<T>;

/// Split on every dash, dropping whitespace around each dash
/// (`-`, ` -`, `- ` and ` - ` all separate).
pub fn split_dash(s: &str) -> Vec<&str> {
    let pieces: Vec<&str> = s.split('-').collect();
    let last = pieces.len() - 1;
    pieces
        .iter()
        .enumerate()
        .map(|(i, piece)| {
            let piece = if i > 0 { piece.trim_start() } else { piece };
            if i < last {
                piece.trim_end()
            } else {
                piece
            }
        })
        .collect()
}

/// Split at the first dash separator only.
pub fn split_dash_once(s: &str) -> Option<(&str, &str)> {
    s.split_once('-')
        .map(|(before, after)| (before.trim_end(), after.trim_start()))
}

/// Remove one leading dash separator (with its surrounding whitespace).
/// Input without a leading dash is returned unchanged.
pub fn strip_leading_dash(s: &str) -> &str {
    match s.trim_start().strip_prefix('-') {
        Some(rest) => rest.trim_start(),
        None => s,
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-case: the first letter of every alphabetic run is upper-cased,
/// the rest lower-cased. `"92bpm dark"` becomes `"92Bpm Dark"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A decimal numeral: digits with an optional fractional part.
fn decimal<'a>(input: &mut &'a str) -> PResult<&'a str> {
    let start = *input;
    digit1.parse_next(input)?;
    opt(('.', digit1)).parse_next(input)?;
    Ok(&start[..start.len() - input.len()])
}

/// A decimal numeral followed by `BPM` in any case.
fn tempo_marker<'a>(input: &mut &'a str) -> PResult<&'a str> {
    let value = decimal.parse_next(input)?;
    multispace0.parse_next(input)?;
    Caseless("bpm").parse_next(input)?;
    Ok(value)
}

/// Leftmost match of `parser` starting at any digit in `s`.
fn find_first<'a>(s: &'a str, parser: fn(&mut &'a str) -> PResult<&'a str>) -> Option<&'a str> {
    s.char_indices()
        .filter(|(_, c)| c.is_ascii_digit())
        .find_map(|(i, _)| {
            let mut input = &s[i..];
            parser(&mut input).ok()
        })
}

/// First decimal numeral anywhere in `s`.
pub fn find_decimal(s: &str) -> Option<&str> {
    find_first(s, decimal)
}

/// First `<decimal>BPM` (case-insensitive, optional whitespace) in `s`.
pub fn find_tempo_marker(s: &str) -> Option<&str> {
    find_first(s, tempo_marker)
}

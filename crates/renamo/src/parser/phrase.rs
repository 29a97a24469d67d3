//! Instrument phrase classification: raw phrase -> (core, adjective).
//!
//! 1. Electric piano keywords short-circuit everything else; the words
//!    before the keyword become the adjective.
//! 2. Otherwise every token is canonicalized. Among tokens that land in the
//!    core set, the lowest priority wins, ties going to the rightmost.
//! 3. The winner may be specialized by keywords in the remaining words
//!    (`Upright Bass`, `Acoustic Guitar`, ...).

use winnow::ascii::{multispace0, multispace1, Caseless};
use winnow::combinator::{alt, not, opt};
use winnow::prelude::*;
use winnow::token::one_of;

use super::{collapse_whitespace, is_word_char, title_case, PResult};
use crate::model::InstrumentClassification;
use crate::tables::{InstrumentTables, ELECTRIC_PIANO};

fn word_end(input: &mut &str) -> PResult<()> {
    not(one_of(is_word_char)).parse_next(input)
}

/// `rhodes`, `e piano` / `e. piano` / `epiano`, or `electric piano`,
/// each ending at a word boundary.
fn electric_piano_keyword(input: &mut &str) -> PResult<()> {
    alt((
        (Caseless("rhodes"), word_end).void(),
        (
            Caseless("e"),
            opt('.'),
            multispace0,
            Caseless("piano"),
            word_end,
        )
            .void(),
        (Caseless("electric"), multispace1, Caseless("piano"), word_end).void(),
    ))
    .parse_next(input)
}

/// Byte offset of the leftmost electric piano keyword, if any.
fn find_electric_piano(s: &str) -> Option<usize> {
    // a lone "EP" is the only form the short token is trusted in
    if s.eq_ignore_ascii_case("ep") {
        return Some(0);
    }

    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        let at_word_start = is_word_char(c) && !prev.is_some_and(is_word_char);
        prev = Some(c);
        if !at_word_start {
            continue;
        }
        let mut input = &s[i..];
        if electric_piano_keyword(&mut input).is_ok() {
            return Some(i);
        }
    }
    None
}

/// Classify with the standard tables.
pub fn classify_phrase(phrase: &str) -> InstrumentClassification {
    classify_phrase_with(InstrumentTables::shared(), phrase)
}

pub fn classify_phrase_with(tables: &InstrumentTables, phrase: &str) -> InstrumentClassification {
    let s = collapse_whitespace(phrase);

    if let Some(start) = find_electric_piano(&s) {
        let before = s[..start].trim();
        return InstrumentClassification::new(ELECTRIC_PIANO, title_case(before));
    }

    let tokens: Vec<&str> = s.split(' ').filter(|t| !t.is_empty()).collect();
    match tokens.len() {
        0 => return InstrumentClassification::full(),
        1 => return InstrumentClassification::from_canonical(tables.canonicalize(tokens[0])),
        _ => {}
    }

    let mut winner: Option<(usize, String, u8)> = None;
    for (i, token) in tokens.iter().enumerate() {
        let canonical = tables.canonicalize(token);
        if !tables.is_core(canonical.as_str()) {
            continue;
        }
        let priority = tables.priority(canonical.as_str());
        // <= so equal priorities move the winner right
        if winner.as_ref().map_or(true, |(_, _, best)| priority <= *best) {
            winner = Some((i, canonical.into_string(), priority));
        }
    }

    let Some((index, core, _)) = winner else {
        return InstrumentClassification::from_canonical(tables.canonicalize(&s));
    };

    let rest: Vec<&str> = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, t)| *t)
        .collect();
    let (core, rest) = tables.specialize(&core, rest);

    InstrumentClassification::new(core, title_case(&rest.join(" ")))
}

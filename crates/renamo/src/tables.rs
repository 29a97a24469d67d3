//! Instrument vocabulary: canonical aliases, the core set, core priorities
//! and sub-variant specializations.
//!
//! Tables are built once and never mutated while a batch runs. Extra aliases
//! (e.g. from configuration) are added through [`InstrumentTables::with_alias`]
//! before the tables are handed to the classifier.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::model::Canonical;
use crate::parser::title_case;

pub const BASS: &str = "Bass";
pub const GUITAR: &str = "Guitar";
pub const ELECTRIC_PIANO: &str = "Electric_Piano";

/// Priority of every core without an explicit entry. Lower wins.
pub const DEFAULT_PRIORITY: u8 = 2;

const STANDARD_CORES: &[&str] = &[
    "Bass",
    "Electric_Piano",
    "Guitar",
    "Lead",
    "Strings",
    "Choir",
    "Clavi",
    "Piano",
    "Organ",
    "Pad",
    "Pluck",
    "Arp",
    "Brass",
    "Synth",
    "Vibraphone",
    "Full",
    "Flute",
    "Bell",
    "Glockenspiel",
    "Horns",
];

const STANDARD_ALIASES: &[(&str, &str)] = &[
    // Bass family
    ("Bassline", "Bass"),
    ("Bass Line", "Bass"),
    ("Electric Bass", "Bass"),
    ("Upright Bass", "Bass"),
    ("Sub Bass", "Bass"),
    ("Bass", "Bass"),
    // Electric piano family
    ("Rhodes", "Electric_Piano"),
    ("E. Piano", "Electric_Piano"),
    ("EP", "Electric_Piano"),
    ("Electric Piano", "Electric_Piano"),
    ("Rhodes Piano", "Electric_Piano"),
    // Straight cores
    ("Piano", "Piano"),
    ("Grand Piano", "Piano"),
    ("Guitar", "Guitar"),
    ("Electric Guitar", "Guitar"),
    ("Acoustic Guitar", "Guitar"),
    ("Lead", "Lead"),
    ("Strings", "Strings"),
    ("String", "Strings"),
    ("Choir", "Choir"),
    ("Clavi", "Clavi"),
    ("Organ", "Organ"),
    ("Pad", "Pad"),
    ("Pluck", "Pluck"),
    ("Arp", "Arp"),
    ("Brass", "Brass"),
    ("Synth", "Synth"),
    ("Vibraphone", "Vibraphone"),
    ("Vibes", "Vibraphone"),
    ("Flute", "Flute"),
    ("Bell", "Bell"),
    ("Horn", "Horns"),
    ("Horns", "Horns"),
    ("Glock", "Glockenspiel"),
    ("Glockenspiel", "Glockenspiel"),
    ("Full", "Full"),
];

/// A keyword group that turns a base core into a more specific one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specialization {
    /// Lowercase words; any one triggers the rule and all are consumed.
    pub keywords: Vec<String>,
    pub core: String,
}

impl Specialization {
    fn new(keywords: &[&str], core: &str) -> Self {
        Specialization {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            core: core.to_string(),
        }
    }

    fn matches(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.keywords.iter().any(|k| *k == lower)
    }
}

#[derive(Debug, Clone)]
pub struct InstrumentTables {
    /// Lowercased alias -> canonical core
    aliases: HashMap<String, String>,
    cores: HashSet<String>,
    priorities: HashMap<String, u8>,
    /// Base core -> rules, checked in order
    specializations: HashMap<String, Vec<Specialization>>,
}

impl InstrumentTables {
    /// The built-in vocabulary.
    pub fn standard() -> Self {
        let aliases = STANDARD_ALIASES
            .iter()
            .map(|(alias, core)| (alias.to_lowercase(), core.to_string()))
            .collect();
        let cores = STANDARD_CORES.iter().map(|c| c.to_string()).collect();

        let mut priorities = HashMap::new();
        priorities.insert(BASS.to_string(), 0);
        priorities.insert(GUITAR.to_string(), 1);

        let mut specializations = HashMap::new();
        specializations.insert(
            BASS.to_string(),
            vec![
                Specialization::new(&["synth"], "Synth Bass"),
                Specialization::new(&["upright"], "Upright Bass"),
                Specialization::new(&["electric", "guitar"], "Electric Bass"),
            ],
        );
        specializations.insert(
            GUITAR.to_string(),
            vec![
                Specialization::new(&["acoustic", "nylon"], "Acoustic Guitar"),
                Specialization::new(&["electric"], "Electric Guitar"),
            ],
        );

        InstrumentTables {
            aliases,
            cores,
            priorities,
            specializations,
        }
    }

    /// Process-wide standard tables.
    pub fn shared() -> &'static InstrumentTables {
        static STANDARD: OnceLock<InstrumentTables> = OnceLock::new();
        STANDARD.get_or_init(InstrumentTables::standard)
    }

    /// Add an alias. The target core joins the core set.
    pub fn with_alias(mut self, alias: &str, core: &str) -> Self {
        let alias = alias.split_whitespace().collect::<Vec<_>>().join(" ");
        if alias.is_empty() || core.trim().is_empty() {
            return self;
        }
        let core = core.trim().to_string();
        self.cores.insert(core.clone());
        self.aliases.insert(alias.to_lowercase(), core);
        self
    }

    /// Case-insensitive table lookup, falling back to the title-cased input.
    pub fn canonicalize(&self, token: &str) -> Canonical {
        match self.aliases.get(&token.to_lowercase()) {
            Some(core) => Canonical::Classified(core.clone()),
            None => Canonical::Fallback(title_case(token)),
        }
    }

    pub fn is_core(&self, name: &str) -> bool {
        self.cores.contains(name)
    }

    pub fn priority(&self, core: &str) -> u8 {
        self.priorities
            .get(core)
            .copied()
            .unwrap_or(DEFAULT_PRIORITY)
    }

    /// Apply the first matching specialization rule for `core`.
    ///
    /// Returns the (possibly unchanged) core and the words left over after
    /// removing the matched rule's keywords.
    pub fn specialize<'a>(&self, core: &str, words: Vec<&'a str>) -> (String, Vec<&'a str>) {
        let Some(rules) = self.specializations.get(core) else {
            return (core.to_string(), words);
        };

        for rule in rules {
            if words.iter().any(|w| rule.matches(w)) {
                let remaining = words.into_iter().filter(|w| !rule.matches(w)).collect();
                return (rule.core.clone(), remaining);
            }
        }

        (core.to_string(), words)
    }

    /// Bass, or any core a bass specialization produces.
    pub fn is_bass_family(&self, core: &str) -> bool {
        core == BASS
            || self
                .specializations
                .get(BASS)
                .is_some_and(|rules| rules.iter().any(|r| r.core == core))
    }
}

impl Default for InstrumentTables {
    fn default() -> Self {
        InstrumentTables::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_target_is_a_core() {
        let tables = InstrumentTables::standard();
        for (_, core) in STANDARD_ALIASES {
            assert!(tables.is_core(core), "{} missing from core set", core);
        }
    }

    #[test]
    fn test_canonicalize_case_insensitive() {
        let tables = InstrumentTables::standard();
        assert_eq!(
            tables.canonicalize("vibes"),
            Canonical::Classified("Vibraphone".into())
        );
        assert_eq!(
            tables.canonicalize("BASS LINE"),
            Canonical::Classified("Bass".into())
        );
        assert_eq!(tables.canonicalize("ep"), Canonical::Classified("Electric_Piano".into()));
    }

    #[test]
    fn test_canonicalize_fallback_title_cases() {
        let tables = InstrumentTables::standard();
        assert_eq!(
            tables.canonicalize("kalimba"),
            Canonical::Fallback("Kalimba".into())
        );
    }

    #[test]
    fn test_priorities() {
        let tables = InstrumentTables::standard();
        assert_eq!(tables.priority("Bass"), 0);
        assert_eq!(tables.priority("Guitar"), 1);
        assert_eq!(tables.priority("Pad"), DEFAULT_PRIORITY);
    }

    #[test]
    fn test_specialize_consumes_keyword_group() {
        let tables = InstrumentTables::standard();
        let (core, rest) = tables.specialize("Bass", vec!["Dark", "Electric", "Guitar"]);
        assert_eq!(core, "Electric Bass");
        assert_eq!(rest, vec!["Dark"]);

        let (core, rest) = tables.specialize("Guitar", vec!["Nylon", "Soft"]);
        assert_eq!(core, "Acoustic Guitar");
        assert_eq!(rest, vec!["Soft"]);

        let (core, rest) = tables.specialize("Pad", vec!["Synth"]);
        assert_eq!(core, "Pad");
        assert_eq!(rest, vec!["Synth"]);
    }

    #[test]
    fn test_specialize_rule_order() {
        let tables = InstrumentTables::standard();
        let (core, rest) = tables.specialize("Bass", vec!["Upright", "Synth"]);
        assert_eq!(core, "Synth Bass");
        assert_eq!(rest, vec!["Upright"]);
    }

    #[test]
    fn test_bass_family() {
        let tables = InstrumentTables::standard();
        assert!(tables.is_bass_family("Bass"));
        assert!(tables.is_bass_family("Upright Bass"));
        assert!(!tables.is_bass_family("Electric Guitar"));
    }

    #[test]
    fn test_with_alias_extends_core_set() {
        let tables = InstrumentTables::standard().with_alias("Wurli", "Wurlitzer");
        assert!(tables.is_core("Wurlitzer"));
        assert_eq!(
            tables.canonicalize("WURLI"),
            Canonical::Classified("Wurlitzer".into())
        );
    }
}

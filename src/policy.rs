use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Input acceptance rule for a round. The three rules are mutually exclusive.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Policy {
    /// Every character is stored; wrong ones are only coloured
    Lenient,
    /// Wrong characters are dropped and counted as mistakes
    #[default]
    Counted,
    /// Wrong characters are dropped silently; composed input is vetoed
    Strict,
}

impl Policy {
    pub fn counts_mistakes(self) -> bool {
        matches!(self, Policy::Counted)
    }

    pub fn accepts_composed(self) -> bool {
        !matches!(self, Policy::Strict)
    }

    pub fn stores_wrong_chars(self) -> bool {
        matches!(self, Policy::Lenient)
    }

    pub fn cycled(self) -> Self {
        match self {
            Policy::Lenient => Policy::Counted,
            Policy::Counted => Policy::Strict,
            Policy::Strict => Policy::Lenient,
        }
    }
}

/// One delivery from the keyboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    /// Several characters committed at once (bracketed paste, IME commit)
    Composed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// What a keystroke did to the input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub accepted: u32,
    pub rejected: u32,
    pub vetoed: bool,
}

/// True once the input spells the whole word.
pub fn is_complete(word: &str, input: &str) -> bool {
    input == word
}

/// Applies a single character to `input` under `policy`.
pub fn write_char(policy: Policy, word: &str, input: &mut String, c: char) -> Verdict {
    if policy.stores_wrong_chars() {
        input.push(c);
        return Verdict::Accepted;
    }

    let idx = input.chars().count();
    match word.chars().nth(idx) {
        Some(expected) if expected == c => {
            input.push(c);
            Verdict::Accepted
        }
        _ => Verdict::Rejected,
    }
}

/// Applies a keystroke, stopping as soon as the word is complete.
pub fn apply_keystroke(policy: Policy, word: &str, input: &mut String, key: &Keystroke) -> Tally {
    let mut tally = Tally::default();

    match key {
        Keystroke::Char(c) => record(&mut tally, write_char(policy, word, input, *c)),
        Keystroke::Composed(_) if !policy.accepts_composed() => tally.vetoed = true,
        Keystroke::Composed(text) => {
            for c in text.chars() {
                if is_complete(word, input) {
                    break;
                }
                record(&mut tally, write_char(policy, word, input, c));
            }
        }
    }

    tally
}

fn record(tally: &mut Tally, verdict: Verdict) {
    match verdict {
        Verdict::Accepted => tally.accepted += 1,
        Verdict::Rejected => tally.rejected += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_stores_wrong_char() {
        let mut input = String::new();
        assert_eq!(write_char(Policy::Lenient, "def", &mut input, 'x'), Verdict::Accepted);
        assert_eq!(input, "x");
    }

    #[test]
    fn test_counted_rejects_wrong_char() {
        let mut input = String::new();
        assert_eq!(write_char(Policy::Counted, "def", &mut input, 'x'), Verdict::Rejected);
        assert_eq!(input, "");
        assert_eq!(write_char(Policy::Counted, "def", &mut input, 'd'), Verdict::Accepted);
        assert_eq!(input, "d");
    }

    #[test]
    fn test_strict_rejects_past_end_of_word() {
        let mut input = String::from("def");
        assert_eq!(write_char(Policy::Strict, "def", &mut input, 'f'), Verdict::Rejected);
        assert_eq!(input, "def");
    }

    #[test]
    fn test_strict_vetoes_composed() {
        let mut input = String::new();
        let tally = apply_keystroke(Policy::Strict, "def", &mut input, &Keystroke::Composed("def".into()));
        assert!(tally.vetoed);
        assert_eq!(tally.accepted, 0);
        assert_eq!(input, "");
    }

    #[test]
    fn test_counted_composed_counts_each_wrong_char() {
        let mut input = String::new();
        let tally = apply_keystroke(Policy::Counted, "def", &mut input, &Keystroke::Composed("dxyef".into()));
        assert_eq!(tally, Tally { accepted: 3, rejected: 2, vetoed: false });
        assert_eq!(input, "def");
    }

    #[test]
    fn test_composed_stops_at_completion() {
        let mut input = String::new();
        let tally = apply_keystroke(Policy::Lenient, "len", &mut input, &Keystroke::Composed("lenient".into()));
        assert_eq!(tally.accepted, 3);
        assert_eq!(input, "len");
    }

    #[test]
    fn test_multibyte_prefix() {
        let mut input = String::new();
        for c in "naïve".chars() {
            assert_eq!(write_char(Policy::Strict, "naïve", &mut input, c), Verdict::Accepted);
        }
        assert!(is_complete("naïve", &input));
    }

    #[test]
    fn test_policy_flags() {
        assert!(Policy::Counted.counts_mistakes());
        assert!(!Policy::Strict.counts_mistakes());
        assert!(!Policy::Lenient.counts_mistakes());
        assert!(!Policy::Strict.accepts_composed());
        assert_eq!(Policy::Strict.cycled(), Policy::Lenient);
        assert_eq!(Policy::default(), Policy::Counted);
    }
}

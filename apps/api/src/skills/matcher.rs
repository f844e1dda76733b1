//! Whole-word skill matching.
//!
//! Each vocabulary term is compiled to an escaped, case-insensitive literal
//! pattern. A hit only counts when the characters on either side of it are not
//! word characters (or it touches the start/end of the text). The check is
//! done by hand rather than with `\b`: a `\b` after "C++" would require a word
//! character to follow the final `+`.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::skills::vocabulary::Vocabulary;

/// A single vocabulary term with its compiled literal pattern.
#[derive(Debug)]
pub struct TermPattern {
    term: String,
    pattern: Regex,
}

impl TermPattern {
    pub fn new(term: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()?;
        Ok(TermPattern {
            term: term.to_string(),
            pattern,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// True when `text` holds at least one boundary-respecting occurrence.
    pub fn is_found_in(&self, text: &str) -> bool {
        let mut start = 0;
        while let Some(hit) = self.pattern.find_at(text, start) {
            if is_bounded(text, hit.start(), hit.end()) {
                return true;
            }
            // Step one character past the rejected hit; a later overlapping
            // occurrence may still be bounded.
            start = hit.start()
                + text[hit.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        false
    }
}

/// Returns the vocabulary terms present in `text`, sorted and deduplicated.
pub fn extract_skills(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    match_terms(text, vocabulary)
        .into_iter()
        .map(String::from)
        .collect()
}

/// Set form of [`extract_skills`], borrowing from the vocabulary.
pub fn match_terms<'v>(text: &str, vocabulary: &'v Vocabulary) -> BTreeSet<&'v str> {
    vocabulary
        .patterns()
        .filter(|p| p.is_found_in(text))
        .map(TermPattern::term)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

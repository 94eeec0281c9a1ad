use std::collections::HashSet;

use crate::text::stop_words::is_stop_word;

/// Token view of an already-cleaned resume. Built once per request and reused for every
/// catalogue role so the text is only split a single time.
#[derive(Debug)]
pub struct ResumeTokens<'a> {
    words: Vec<&'a str>,
    unique: HashSet<&'a str>,
}

impl<'a> ResumeTokens<'a> {
    pub fn new(cleaned: &'a str) -> Self {
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        let unique = words.iter().copied().collect();
        Self { words, unique }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True when `phrase` (space separated, already cleaned) occurs as a contiguous run
    /// of whole words.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let parts: Vec<&str> = phrase.split_whitespace().collect();
        match parts.as_slice() {
            [] => false,
            [single] => self.unique.contains(single),
            _ => {
                if !parts.iter().all(|p| self.unique.contains(p)) {
                    return false;
                }
                self.words.windows(parts.len()).any(|w| w == parts.as_slice())
            }
        }
    }
}

/// Splits cleaned text into features: tokens of two or more characters, stop words
/// dropped, then word n-grams for every `n` in `ngram_range` (inclusive).
pub fn analyze(cleaned: &str, ngram_range: (usize, usize)) -> Vec<String> {
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2 && !is_stop_word(t))
        .collect();

    let (min_n, max_n) = ngram_range;
    let mut features = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n == 1 {
            features.extend(tokens.iter().map(|t| t.to_string()));
            continue;
        }
        features.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    features
}

// Text normalization shared by the matcher, the classifier and the file parser.
// Each consumer has its own cleaning rules.

pub mod clean;
pub mod stop_words;
pub mod tokenize;

pub use clean::{clean_for_classifier, clean_for_matching, normalize_extracted};
pub use tokenize::{analyze, ResumeTokens};

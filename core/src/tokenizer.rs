use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","an","and","are","as","at","be","but","by","for","if","in","into","is","it",
            "no","not","of","on","or","such","that","the","their","then","there","these",
            "they","this","to","was","will","with"
        ];
        words.iter().copied().collect()
    };
}

/// Turns field text into index terms.
///
/// One instance is shared by every document of an index generation, so the
/// vocabulary seen at build time is the one query terms are matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer {
    stopwords: bool,
}

impl Tokenizer {
    pub fn new() -> Self { Self::default() }

    /// Drop the classic English stop set after lowercasing.
    pub fn with_english_stopwords() -> Self { Self { stopwords: true } }

    pub fn filters_stopwords(&self) -> bool { self.stopwords }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        RE.find_iter(&normalized)
            .map(|m| m.as_str())
            .filter(|t| !(self.stopwords && ENGLISH_STOPWORDS.contains(t)))
            .map(str::to_string)
            .collect()
    }
}

/// Tokenize with the default analyzer: NFKC, lowercase, split on anything that is
/// not a letter or digit.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::new().tokenize(text)
}

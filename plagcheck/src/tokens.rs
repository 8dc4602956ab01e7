use crate::error::{Result, SegmenterErr};
use serde::Deserialize;
use snafu::prelude::*;
use std::collections::HashSet;
use wordseg::Segmenter;

pub type Token = String;

/// The distinct tokens of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(HashSet<Token>);

impl TokenSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn shared_with(&self, other: &TokenSet) -> usize {
        self.0.intersection(&other.0).count()
    }
}

impl<T: Into<Token>> FromIterator<T> for TokenSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Normalize {
    pub lowercase: bool,
    pub ignore_punctuation: bool,
}

impl Normalize {
    fn apply(&self, segment: &str) -> Option<Token> {
        let segment = segment.trim();
        if segment.is_empty() {
            return None;
        }

        if self.ignore_punctuation && !segment.chars().any(char::is_alphanumeric) {
            return None;
        }

        if self.lowercase {
            Some(segment.to_lowercase())
        } else {
            Some(segment.to_owned())
        }
    }
}

pub struct Tokenizer {
    segmenter: Box<dyn Segmenter>,
    normalize: Normalize,
}

impl Tokenizer {
    pub fn new(segmenter: Box<dyn Segmenter>, normalize: Normalize) -> Self {
        Self {
            segmenter,
            normalize,
        }
    }

    pub fn tokenize(&self, text: &str) -> Result<TokenSet> {
        let segments = self.segmenter.segment(text).context(SegmenterErr)?;
        Ok(segments
            .into_iter()
            .filter_map(|s| self.normalize.apply(s))
            .collect())
    }

    /// Merges the tokens of every line into one set.
    pub fn tokenize_document<I, S>(&self, lines: I) -> Result<TokenSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = HashSet::new();
        for line in lines {
            tokens.extend(self.tokenize(line.as_ref())?.0);
        }
        Ok(TokenSet(tokens))
    }
}

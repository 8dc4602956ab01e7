use crate::error::{InvalidThresholdErr, Result};
use crate::tokens::TokenSet;
use serde::Serialize;
use snafu::prelude::*;

/// Scores above this value are flagged as likely plagiarized.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self> {
        ensure!((0.0..=1.0).contains(&value), InvalidThresholdErr { value });
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimilarityResult {
    pub score: f64,
    pub likely_plagiarized: bool,
}

impl SimilarityResult {
    pub fn percentage(&self) -> f64 {
        self.score * 100.0
    }
}

/// Jaccard coefficient `|a ∩ b| / |a ∪ b|`. Two empty sets score 0.0.
pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f64 {
    let shared = a.shared_with(b);
    let union = a.len() + b.len() - shared;

    if union == 0 {
        return 0.0;
    }

    shared as f64 / union as f64
}

/// Strictly greater than the threshold; a score equal to it is not flagged.
pub fn classify(score: f64, threshold: Threshold) -> bool {
    score > threshold.value()
}

pub fn compare(a: &TokenSet, b: &TokenSet, threshold: Threshold) -> SimilarityResult {
    let score = jaccard(a, b);
    SimilarityResult {
        score,
        likely_plagiarized: classify(score, threshold),
    }
}

use tracing::{info, warn};

use crate::model::{CountModel, Label};

/// A word attested under both classes and its
/// `P(word | positive) / P(word | negative)` ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFeature {
    pub word: String,
    pub score: f64,
}

/// Shared words sorted by ascending score: most negative-leaning first.
#[derive(Debug, Clone, Default)]
pub struct FeatureRanking {
    features: Vec<RankedFeature>,
}

impl FeatureRanking {
    pub fn rank(model: &CountModel) -> Self {
        // Collect the words attested under both labels:
        let neg_counts = model.counts(Label::Negative);
        let mut words: Vec<&str> = model
            .counts(Label::Positive)
            .keys()
            .filter(|word| neg_counts.contains_key(*word))
            .map(String::as_str)
            .collect();
        // Fixes the order equal scores end up in.
        words.sort_unstable();

        let mut features: Vec<RankedFeature> = words
            .into_iter()
            .filter_map(|word| {
                let pos = model.word_probability(word, Label::Positive)?;
                let neg = model.word_probability(word, Label::Negative)?;
                Some(RankedFeature {
                    word: word.to_string(),
                    score: pos / neg,
                })
            })
            .collect();

        sort_by_score(&mut features);
        info!(shared_words = features.len(), "ranked features");

        FeatureRanking { features }
    }

    pub fn features(&self) -> &[RankedFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Up to `n` words with the lowest scores, lowest first.
    pub fn most_negative(&self, n: usize) -> &[RankedFeature] {
        self.warn_if_short(n);
        &self.features[..n.min(self.features.len())]
    }

    /// Up to `n` words with the highest scores, highest first.
    pub fn most_positive(&self, n: usize) -> impl Iterator<Item = &RankedFeature> + '_ {
        self.warn_if_short(n);
        self.features.iter().rev().take(n)
    }

    fn warn_if_short(&self, n: usize) {
        if self.features.len() < n {
            warn!(
                requested = n,
                available = self.features.len(),
                "fewer shared words than requested"
            );
        }
    }
}

/// Sorts by ascending score with Lomuto partition-exchange quicksort.
///
/// The pivot is the last element of the range; elements `<=` the pivot are
/// swapped left of a running boundary and the pivot is then swapped to just
/// past it. Each element carries its word, so every swap moves both.
pub fn sort_by_score(features: &mut [RankedFeature]) {
    let mut range = features;
    // Recurse into the smaller side and loop on the larger, keeping the
    // stack depth logarithmic on already sorted input.
    while range.len() > 1 {
        let pivot = partition(range);
        let (left, right) = std::mem::take(&mut range).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            sort_by_score(left);
            range = right;
        } else {
            sort_by_score(right);
            range = left;
        }
    }
}

fn partition(features: &mut [RankedFeature]) -> usize {
    let high = features.len() - 1;
    let pivot = features[high].score;
    let mut boundary = 0;
    for j in 0..high {
        if features[j].score <= pivot {
            features.swap(boundary, j);
            boundary += 1;
        }
    }
    features.swap(boundary, high);
    boundary
}

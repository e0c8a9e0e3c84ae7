use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};

use tracing::info;

use crate::error::{BayesError, Result};

/// The two classes a document can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Parses the literal label token used in training files. Anything other
    /// than `positive` or `negative` is not a label.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "positive" => Some(Label::Positive),
            "negative" => Some(Label::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A training document: its class plus its words (duplicates kept).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledExample {
    pub label: Label,
    pub tokens: Vec<String>,
}

impl LabeledExample {
    pub fn new<I, S>(label: Label, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-class tallies gathered during training.
#[derive(Debug, Clone, Default)]
struct ClassCounts {
    examples: f64,
    words: usize,
    counts: HashMap<String, f64>,
}

/// Trained word counts for both classes.
///
/// Only [`CountModel::train`] builds one and nothing mutates it afterwards,
/// so every classifier can borrow the same model.
///
/// A word seen under only one class is absent from the other class's
/// mapping. It is *not* given a `lambda`-only entry there, which means the
/// classifiers treat it as "no evidence" for that class rather than as a
/// smoothed zero count.
#[derive(Debug, Clone)]
pub struct CountModel {
    pos: ClassCounts,
    neg: ClassCounts,
    num_unique_words: usize,
    lambda: f64,
}

impl CountModel {
    /// Counts every example, then adds `lambda` once to every count in both
    /// mappings.
    pub fn train<I>(examples: I, lambda: f64) -> Result<Self>
    where
        I: IntoIterator<Item = LabeledExample>,
    {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(BayesError::InvalidLambda(lambda));
        }

        let mut pos = ClassCounts::default();
        let mut neg = ClassCounts::default();
        let mut num_unique_words = 0;

        // Count every word under its example's label:
        for example in examples {
            let (own, other) = match example.label {
                Label::Positive => (&mut pos, &neg),
                Label::Negative => (&mut neg, &pos),
            };

            own.examples += 1.0;
            for token in example.tokens {
                own.words += 1;
                match own.counts.entry(token) {
                    Entry::Occupied(entry) => *entry.into_mut() += 1.0,
                    Entry::Vacant(entry) => {
                        // Unique across both classes, so only the first
                        // insertion into either mapping counts.
                        if !other.counts.contains_key(entry.key()) {
                            num_unique_words += 1;
                        }
                        entry.insert(1.0);
                    }
                }
            }
        }

        // Now we can add the smoothing constant:
        pos.counts.values_mut().for_each(|count| *count += lambda);
        neg.counts.values_mut().for_each(|count| *count += lambda);

        info!(
            num_pos = pos.examples,
            num_neg = neg.examples,
            num_pos_words = pos.words,
            num_neg_words = neg.words,
            num_unique_words,
            lambda,
            "trained count model"
        );

        Ok(CountModel {
            pos,
            neg,
            num_unique_words,
            lambda,
        })
    }

    fn class(&self, label: Label) -> &ClassCounts {
        match label {
            Label::Positive => &self.pos,
            Label::Negative => &self.neg,
        }
    }

    /// Smoothed occurrence counts for one class.
    pub fn counts(&self, label: Label) -> &HashMap<String, f64> {
        &self.class(label).counts
    }

    /// Number of training examples with this label.
    pub fn num_examples(&self, label: Label) -> f64 {
        self.class(label).examples
    }

    /// Total token occurrences seen under this label, before smoothing.
    pub fn num_words(&self, label: Label) -> usize {
        self.class(label).words
    }

    pub fn num_unique_words(&self) -> usize {
        self.num_unique_words
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// `num_words(label) + lambda * num_unique_words`, the denominator of
    /// every smoothed word probability.
    pub fn smoothing_denominator(&self, label: Label) -> f64 {
        self.num_words(label) as f64 + self.lambda * self.num_unique_words as f64
    }

    /// Fails unless both classes have at least one training example.
    pub fn ensure_both_classes(&self) -> Result<()> {
        if self.pos.examples > 0.0 && self.neg.examples > 0.0 {
            Ok(())
        } else {
            Err(BayesError::DegenerateTrainingSet {
                num_pos: self.pos.examples,
                num_neg: self.neg.examples,
            })
        }
    }

    /// `P(label)`, the fraction of training examples with this label.
    pub fn class_prior(&self, label: Label) -> f64 {
        self.num_examples(label) / (self.pos.examples + self.neg.examples)
    }

    /// `P(word | label)`, or `None` if the word never occurred under `label`.
    pub fn word_probability(&self, word: &str, label: Label) -> Option<f64> {
        self.counts(label)
            .get(word)
            .map(|count| count / self.smoothing_denominator(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(label: Label, words: &str) -> LabeledExample {
        LabeledExample::new(label, words.split_whitespace())
    }

    fn good_bad_day(lambda: f64) -> CountModel {
        CountModel::train(
            vec![
                example(Label::Positive, "good day"),
                example(Label::Negative, "bad day"),
            ],
            lambda,
        )
        .unwrap()
    }

    #[test]
    fn counts_good_bad_day() {
        let model = good_bad_day(1.0);

        assert_eq!(model.counts(Label::Positive).len(), 2);
        assert_eq!(model.counts(Label::Positive)["good"], 2.0);
        assert_eq!(model.counts(Label::Positive)["day"], 2.0);
        assert_eq!(model.counts(Label::Negative).len(), 2);
        assert_eq!(model.counts(Label::Negative)["bad"], 2.0);
        assert_eq!(model.counts(Label::Negative)["day"], 2.0);
        assert_eq!(model.num_unique_words(), 3);
        assert_eq!(model.num_words(Label::Positive), 2);
        assert_eq!(model.num_words(Label::Negative), 2);
        assert_eq!(model.num_examples(Label::Positive), 1.0);
        assert_eq!(model.num_examples(Label::Negative), 1.0);
    }

    #[test]
    fn one_sided_words_are_not_materialized_in_other_class() {
        let model = good_bad_day(1.0);

        assert!(!model.counts(Label::Negative).contains_key("good"));
        assert!(!model.counts(Label::Positive).contains_key("bad"));
        assert_eq!(model.word_probability("good", Label::Negative), None);
    }

    #[test]
    fn smoothed_counts_reconcile_with_word_totals() {
        let lambda = 0.5;
        let model = CountModel::train(
            vec![
                example(Label::Positive, "a a b c"),
                example(Label::Positive, "c d"),
                example(Label::Negative, "a e e"),
                example(Label::Negative, ""),
            ],
            lambda,
        )
        .unwrap();

        for label in [Label::Positive, Label::Negative] {
            let sum: f64 = model.counts(label).values().sum();
            let expected =
                model.num_words(label) as f64 + lambda * model.counts(label).len() as f64;
            assert!((sum - expected).abs() < 1e-9, "{label}: {sum} != {expected}");
        }
        assert_eq!(model.num_unique_words(), 5);
    }

    #[test]
    fn label_only_example_still_counts() {
        let model = CountModel::train(
            vec![
                example(Label::Positive, ""),
                example(Label::Negative, "x"),
            ],
            1.0,
        )
        .unwrap();

        assert_eq!(model.num_examples(Label::Positive), 1.0);
        assert_eq!(model.num_words(Label::Positive), 0);
        assert!(model.counts(Label::Positive).is_empty());
        assert!(model.ensure_both_classes().is_ok());
    }

    #[test]
    fn rejects_invalid_lambda() {
        for lambda in [-1.0, f64::NAN, f64::INFINITY] {
            let result = CountModel::train(Vec::new(), lambda);
            assert!(matches!(result, Err(BayesError::InvalidLambda(_))));
        }
    }

    #[test]
    fn single_class_is_degenerate() {
        let model = CountModel::train(vec![example(Label::Positive, "a")], 1.0).unwrap();

        assert!(matches!(
            model.ensure_both_classes(),
            Err(BayesError::DegenerateTrainingSet { num_neg, .. }) if num_neg == 0.0
        ));
    }

    #[test]
    fn probabilities() {
        let model = good_bad_day(1.0);

        assert_eq!(model.class_prior(Label::Positive), 0.5);
        assert_eq!(model.class_prior(Label::Negative), 0.5);
        // 2 / (2 + 1 * 3)
        assert_eq!(model.word_probability("good", Label::Positive), Some(0.4));
        assert_eq!(model.smoothing_denominator(Label::Negative), 5.0);
    }

    #[test]
    fn parses_labels() {
        assert_eq!(Label::parse("positive"), Some(Label::Positive));
        assert_eq!(Label::parse("negative"), Some(Label::Negative));
        assert_eq!(Label::parse("Positive"), None);
        assert_eq!(Label::Negative.to_string(), "negative");
    }
}

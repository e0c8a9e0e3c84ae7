use std::collections::HashSet;

use crate::{
    bayes::{ClassificationResult, Classifier},
    error::Result,
    model::{CountModel, Label},
};

/// Bernoulli naive Bayes over natural-log probabilities.
///
/// Each word of a class's trained vocabulary is a yes/no feature: the
/// document either contains it or not, however many times. Words the model
/// never saw for a class are not features of that class.
#[derive(Debug, Clone)]
pub struct BernoulliClassifier<'a> {
    model: &'a CountModel,
    pos_features: Vec<(&'a str, f64)>,
    neg_features: Vec<(&'a str, f64)>,
}

impl<'a> BernoulliClassifier<'a> {
    pub fn new(model: &'a CountModel) -> Result<Self> {
        model.ensure_both_classes()?;
        Ok(BernoulliClassifier {
            model,
            pos_features: Self::features(model, Label::Positive),
            neg_features: Self::features(model, Label::Negative),
        })
    }

    /// The class vocabulary sorted by word, so scores are summed in the
    /// same order on every run.
    fn features(model: &'a CountModel, label: Label) -> Vec<(&'a str, f64)> {
        let mut features: Vec<(&'a str, f64)> = model
            .counts(label)
            .iter()
            .map(|(word, &count)| (word.as_str(), count))
            .collect();
        features.sort_unstable_by(|a, b| a.0.cmp(b.0));
        features
    }

    fn class_score(&self, present: &HashSet<&str>, label: Label) -> f64 {
        let features = match label {
            Label::Positive => &self.pos_features,
            Label::Negative => &self.neg_features,
        };
        let num_examples = self.model.num_examples(label);
        let prior = self.model.class_prior(label).ln();

        features.iter().fold(prior, |score, &(word, count)| {
            score + Self::feature_log_prob(count, num_examples, present.contains(word))
        })
    }

    /// `(count + 1) / (num_examples + 2)` is the presence probability. The
    /// count is the smoothed occurrence count, so this can reach 1 and the
    /// absence term becomes `-inf` (or `NaN` past 1).
    fn feature_log_prob(count: f64, num_examples: f64, present: bool) -> f64 {
        let p = (count + 1.0) / (num_examples + 2.0);
        if present {
            p.ln()
        } else {
            (1.0 - p).ln()
        }
    }
}

impl Classifier for BernoulliClassifier<'_> {
    fn name(&self) -> &'static str {
        "bernoulli"
    }

    fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> ClassificationResult {
        let present: HashSet<&str> = tokens.iter().map(|token| token.as_ref()).collect();

        ClassificationResult::decide(
            self.class_score(&present, Label::Positive),
            self.class_score(&present, Label::Negative),
        )
    }
}

use crate::{
    error::Result,
    model::{CountModel, Label},
};

/// The label picked for one document and the log-score that won.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub label: Label,
    pub score: f64,
}

impl ClassificationResult {
    /// Positive wins ties.
    pub fn decide(pos_score: f64, neg_score: f64) -> Self {
        if pos_score >= neg_score {
            ClassificationResult {
                label: Label::Positive,
                score: pos_score,
            }
        } else {
            ClassificationResult {
                label: Label::Negative,
                score: neg_score,
            }
        }
    }
}

pub trait Classifier {
    /// Short name used to head report sections.
    fn name(&self) -> &'static str;

    fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> ClassificationResult;

    /// Classifies every document, keeping input order.
    fn classify_batch<S: AsRef<str>>(&self, documents: &[Vec<S>]) -> Vec<ClassificationResult> {
        documents.iter().map(|tokens| self.classify(tokens)).collect()
    }
}

/// Multinomial naive Bayes over base-10 log probabilities.
///
/// Every occurrence of a word adds `log10(P(word | class))` to that class's
/// score. A word missing from a class's vocabulary adds nothing to it.
#[derive(Debug, Clone, Copy)]
pub struct MultinomialClassifier<'a> {
    model: &'a CountModel,
}

impl<'a> MultinomialClassifier<'a> {
    pub fn new(model: &'a CountModel) -> Result<Self> {
        model.ensure_both_classes()?;
        Ok(MultinomialClassifier { model })
    }

    fn class_score<S: AsRef<str>>(&self, tokens: &[S], label: Label) -> f64 {
        let counts = self.model.counts(label);
        let denominator = self.model.smoothing_denominator(label);

        tokens.iter().fold(
            self.model.class_prior(label).log10(),
            |score, token| match counts.get(token.as_ref()) {
                Some(count) => score + (count / denominator).log10(),
                None => score,
            },
        )
    }
}

impl Classifier for MultinomialClassifier<'_> {
    fn name(&self) -> &'static str {
        "multinomial"
    }

    fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> ClassificationResult {
        ClassificationResult::decide(
            self.class_score(tokens, Label::Positive),
            self.class_score(tokens, Label::Negative),
        )
    }
}

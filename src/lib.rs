pub mod bayes;
pub mod bernoulli;
pub mod corpus;
pub mod error;
pub mod model;
pub mod ranking;
pub mod report;

pub use bayes::{ClassificationResult, Classifier, MultinomialClassifier};
pub use bernoulli::BernoulliClassifier;
pub use error::{BayesError, Result};
pub use model::{CountModel, Label, LabeledExample};
pub use ranking::{FeatureRanking, RankedFeature};

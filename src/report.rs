use std::io;

use csv::{Writer, WriterBuilder};

use crate::{
    bayes::ClassificationResult,
    error::Result,
    model::{CountModel, Label},
    ranking::FeatureRanking,
};

pub struct Report<W: io::Write> {
    writer: Writer<W>,
}

impl<W: io::Write> Report<W> {
    pub fn new(writer: W, delimiter: u8) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(writer);
        Report { writer }
    }

    /// One `(ID, Label, Score)` row per document, IDs 1-based in input order.
    pub fn write_classifications(
        &mut self,
        title: &str,
        results: &[ClassificationResult],
    ) -> Result<()> {
        self.writer.write_record([title])?;
        self.writer.write_record(["ID", "Label", "Score"])?;
        for (i, result) in results.iter().enumerate() {
            self.writer.write_record(&[
                (i + 1).to_string(),
                result.label.to_string(),
                result.score.to_string(),
            ])?;
        }
        Ok(())
    }

    /// Class priors followed by every `P(word | class)` in the model.
    pub fn write_probabilities(&mut self, model: &CountModel) -> Result<()> {
        self.writer.write_record(["probabilities"])?;
        for label in [Label::Positive, Label::Negative] {
            self.writer.write_record(&[
                format!("p({label})"),
                model.class_prior(label).to_string(),
            ])?;
        }

        // Then every word of each class, sorted so output is reproducible:
        for label in [Label::Positive, Label::Negative] {
            let mut words: Vec<&String> = model.counts(label).keys().collect();
            words.sort_unstable();
            for word in words {
                if let Some(probability) = model.word_probability(word, label) {
                    self.writer
                        .write_record(&[format!("p({word}|{label})"), probability.to_string()])?;
                }
            }
        }
        Ok(())
    }

    /// The `top` most positive-leaning words (highest first), then the `top`
    /// most negative-leaning (lowest first).
    pub fn write_ranking(&mut self, ranking: &FeatureRanking, top: usize) -> Result<()> {
        self.writer.write_record(["most predictive of positive"])?;
        for feature in ranking.most_positive(top) {
            self.writer
                .write_record(&[feature.word.clone(), feature.score.to_string()])?;
        }

        self.writer.write_record(["most predictive of negative"])?;
        for feature in ranking.most_negative(top) {
            self.writer
                .write_record(&[feature.word.clone(), feature.score.to_string()])?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().map_err(csv::Error::from)?;
        self.writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()).into())
    }
}

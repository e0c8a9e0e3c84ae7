use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sentiment_bayes::{
    corpus, report::Report, BernoulliClassifier, Classifier, CountModel, FeatureRanking,
    MultinomialClassifier,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sentiment_bayes")]
#[command(version)]
#[command(about = "Train a positive/negative naive Bayes classifier and label test sentences", long_about = None)]
struct Cli {
    /// Training data: one example per line, label first
    #[arg(long)]
    train: PathBuf,

    /// Sentences to classify, one per line
    #[arg(long)]
    test: PathBuf,

    /// Smoothing constant added to every word count
    #[arg(short, long, default_value_t = 0.0)]
    lambda: f64,

    /// Which classifier(s) to run
    #[arg(short, long, value_enum, default_value_t = ModelKind::Both)]
    model: ModelKind,

    /// Print every class prior and word probability of the trained model
    #[arg(long)]
    probabilities: bool,

    /// Print the most predictive words of each class
    #[arg(long)]
    rank: bool,

    /// How many words per class to print with --rank
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field separator of the report
    #[arg(long, default_value = "\t", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModelKind {
    Multinomial,
    Bernoulli,
    Both,
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}

fn parse_log_level(s: &str) -> std::result::Result<Level, String> {
    Level::from_str(s).map_err(|_| format!("unknown log level {s:?}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let examples = corpus::read_training_file(&cli.train)
        .with_context(|| format!("loading training data from {}", cli.train.display()))?;
    let model = CountModel::train(examples, cli.lambda).context("training count model")?;

    let documents = corpus::read_test_file(&cli.test)
        .with_context(|| format!("loading test sentences from {}", cli.test.display()))?;
    info!(documents = documents.len(), "classifying");

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut report = Report::new(out, cli.delimiter);

    if cli.model != ModelKind::Bernoulli {
        let classifier = MultinomialClassifier::new(&model)?;
        write_section(&mut report, &classifier, &documents)?;
    }
    if cli.model != ModelKind::Multinomial {
        let classifier = BernoulliClassifier::new(&model)?;
        write_section(&mut report, &classifier, &documents)?;
    }

    if cli.probabilities {
        report.write_probabilities(&model)?;
    }
    if cli.rank {
        report.write_ranking(&FeatureRanking::rank(&model), cli.top)?;
    }

    report.finish().context("writing report")?;
    Ok(())
}

fn write_section<C: Classifier, W: Write>(
    report: &mut Report<W>,
    classifier: &C,
    documents: &[Vec<String>],
) -> Result<()> {
    let results = classifier.classify_batch(documents);
    report
        .write_classifications(classifier.name(), &results)
        .with_context(|| format!("writing {} results", classifier.name()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(extra: &[&str]) -> std::result::Result<Cli, clap::Error> {
        let mut args = vec!["sentiment_bayes", "--train", "train.txt", "--test", "test.txt"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args)
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();

        assert_eq!(cli.log_level, Level::INFO);
        assert_eq!(cli.lambda, 0.0);
        assert_eq!(cli.top, 10);
        assert_eq!(cli.delimiter, b'\t');
        assert!(cli.model == ModelKind::Both);
    }

    #[test]
    fn log_level_is_parsed() {
        assert_eq!(parse(&["--log-level", "debug"]).unwrap().log_level, Level::DEBUG);
        assert_eq!(parse(&["--log-level", "WARN"]).unwrap().log_level, Level::WARN);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(parse(&["--log-level", "loud"]).is_err());
        assert!(parse(&["--log-level", "inof"]).is_err());
    }

    #[test]
    fn delimiter_must_be_one_ascii_byte() {
        assert_eq!(parse(&["--delimiter", ","]).unwrap().delimiter, b',');
        assert!(parse(&["--delimiter", ";;"]).is_err());
        assert!(parse(&["--delimiter", "é"]).is_err());
    }
}

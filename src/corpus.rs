use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::debug;

use crate::{
    error::{BayesError, Result},
    model::{Label, LabeledExample},
};

/// Parses one training line. Lines whose first token is not a label are
/// not examples.
pub fn parse_training_line(line: &str) -> Option<LabeledExample> {
    let mut tokens = line.split_whitespace();
    let label = Label::parse(tokens.next()?)?;
    Some(LabeledExample::new(label, tokens))
}

pub fn parse_test_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

pub fn read_training<R: BufRead>(reader: R) -> std::io::Result<Vec<LabeledExample>> {
    let mut examples = Vec::new();
    for_each_line(reader, |number, line| match parse_training_line(line) {
        Some(example) => examples.push(example),
        None => debug!(line = number, "skipping training line without a label"),
    })?;
    Ok(examples)
}

/// One token sequence per line, empty lines included, so results stay
/// aligned with input line numbers.
pub fn read_test<R: BufRead>(reader: R) -> std::io::Result<Vec<Vec<String>>> {
    let mut documents = Vec::new();
    for_each_line(reader, |_, line| documents.push(parse_test_line(line)))?;
    Ok(documents)
}

pub fn read_training_file<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    open(path)
        .and_then(read_training)
        .map_err(|source| io_error(path, source))
}

pub fn read_test_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    open(path)
        .and_then(read_test)
        .map_err(|source| io_error(path, source))
}

fn open(path: &Path) -> std::io::Result<BufReader<File>> {
    File::open(path).map(BufReader::new)
}

fn io_error(path: &Path, source: std::io::Error) -> BayesError {
    BayesError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Calls `f` with each 1-based line number and line. Bytes that are not
/// valid UTF-8 are replaced rather than failing the batch.
fn for_each_line<R, F>(mut reader: R, mut f: F) -> std::io::Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str),
{
    let mut buf = Vec::new();
    let mut number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        number += 1;
        f(number, &String::from_utf8_lossy(&buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labeled_lines() {
        let example = parse_training_line("positive  good\tday good").unwrap();

        assert_eq!(example.label, Label::Positive);
        assert_eq!(example.tokens, vec!["good", "day", "good"]);
    }

    #[test]
    fn label_only_line_is_an_empty_example() {
        let example = parse_training_line("negative").unwrap();

        assert_eq!(example.label, Label::Negative);
        assert!(example.tokens.is_empty());
    }

    #[test]
    fn unlabeled_lines_are_skipped() {
        let input = "positive a\n\nneutral b\nNEGATIVE c\nnegative d\n";
        let examples = read_training(input.as_bytes()).unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].label, Label::Positive);
        assert_eq!(examples[1].label, Label::Negative);
        assert_eq!(examples[1].tokens, vec!["d"]);
    }

    #[test]
    fn test_lines_keep_empty_documents() {
        let input = "good day\n\nbad\r\n";
        let documents = read_test(input.as_bytes()).unwrap();

        assert_eq!(
            documents,
            vec![vec!["good".to_string(), "day".to_string()], vec![], vec!["bad".to_string()]]
        );
    }

    #[test]
    fn invalid_utf8_does_not_abort() {
        let input: &[u8] = b"positive ok \xff\nnegative fine\n";
        let examples = read_training(input).unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].tokens[0], "ok");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_test_file("/definitely/not/here.txt").unwrap_err();

        assert!(matches!(err, BayesError::Io { ref path, .. } if path.ends_with("here.txt")));
    }
}

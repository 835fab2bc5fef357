//! Input resolution: file, positional words or standard input.

use crate::error::{Result, WordposError};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Ctrl-D and Ctrl-Z end interactive input when they start a line.
const END_OF_INPUT: [char; 2] = ['\u{4}', '\u{1a}'];

/// Where the text to tokenize comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file read in full.
    File(PathBuf),
    /// Positional words, joined by single spaces.
    Args(Vec<String>),
    /// Standard input, read until EOF or an end-of-input control character.
    Stdin,
    /// No input at all.
    Empty,
}

impl InputSource {
    /// Selects the source from command-line values.
    ///
    /// A file wins over positional words. Without either, standard input is
    /// read unless `read_stdin` is false.
    pub fn select(file: Option<PathBuf>, words: Vec<String>, read_stdin: bool) -> Self {
        match file {
            Some(path) => Self::File(path),
            None if !words.is_empty() => Self::Args(words),
            None if read_stdin => Self::Stdin,
            None => Self::Empty,
        }
    }
}

/// Reads the text of `source`.
pub async fn resolve_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            WordposError::input(format!("Failed to read {}: {e}", path.display()))
        }),
        InputSource::Args(words) => Ok(words.join(" ")),
        InputSource::Stdin => read_until_end_of_input(BufReader::new(tokio::io::stdin())).await,
        InputSource::Empty => Ok(String::new()),
    }
}

/// Reads lines until EOF or a line starting with an end-of-input character.
pub async fn read_until_end_of_input<R>(mut reader: R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut data = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| WordposError::input(format!("Failed to read standard input: {e}")))?;
        if read == 0 || line.starts_with(END_OF_INPUT) {
            break;
        }
        data.push_str(&line);
    }
    Ok(data)
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("index {index} is out of range for a dictionary of {count} entries")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("dictionary contains no valid entries")]
    EmptyDictionary,
    #[error("count header line is missing")]
    MissingHeader,
    #[error("invalid count header: {0:?}")]
    InvalidHeader(String),
    #[error("dictionary word is not valid UTF-8")]
    InvalidWord(#[from] std::string::FromUtf8Error),
    #[error("{0} unexpected bytes after the last dictionary entry")]
    TrailingBytes(usize),
    #[error("{0} does not fit the 32-bit length field of the binary dictionary")]
    TooLarge(usize),
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reason a dictionary line was skipped during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("failed to parse dictionary line {0:?}")]
    Malformed(String),
    #[error("dictionary line is not valid UTF-8: {0:?}")]
    InvalidEncoding(String),
    #[error("failed to parse frequency {0:?}")]
    InvalidFrequency(String),
    #[error("negative frequency {frequency} for word {word:?}")]
    NegativeFrequency { word: String, frequency: i64 },
}

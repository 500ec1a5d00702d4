use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    Network(String),
    HtmlParse(String),
    MissingNextData,
    JsonParse(String),
    UnexpectedShape(String),
    Deserialize(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            FetchError::MissingNextData => write!(f, "__NEXT_DATA__ not found"),
            FetchError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            FetchError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
            FetchError::Deserialize(msg) => write!(f, "Deserialize error: {msg}"),
        }
    }
}

impl Error for FetchError {}

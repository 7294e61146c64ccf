/// Failure to get the report off the wire.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("Invalid stats URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The report could not be turned into records. Parsing never yields a partial result.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("empty input: no records found")]
    EmptyInput,
    #[error("malformed tabular data: {0}")]
    MalformedTable(#[source] TableError),
    #[error("column count mismatch at row {row}: expected {expected} columns, found {found}")]
    ColumnCountMismatch { row: usize, expected: usize, found: usize },
    #[error("header row has no column names")]
    HeaderMissing,
}

/// Why the report is not valid CSV.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("bare \" in unquoted field on line {line}")]
    BareQuote { line: usize },
    #[error("extraneous or missing \" in quoted field on line {line}")]
    StrayAfterQuote { line: usize },
    #[error("quoted field starting on line {line} is never closed")]
    UnterminatedQuote { line: usize },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum StatusError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

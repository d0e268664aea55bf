use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Transport,
    Domain,
    MalformedData,
    Input,
    Output,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered but reported an application-level error.
    #[error("{0}")]
    Unavailable(String),

    #[error("unexpected response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("forecast entry at '{timestamp}' has no weather description")]
    MissingDescription { timestamp: String },

    #[error("malformed timestamp '{value}': {source}")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("could not read city name: {0}")]
    Input(#[from] std::io::Error),

    #[error("no city name given")]
    EmptyCity,

    #[error("could not write report: {0}")]
    Output(#[source] std::io::Error),

    #[error("unexpected response: missing field `{0}`")]
    MissingField(&'static str),
}

// The request URL carries the API key, so it is stripped before the error
// can reach a log line or the console.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_status() {
            Error::Http(err)
        } else {
            Error::Transport(err)
        }
    }
}

impl Error {
    pub fn kind(&self) -> Kind {
        match self {
            Error::Http(_) | Error::Transport(_) => Kind::Transport,
            Error::Unavailable(_) => Kind::Domain,
            Error::Malformed(_)
            | Error::MissingDescription { .. }
            | Error::MalformedTimestamp { .. }
            | Error::MissingField(_) => Kind::MalformedData,
            Error::Input(_) | Error::EmptyCity => Kind::Input,
            Error::Output(_) => Kind::Output,
        }
    }
}

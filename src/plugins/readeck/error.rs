use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadeckError {
    #[error("cannot reach readeck instance: {0}")]
    Network(#[source] reqwest::Error),
    #[error("readeck rejected the api key ({0})")]
    Auth(String),
    #[error("bookmark {0} not found")]
    NotFound(String),
    #[error("unexpected response from readeck: {0}")]
    Api(String),
    #[error("invalid instance url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ReadeckError {
    /// Classify a non-success status. `id` names the bookmark for
    /// id-targeted requests.
    pub(crate) fn from_status(status: StatusCode, id: Option<&str>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(status.to_string()),
            StatusCode::NOT_FOUND => match id {
                Some(id) => Self::NotFound(id.to_string()),
                None => Self::Api(format!("http status {status}")),
            },
            _ => Self::Api(format!("http status {status}")),
        }
    }
}

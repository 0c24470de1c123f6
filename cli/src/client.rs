//! HTTP client for the ballot API

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use vibes_api::{TallyResponse, VoteResponse, VotedResponse};
use vibes_ballot::VoteChoice;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API endpoint: {0}")]
    InvalidUrl(String),

    #[error("{message} ({status}, {error})")]
    Rejected {
        status: StatusCode,
        error: String,
        message: String,
    },
}

impl ClientError {
    pub fn is_already_voted(&self) -> bool {
        matches!(self, ClientError::Rejected { error, .. } if error == "already_voted")
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

pub struct BallotClient {
    http: reqwest::Client,
    api: String,
}

impl BallotClient {
    pub fn new(api: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api: api.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn tally(&self) -> Result<TallyResponse, ClientError> {
        let url = self.endpoint(&["ballot", "tally"])?;
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    pub async fn has_voted(&self, identity: &str) -> Result<bool, ClientError> {
        let url = self.endpoint(&["ballot", "voted", identity])?;
        let response = self.http.get(url).send().await?;
        let voted: VotedResponse = decode(response).await?;
        Ok(voted.has_voted)
    }

    pub async fn vote(&self, identity: &str, choice: VoteChoice) -> Result<VoteResponse, ClientError> {
        let url = self.endpoint(&["ballot", "vote", choice.as_str()])?;
        let response = self
            .http
            .post(url)
            .json(&json!({ "voter": identity }))
            .send()
            .await?;
        decode(response).await
    }

    /// API url with `segments` appended, each one percent-encoded so
    /// identities containing `/`, `?` or `#` stay a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.api)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.api, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.api.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let (error, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error, body.message),
        Err(_) => ("http_error".to_string(), text),
    };

    Err(ClientError::Rejected {
        status,
        error,
        message,
    })
}

use super::config::ReadeckSettings;
use super::error::ReadeckError;
use super::model::Bookmark;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::Method;
use std::time::Duration;
use url::Url;

/// Page size used when listing bookmarks.
pub const PAGE_LIMIT: usize = 100;
const TOTAL_COUNT: &str = "total-count";
const USER_AGENT: &str = "readeck-launcher";

/// Blocking client for the Readeck REST API.
///
/// Every call is a single best-effort attempt; failures are classified into
/// [`ReadeckError`] and never retried.
pub struct ReadeckClient {
    client: Client,
    bookmarks_url: Url,
    api_key: String,
}

impl ReadeckClient {
    pub fn new(settings: &ReadeckSettings) -> Result<Self, ReadeckError> {
        let raw = settings.instance_url.trim();
        let invalid = |source| ReadeckError::InvalidUrl {
            url: raw.to_string(),
            source,
        };
        // A trailing slash keeps any sub-path of the instance when joining.
        let base = Url::parse(&format!("{}/", raw.trim_end_matches('/'))).map_err(invalid)?;
        if base.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let bookmarks_url = base.join("api/bookmarks").map_err(invalid)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ReadeckError::Network)?;
        Ok(Self {
            client,
            bookmarks_url,
            api_key: settings.api_key.clone(),
        })
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, ReadeckError> {
        if self.api_key.trim().is_empty() {
            return Err(ReadeckError::Auth("missing api key".into()));
        }
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json"))
    }

    fn bookmark_url(&self, id: &str) -> Url {
        let mut url = self.bookmarks_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    /// Fetch every bookmark, following `Total-Count` pagination.
    ///
    /// A failure on any page fails the whole listing.
    pub fn list_bookmarks(&self) -> Result<Vec<Bookmark>, ReadeckError> {
        let mut all = Vec::new();
        let mut offset = 0usize;
        loop {
            let resp = self
                .request(Method::GET, self.bookmarks_url.clone())?
                .query(&[("limit", PAGE_LIMIT), ("offset", offset)])
                .send()
                .map_err(ReadeckError::Network)?;
            let status = resp.status();
            if !status.is_success() {
                tracing::warn!("got response {status} listing bookmarks at offset {offset}");
                return Err(ReadeckError::from_status(status, None));
            }
            let total = resp
                .headers()
                .get(TOTAL_COUNT)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<usize>().ok());
            let page: Vec<Bookmark> = resp
                .json()
                .map_err(|e| ReadeckError::Api(format!("decode bookmarks: {e}")))?;
            let fetched = page.len();
            all.extend(page);
            offset += PAGE_LIMIT;
            match total {
                Some(total) if fetched > 0 && offset < total => continue,
                _ => break,
            }
        }
        Ok(all)
    }

    pub fn archive(&self, id: &str) -> Result<(), ReadeckError> {
        let url = self.bookmark_url(id);
        tracing::debug!("about to PATCH {url}");
        let resp = self
            .request(Method::PATCH, url)?
            .json(&serde_json::json!({ "is_archived": true }))
            .send()
            .map_err(ReadeckError::Network)?;
        check(resp.status(), id)
    }

    pub fn delete(&self, id: &str) -> Result<(), ReadeckError> {
        let url = self.bookmark_url(id);
        tracing::debug!("about to DELETE {url}");
        let resp = self
            .request(Method::DELETE, url)?
            .send()
            .map_err(ReadeckError::Network)?;
        check(resp.status(), id)
    }
}

fn check(status: reqwest::StatusCode, id: &str) -> Result<(), ReadeckError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ReadeckError::from_status(status, Some(id)))
    }
}

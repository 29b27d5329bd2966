//! A thin client for the hosted waitlist table, speaking the PostgREST
//! dialect: filters are query params, writes return representations, and
//! exact counts travel in the `content-range` header.

use chrono::{DateTime, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TABLE_PATH: &str = "rest/v1/waitlist";

// ###################################
// ->   STRUCTS
// ###################################
/// A persisted waitlist record, as returned by the store.
#[derive(Deserialize, Clone, Debug)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The insert payload. The store assigns the id.
#[derive(Serialize, Debug)]
pub struct NewWaitlistEntry {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct WaitlistStore {
    http_client: Client,
    url: reqwest::Url,
    api_key: SecretString,
}

// ###################################
// ->   IMPLS
// ###################################
impl WaitlistStore {
    pub fn new<S: AsRef<str>>(
        url: S,
        api_key: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(WaitlistStore {
            http_client,
            url,
            api_key,
        })
    }

    /// Point lookup by normalized email. An empty result set means the email
    /// is not registered yet.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>> {
        let email_filter = format!("eq.{email}");
        let entries: Vec<WaitlistEntry> = self
            .http_client
            .get(self.table_url()?)
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .query(&[("select", "*"), ("email", email_filter.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(entries.into_iter().next())
    }

    /// Inserts a new entry and returns the created row, id included.
    pub async fn insert(&self, entry: &NewWaitlistEntry) -> Result<WaitlistEntry> {
        let mut created: Vec<WaitlistEntry> = self
            .http_client
            .post(self.table_url()?)
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .header("Prefer", "return=representation")
            .json(entry)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        created.pop().ok_or(Error::EmptyInsertResponse)
    }

    /// Exact count of all entries, read from the `content-range` header of a
    /// HEAD request ("0-n/total" or "*/total").
    pub async fn count_all(&self) -> Result<u64> {
        let resp = self
            .http_client
            .head(self.table_url()?)
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .header("Prefer", "count=exact")
            .send()
            .await?
            .error_for_status()?;

        let count = resp
            .headers()
            .get("content-range")
            .and_then(|range| range.to_str().ok())
            .and_then(|range| range.rsplit_once('/'))
            .and_then(|(_, total)| total.parse().ok())
            .ok_or(Error::MissingCount)?;

        Ok(count)
    }

    fn table_url(&self) -> Result<reqwest::Url> {
        self.url
            .join(TABLE_PATH)
            .map_err(|e| Error::UrlParsing(e.to_string()))
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, derive_more::From)]
pub enum Error {
    UrlParsing(String),
    EmptyInsertResponse,
    MissingCount,
    #[from]
    Reqwest(reqwest::Error),
}
// Error Boilerplate
impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

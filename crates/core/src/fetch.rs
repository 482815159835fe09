//! HTTP access to the package index site.
//!
//! [`PageFetcher`] owns a base URL and a [`reqwest::Client`] and knows the
//! site's four URL templates. It returns raw HTML bodies and reports
//! transport and status failures as [`MvnRepoError`]; it never parses and
//! never logs, leaving both to the layer above.
//!
//! Timeouts, proxies, and TLS choices belong to the [`Client`] the caller
//! hands in.

use reqwest::Client;
use url::Url;

use crate::error::{MvnRepoError, Result};

/// Base URL of the public site.
pub const DEFAULT_BASE_URL: &str = "https://mvnrepository.com";

/// Sort key sent with every search request.
const SEARCH_SORT: &str = "relevance";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; mvnrepo/0.1)";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Fetches pages from a single package index site.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl PageFetcher {
    /// Creates a fetcher rooted at `base_url`.
    ///
    /// The base must be able to carry path segments; opaque URLs such as
    /// `mailto:` ones are rejected with [`MvnRepoError::InvalidBaseUrl`].
    pub fn new(base_url: Url, client: Client) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(MvnRepoError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Replaces the User-Agent header sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Fetches the page describing one exact version of an artifact.
    pub async fn artifact_page(
        &self,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> Result<String> {
        let url = self.url_for(&["artifact", group_id, artifact_id, version], &[]);
        self.get(url).await
    }

    /// Fetches the artifact overview page listing all published versions.
    pub async fn versions_page(&self, group_id: &str, artifact_id: &str) -> Result<String> {
        let url = self.url_for(&["artifact", group_id, artifact_id], &[]);
        self.get(url).await
    }

    /// Fetches one page of the repository directory.
    pub async fn repositories_page(&self, page: usize) -> Result<String> {
        let url = self.url_for(&["repos"], &[("p", page.to_string())]);
        self.get(url).await
    }

    /// Fetches one page of search results for `query`, sorted by relevance.
    pub async fn search_page(&self, query: &str, page: usize) -> Result<String> {
        let url = self.url_for(
            &["search"],
            &[
                ("q", query.to_string()),
                ("p", page.to_string()),
                ("sort", SEARCH_SORT.to_string()),
            ],
        );
        self.get(url).await
    }

    /// Joins path segments and query pairs onto the base URL.
    ///
    /// Segments are appended individually so reserved characters inside a
    /// coordinate are percent-encoded rather than splitting the path.
    fn url_for(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        url
    }

    async fn get(&self, url: Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .header("Accept", ACCEPT_HTML)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MvnRepoError::Status { url, status });
        }

        Ok(response.text().await?)
    }
}

//! High-level resolvers tying fetching and parsing together.
//!
//! [`MvnRepository`] is the entry point callers hold on to. Its methods
//! absorb transport and status failures rather than surfacing them: a lookup
//! that cannot be completed logs a warning and resolves to "absent"
//! ([`None`], an empty list, or [`Page::empty`]), so batch callers keep
//! moving without wrapping every call in error handling.

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::warn;
use url::Url;

use crate::error::Result;
use crate::fetch::{DEFAULT_BASE_URL, PageFetcher};
use crate::model::{Artifact, ArtifactEntry, Page, Repository};
use crate::parse::{self, ArtifactPage, RepositoriesPage, SearchPage};

/// Number of results the site serves per search page.
pub const PAGE_SIZE: usize = 10;

/// Deepest search page the site will serve.
pub const MAX_PAGE: usize = 50;

/// Upper bound on directory pages walked when listing repositories.
const MAX_REPOSITORY_PAGES: usize = 50;

/// Client for the package index site.
///
/// Cheap to share behind a reference; the repository directory is fetched at
/// most once per instance and reused by every later
/// [`get_repositories`](Self::get_repositories) call.
pub struct MvnRepository {
    fetcher: PageFetcher,
    repositories: OnceCell<Vec<Repository>>,
}

impl MvnRepository {
    /// Creates a client against the public site.
    pub fn new(client: Client) -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        let fetcher = PageFetcher::new(base_url, client).expect("default base URL carries paths");

        Self::with_fetcher(fetcher)
    }

    /// Creates a client against an alternate host, such as a local fixture
    /// server.
    pub fn with_base_url(base_url: Url, client: Client) -> Result<Self> {
        Ok(Self::with_fetcher(PageFetcher::new(base_url, client)?))
    }

    /// Wraps a preconfigured [`PageFetcher`].
    pub fn with_fetcher(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            repositories: OnceCell::new(),
        }
    }

    /// Resolves one exact version of an artifact.
    ///
    /// Returns [`None`] when the page cannot be fetched, most commonly a 404
    /// for coordinates the site does not know. Fields the page does not
    /// carry come back empty rather than failing the whole lookup.
    pub async fn get_artifact(
        &self,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> Option<Artifact> {
        let html = match self.fetcher.artifact_page(group_id, artifact_id, version).await {
            Ok(html) => html,
            Err(error) => {
                warn!(%error, "failed to fetch artifact {group_id}:{artifact_id}:{version}");
                return None;
            }
        };

        Some(ArtifactPage::parse(&html).into_artifact(group_id, artifact_id, version))
    }

    /// Lists the published versions of an artifact, newest first as the site
    /// orders them.
    ///
    /// Unknown coordinates and fetch failures resolve to an empty list.
    pub async fn get_artifact_versions(&self, group_id: &str, artifact_id: &str) -> Vec<String> {
        match self.fetcher.versions_page(group_id, artifact_id).await {
            Ok(html) => parse::parse_versions(&html),
            Err(error) => {
                warn!(%error, "failed to fetch versions for {group_id}:{artifact_id}");
                Vec::new()
            }
        }
    }

    /// Lists every repository in the site's directory.
    ///
    /// The directory is paged; this walks pages until one comes back empty,
    /// then caches the result for the lifetime of the client. Concurrent
    /// first callers share a single walk. A failure partway through keeps
    /// the pages gathered so far, so the cached list can be shorter than the
    /// directory on a bad day.
    pub async fn get_repositories(&self) -> &[Repository] {
        self.repositories
            .get_or_init(|| self.walk_repository_pages())
            .await
    }

    async fn walk_repository_pages(&self) -> Vec<Repository> {
        let mut repositories = Vec::new();

        for page in 1..=MAX_REPOSITORY_PAGES {
            let html = match self.fetcher.repositories_page(page).await {
                Ok(html) => html,
                Err(error) => {
                    warn!(%error, "failed to fetch repository directory page {page}");
                    break;
                }
            };

            let parsed = RepositoriesPage::parse(&html);
            if parsed.raw_rows == 0 {
                break;
            }

            repositories.extend(parsed.repositories);
        }

        repositories
    }

    /// Searches the index by keyword.
    ///
    /// `page` is 1-based. Pages outside the site's reachable window of
    /// [`MAX_PAGE`] resolve to [`Page::empty`] without touching the network;
    /// fetch failures resolve to the same after logging a warning.
    pub async fn search(&self, query: &str, page: usize) -> Page<ArtifactEntry> {
        if !(1..=MAX_PAGE).contains(&page) {
            return Page::empty();
        }

        let html = match self.fetcher.search_page(query, page).await {
            Ok(html) => html,
            Err(error) => {
                warn!(%error, "search for {query:?} page {page} failed");
                return Page::empty();
            }
        };

        let parsed = SearchPage::parse(&html);

        Page {
            page_number: page,
            page_size: PAGE_SIZE,
            items: parsed.entries,
            total_pages: total_pages(parsed.total_results),
            total_items: parsed.total_results,
        }
    }
}

/// Derives the reachable page count from a result total.
///
/// The site reports totals far beyond what it will actually serve, so the
/// count is capped at [`MAX_PAGE`].
fn total_pages(total_results: usize) -> usize {
    total_results.div_ceil(PAGE_SIZE).min(MAX_PAGE)
}

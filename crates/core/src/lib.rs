pub mod api;
pub mod error;
pub mod fetch;
pub mod model;
pub mod parse;

pub use api::{MAX_PAGE, MvnRepository, PAGE_SIZE};
pub use error::{MvnRepoError, Result};
pub use fetch::{DEFAULT_BASE_URL, PageFetcher};
pub use model::{Artifact, ArtifactEntry, Page, Repository, Snippet, SnippetType};
pub use parse::{ArtifactPage, RepositoriesPage, SearchPage, parse_release_date, parse_versions};

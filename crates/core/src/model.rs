//! Typed records produced by the scraping API.
//!
//! Everything in this module is a plain value: constructed once from a
//! parse result, never mutated afterwards, serializable for downstream
//! consumers. The only record with a longer lifecycle is the repository
//! list, which [`crate::MvnRepository`] memoizes after its first full
//! retrieval.

use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

/// A single versioned component identified by group/artifact/version
/// coordinates.
///
/// The three coordinates are always populated (they come from the caller,
/// not the page); every other field is best-effort and may be absent or
/// empty when the page does not carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// License names in page order; empty when the page lists none.
    pub licenses: Vec<String>,
    pub homepage: Option<Url>,
    pub release_date: Option<NaiveDate>,
    /// Dependency-declaration snippets in [`SnippetType`] enumeration
    /// order, not document order.
    pub snippets: Vec<Snippet>,
}

/// A build-tool-specific text fragment declaring a dependency on an
/// artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub tool: SnippetType,
    pub declaration: String,
}

/// The closed set of build tools the site offers snippets for.
///
/// Each variant knows the element id its snippet is published under, so
/// extraction iterates [`SnippetType::ALL`] instead of guessing ids from
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnippetType {
    Maven,
    Gradle,
    Sbt,
    Ivy,
    Grape,
    Leiningen,
    Buildr,
}

impl SnippetType {
    /// All known build tools, in the order snippets are collected.
    pub const ALL: [SnippetType; 7] = [
        SnippetType::Maven,
        SnippetType::Gradle,
        SnippetType::Sbt,
        SnippetType::Ivy,
        SnippetType::Grape,
        SnippetType::Leiningen,
        SnippetType::Buildr,
    ];

    /// Element id of this tool's snippet input on the artifact page.
    pub const fn element_id(self) -> &'static str {
        match self {
            SnippetType::Maven => "maven-a",
            SnippetType::Gradle => "gradle-a",
            SnippetType::Sbt => "sbt-a",
            SnippetType::Ivy => "ivy-a",
            SnippetType::Grape => "grape-a",
            SnippetType::Leiningen => "leiningen-a",
            SnippetType::Buildr => "buildr-a",
        }
    }
}

/// A named, URI-addressed package host listed in the site's repository
/// directory.
///
/// Only fully-populated directory rows become `Repository` values; rows
/// missing an id, name, or URI are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub uri: Url,
}

/// One row of a keyword search result.
///
/// Rows missing coordinates, a description, or a release date are dropped
/// during parsing; `licenses` alone may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactEntry {
    pub group_id: String,
    pub artifact_id: String,
    pub licenses: Vec<String>,
    pub description: String,
    pub release_date: NaiveDate,
}

/// One page of a site-paginated result set.
///
/// `total_items` reports the site's own total, which can exceed
/// `items.len()` both because of pagination and because incomplete rows
/// are dropped from `items` while still counting toward the site total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub page_number: usize,
    pub page_size: usize,
    pub items: Vec<T>,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// The canonical zero-result sentinel: page 0, size 0, no items,
    /// no totals.
    ///
    /// Returned both for genuinely empty results and for failed or
    /// out-of-range requests.
    pub fn empty() -> Self {
        Self { page_number: 0, page_size: 0, items: Vec::new(), total_pages: 0, total_items: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_ids_follow_lowercased_names() {
        for tool in SnippetType::ALL {
            let id = tool.element_id();
            assert!(id.ends_with("-a"));
            assert_eq!(id, format!("{:?}-a", tool).to_lowercase());
        }
    }

    #[test]
    fn test_empty_page_is_all_zeros() {
        let page: Page<ArtifactEntry> = Page::empty();
        assert_eq!(page.page_number, 0);
        assert_eq!(page.page_size, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn test_artifact_serializes_coordinates_and_date() {
        let artifact = Artifact {
            group_id: "ch.qos.logback".to_string(),
            artifact_id: "logback-classic".to_string(),
            version: "1.2.10".to_string(),
            licenses: vec!["EPL 1.0".to_string(), "LGPL 2.1".to_string()],
            homepage: Some(Url::parse("http://logback.qos.ch").unwrap()),
            release_date: NaiveDate::from_ymd_opt(2021, 12, 23),
            snippets: vec![Snippet {
                tool: SnippetType::Maven,
                declaration: "<dependency>...</dependency>".to_string(),
            }],
        };

        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains(r#""group_id":"ch.qos.logback""#));
        assert!(json.contains("2021-12-23"));
        assert!(json.contains(r#""tool":"Maven""#));
    }
}

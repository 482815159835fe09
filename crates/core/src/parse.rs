//! HTML parsing for the known page kinds.
//!
//! Each entry point takes raw page markup and produces owned, typed data
//! via fixed CSS selectors. Parsing never fails: a selector that matches
//! nothing yields an empty collection or an absent scalar for that field,
//! and malformed date text degrades to `None` with a warning.
//!
//! The artifact page is the one place with two competing layouts. The
//! older markup publishes fields as header/value table rows; the newer
//! markup uses flat, non-tabular elements. [`ArtifactPage::parse`] decides
//! between them once, by whether the row selector matches anything, and
//! the two extraction paths never mix.
//!
//! # Example
//!
//! ```rust
//! use mvnrepo_core::parse::ArtifactPage;
//!
//! let html = r#"
//!     <div id="maincontent">
//!       <span class="lic">Apache 2.0</span>
//!       <a class="homepage" href="https://example.com">example.com</a>
//!     </div>
//! "#;
//! let page = ArtifactPage::parse(html);
//! assert_eq!(page.fields().licenses, vec!["Apache 2.0"]);
//! ```

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::model::{Artifact, ArtifactEntry, Repository, Snippet, SnippetType};

/// Row selector deciding between the two artifact-page layouts.
const ARTIFACT_TABLE_ROWS: &str = "#maincontent > table > tbody > tr";

/// Fixed selectors for the newer, non-tabular artifact layout.
const STRUCTURED_LICENSES: &str = "#maincontent span.lic";
const STRUCTURED_HOMEPAGE: &str = "#maincontent a.homepage";
const STRUCTURED_RELEASE_DATE: &str = "#maincontent span.release-date";

/// Container holding one snippet input per build tool.
const SNIPPET_BLOCK: &str = "#snippets";

/// Version anchors on the artifact's version-list page.
const VERSION_LINKS: &str = "#maincontent a.vbtn";

/// Row and field selectors shared by the repository directory and search
/// result listings.
const LISTING_ROWS: &str = "#maincontent div.im";
const LISTING_TITLE_LINK: &str = "h2.im-title a";
const LISTING_DESCRIPTION: &str = "div.im-description";
const LISTING_LICENSES: &str = "span.b.lic";
const LISTING_LAST_RELEASE: &str = "span.im-lastupdated";
const REPOSITORY_URI_LINK: &str = "div.im-description a";

/// Heading carrying the site-reported total search result count.
const SEARCH_RESULT_COUNT: &str = "#maincontent h2.search-count";

/// Release dates are printed with English month names, e.g. `Jan 5, 2022`.
const RELEASE_DATE_FORMAT: &str = "%b %d, %Y";

/// Compiles one of the fixed selector constants above.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector constants are valid CSS")
}

/// Concatenated, trimmed text of an element.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Field values pulled from an artifact page, before coordinates are
/// attached.
///
/// Both layouts normalize into this one shape, so everything downstream
/// of layout selection is layout-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtifactFields {
    pub licenses: Vec<String>,
    pub homepage: Option<Url>,
    pub release_date: Option<NaiveDate>,
    pub snippets: Vec<Snippet>,
}

/// A parsed artifact page, tagged with the layout that matched.
///
/// The tag records which extraction path ran; the payload is identical
/// either way. Use [`ArtifactPage::into_artifact`] to attach coordinates
/// and obtain the final record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactPage {
    /// Header/value table rows (older site markup).
    Legacy(ArtifactFields),
    /// Flat fixed selectors (newer site markup).
    Structured(ArtifactFields),
}

impl ArtifactPage {
    /// Parses an artifact page, selecting the layout by row presence.
    ///
    /// The legacy path runs if and only if the row selector matches at
    /// least one element; otherwise the structured selectors are read.
    /// Snippet extraction is layout-independent.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let row_selector = selector(ARTIFACT_TABLE_ROWS);
        let rows: Vec<ElementRef> = document.select(&row_selector).collect();
        let snippets = collect_snippets(&document);

        if rows.is_empty() {
            ArtifactPage::Structured(structured_fields(&document, snippets))
        } else {
            ArtifactPage::Legacy(legacy_fields(&rows, snippets))
        }
    }

    /// The normalized field values, independent of layout.
    pub fn fields(&self) -> &ArtifactFields {
        match self {
            ArtifactPage::Legacy(fields) | ArtifactPage::Structured(fields) => fields,
        }
    }

    /// Attaches caller-supplied coordinates and produces the final
    /// [`Artifact`] record.
    pub fn into_artifact(self, group_id: &str, artifact_id: &str, version: &str) -> Artifact {
        let fields = match self {
            ArtifactPage::Legacy(fields) | ArtifactPage::Structured(fields) => fields,
        };
        Artifact {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            licenses: fields.licenses,
            homepage: fields.homepage,
            release_date: fields.release_date,
            snippets: fields.snippets,
        }
    }
}

/// Extracts fields from header/value table rows.
///
/// Rows are matched by the lowercased text of their header cell; a row
/// that is absent simply leaves its field empty. When a header repeats,
/// the last row wins. License span texts are kept as printed, empty
/// ones included.
fn legacy_fields(rows: &[ElementRef<'_>], snippets: Vec<Snippet>) -> ArtifactFields {
    let header_selector = selector("th");
    let license_selector = selector("td span");
    let anchor_selector = selector("td a");
    let cell_selector = selector("td");

    let mut fields = ArtifactFields { snippets, ..Default::default() };
    for row in rows {
        let Some(header) = row.select(&header_selector).next() else {
            continue;
        };
        match text_of(header).to_lowercase().as_str() {
            "license" => {
                fields.licenses = row.select(&license_selector).map(text_of).collect();
            }
            "homepage" => {
                fields.homepage = row
                    .select(&anchor_selector)
                    .next()
                    .and_then(|anchor| anchor.value().attr("href"))
                    .and_then(|href| Url::parse(href).ok());
            }
            "date" => {
                fields.release_date = row
                    .select(&cell_selector)
                    .next()
                    .map(text_of)
                    .and_then(|text| parse_release_date(&text));
            }
            _ => {}
        }
    }
    fields
}

/// Extracts fields through the fixed selectors of the newer layout.
fn structured_fields(document: &Html, snippets: Vec<Snippet>) -> ArtifactFields {
    let license_selector = selector(STRUCTURED_LICENSES);
    let homepage_selector = selector(STRUCTURED_HOMEPAGE);
    let date_selector = selector(STRUCTURED_RELEASE_DATE);

    ArtifactFields {
        licenses: document.select(&license_selector).map(text_of).collect(),
        homepage: document
            .select(&homepage_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .and_then(|href| Url::parse(href).ok()),
        release_date: document
            .select(&date_selector)
            .next()
            .map(text_of)
            .and_then(|text| parse_release_date(&text)),
        snippets,
    }
}

/// Collects dependency-declaration snippets from the snippet block.
///
/// Iterates the closed [`SnippetType`] set in enumeration order and looks
/// up each tool's `<lowercased-name>-a` element; tools without one are
/// omitted. The value is the element's text for textareas, or its `value`
/// attribute otherwise.
fn collect_snippets(document: &Html) -> Vec<Snippet> {
    let block_selector = selector(SNIPPET_BLOCK);
    let Some(block) = document.select(&block_selector).next() else {
        return Vec::new();
    };

    let mut snippets = Vec::new();
    for tool in SnippetType::ALL {
        let id_selector = selector(&format!("#{}", tool.element_id()));
        let Some(input) = block.select(&id_selector).next() else {
            continue;
        };
        let declaration = if input.value().name().eq_ignore_ascii_case("textarea") {
            input.text().collect::<String>()
        } else {
            input.value().attr("value").unwrap_or_default().to_string()
        };
        snippets.push(Snippet { tool, declaration });
    }
    snippets
}

/// Parses the site's release-date text into a calendar date.
///
/// The text may be wrapped in parentheses (`(Jan 5, 2022)`); the pair is
/// stripped before parsing with the English month-name pattern. Malformed
/// text logs a warning and yields `None` instead of failing the page.
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed)
        .trim();

    match NaiveDate::parse_from_str(inner, RELEASE_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("failed to parse release date '{}': {}", trimmed, err);
            None
        }
    }
}

/// Extracts the version list from an artifact's version-list page.
///
/// The page embeds the full list; there is no pagination. Versions come
/// back in document order.
pub fn parse_versions(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let version_selector = selector(VERSION_LINKS);
    document
        .select(&version_selector)
        .map(text_of)
        .filter(|version| !version.is_empty())
        .collect()
}

/// One parsed page of the repository directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoriesPage {
    /// Directory rows before the completeness filter. Pagination stops on
    /// a page whose raw row count is zero, even if every row on an
    /// earlier page was dropped as incomplete.
    pub raw_rows: usize,
    pub repositories: Vec<Repository>,
}

impl RepositoriesPage {
    /// Parses one page of the repository directory, dropping rows that
    /// are missing an id, name, or URI.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let row_selector = selector(LISTING_ROWS);
        let rows: Vec<ElementRef> = document.select(&row_selector).collect();
        let repositories = rows.iter().copied().filter_map(repository_from_row).collect();
        Self { raw_rows: rows.len(), repositories }
    }
}

fn repository_from_row(row: ElementRef<'_>) -> Option<Repository> {
    let title_selector = selector(LISTING_TITLE_LINK);
    let uri_selector = selector(REPOSITORY_URI_LINK);

    let title = row.select(&title_selector).next()?;
    let name = text_of(title);
    if name.is_empty() {
        return None;
    }
    let id = title.value().attr("href").and_then(id_from_href)?;
    let uri = row
        .select(&uri_selector)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| Url::parse(href).ok())?;

    Some(Repository { id, name, uri })
}

/// A parsed page of keyword search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// The site's own total, before any rows are dropped as incomplete.
    pub total_results: usize,
    pub entries: Vec<ArtifactEntry>,
}

impl SearchPage {
    /// Parses one page of search results, dropping rows missing
    /// coordinates, a description, or a release date.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let count_selector = selector(SEARCH_RESULT_COUNT);
        let row_selector = selector(LISTING_ROWS);

        let total_results = document
            .select(&count_selector)
            .next()
            .map(|heading| leading_count(&text_of(heading)))
            .unwrap_or(0);
        let entries = document.select(&row_selector).filter_map(entry_from_row).collect();
        Self { total_results, entries }
    }
}

fn entry_from_row(row: ElementRef<'_>) -> Option<ArtifactEntry> {
    let title_selector = selector(LISTING_TITLE_LINK);
    let license_selector = selector(LISTING_LICENSES);
    let description_selector = selector(LISTING_DESCRIPTION);
    let date_selector = selector(LISTING_LAST_RELEASE);

    let title = row.select(&title_selector).next()?;
    let (group_id, artifact_id) = title.value().attr("href").and_then(coordinates_from_href)?;
    let licenses = row.select(&license_selector).map(text_of).collect();
    let description = row
        .select(&description_selector)
        .next()
        .map(text_of)
        .filter(|description| !description.is_empty())?;
    let release_date = row
        .select(&date_selector)
        .next()
        .map(text_of)
        .and_then(|text| parse_release_date(&text))?;

    Some(ArtifactEntry { group_id, artifact_id, licenses, description, release_date })
}

/// Splits an `/artifact/{group}/{artifact}` href into coordinates.
fn coordinates_from_href(href: &str) -> Option<(String, String)> {
    let mut segments = href.strip_prefix("/artifact/")?.split('/');
    let group = segments.next()?;
    let artifact = segments.next()?;
    if group.is_empty() || artifact.is_empty() {
        return None;
    }
    Some((group.to_string(), artifact.to_string()))
}

/// Takes the trailing path segment of a repository href as its id.
fn id_from_href(href: &str) -> Option<String> {
    href.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Pulls the first integer (commas tolerated) out of heading text such as
/// `Found 2,048 results`.
fn leading_count(text: &str) -> usize {
    let digits = Regex::new(r"\d[\d,]*").unwrap();
    digits
        .find(text)
        .map(|m| m.as_str().replace(',', ""))
        .and_then(|number| number.parse().ok())
        .unwrap_or(0)
}

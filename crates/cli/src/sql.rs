//! SQL emission for resolved artifacts.
//!
//! The output feeds a downstream loader that expects one `UPDATE` per
//! artifact and MySQL-style backslash escaping for single quotes.

use mvnrepo_core::Artifact;

/// Escapes single quotes in a value destined for a quoted SQL literal.
fn escape(value: &str) -> String {
    value.replace('\'', "\\'")
}

/// Renders the statement recording an artifact's licenses and homepage.
///
/// Licenses are joined with commas; an absent homepage renders as the
/// empty string rather than `NULL`.
pub fn update_statement(artifact: &Artifact) -> String {
    let licenses = escape(&artifact.licenses.join(","));
    let link = artifact
        .homepage
        .as_ref()
        .map(|url| escape(url.as_str()))
        .unwrap_or_default();

    format!(
        "UPDATE libraries SET licenses = '{}', link = '{}' WHERE groupid = '{}' AND artifactid = '{}' AND version = '{}';",
        licenses,
        link,
        escape(&artifact.group_id),
        escape(&artifact.artifact_id),
        escape(&artifact.version),
    )
}

/// Splits a `group,artifact,version` input line into coordinates.
///
/// Fields are taken as-is, without trimming. Extra comma-separated fields
/// are ignored; lines with fewer than three are rejected.
pub fn split_coordinates(line: &str) -> Option<(&str, &str, &str)> {
    let mut parts = line.split(',');
    let group_id = parts.next()?;
    let artifact_id = parts.next()?;
    let version = parts.next()?;
    Some((group_id, artifact_id, version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn artifact(licenses: &[&str], homepage: Option<&str>) -> Artifact {
        Artifact {
            group_id: "ch.qos.logback".to_string(),
            artifact_id: "logback-classic".to_string(),
            version: "1.2.10".to_string(),
            licenses: licenses.iter().map(|l| l.to_string()).collect(),
            homepage: homepage.map(|url| Url::parse(url).unwrap()),
            release_date: None,
            snippets: Vec::new(),
        }
    }

    #[test]
    fn test_update_statement_joins_licenses_with_commas() {
        let statement = update_statement(&artifact(
            &["EPL 1.0", "LGPL 2.1"],
            Some("http://logback.qos.ch"),
        ));

        assert_eq!(
            statement,
            "UPDATE libraries SET licenses = 'EPL 1.0,LGPL 2.1', link = 'http://logback.qos.ch/' \
             WHERE groupid = 'ch.qos.logback' AND artifactid = 'logback-classic' AND version = '1.2.10';"
        );
    }

    #[test]
    fn test_update_statement_renders_absent_homepage_empty() {
        let statement = update_statement(&artifact(&[], None));
        assert!(statement.contains("licenses = '', link = ''"));
    }

    #[test]
    fn test_update_statement_escapes_single_quotes() {
        let statement = update_statement(&artifact(&["Programmer's General License"], None));
        assert!(statement.contains(r"licenses = 'Programmer\'s General License'"));
    }

    #[test]
    fn test_split_coordinates_takes_first_three_fields() {
        assert_eq!(
            split_coordinates("ch.qos.logback,logback-classic,1.2.10"),
            Some(("ch.qos.logback", "logback-classic", "1.2.10"))
        );
        assert_eq!(
            split_coordinates("g,a,v,extra"),
            Some(("g", "a", "v"))
        );
    }

    #[test]
    fn test_split_coordinates_does_not_trim() {
        assert_eq!(
            split_coordinates(" g , a ,v"),
            Some((" g ", " a ", "v"))
        );
    }

    #[test]
    fn test_split_coordinates_rejects_short_lines() {
        assert_eq!(split_coordinates("only,two"), None);
        assert_eq!(split_coordinates("one"), None);
    }
}

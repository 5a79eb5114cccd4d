//! Pass 1: learn which documents exist and what they are called

use crate::config::MigrationConfig;
use crate::context::ConversionContext;
use crate::corpus::list_documents;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

/// `title: X` front-matter lines and `title:: X` property lines
static TITLE_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^title::?[ \t]*(.+)$").expect("title property regex"));

static FIRST_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("first heading regex"));

/// Best title found in `content`: an explicit title property, else the first
/// level-one heading.
pub fn extract_title(content: &str) -> Option<String> {
    [&*TITLE_PROPERTY, &*FIRST_HEADING].into_iter().find_map(|re| {
        re.captures(content)
            .map(|caps| caps[1].trim().to_string())
            .filter(|title| !title.is_empty())
    })
}

/// Register every source document as known, with an identifier and title.
///
/// Unreadable files still count as known, titled by their file name.
pub fn scan_existing(config: &MigrationConfig, cx: &mut ConversionContext) {
    info!("=== PASS 1: Scanning existing pages ===");

    for document in list_documents(config) {
        let title = match document.read() {
            Ok(content) => extract_title(&content).unwrap_or_else(|| document.name.clone()),
            Err(e) => {
                cx.report.warn(format!(
                    "Could not read {} while scanning: {e}",
                    document.path.display()
                ));
                document.name.clone()
            }
        };

        debug!(page = %document.name, %title, "found existing page");
        cx.register_known(&document.name, title);
    }

    info!(pages = cx.known_names().len(), "scan complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("---\ntitle: Front Matter\n---\n# Heading", Some("Front Matter"); "front matter wins")]
    #[test_case("TITLE: Loud\n", Some("Loud"); "case insensitive key")]
    #[test_case("title:: Inline Prop\n- body", Some("Inline Prop"); "inline property")]
    #[test_case("intro\n# First\n# Second", Some("First"); "first heading")]
    #[test_case("## Only subheading", None; "subheadings ignored")]
    #[test_case("- just bullets", None; "no title")]
    fn test_extract_title(content: &str, expected: Option<&str>) {
        assert_eq!(extract_title(content).as_deref(), expected);
    }

    #[test]
    fn test_scan_registers_known_pages() {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("pages");
        std::fs::create_dir_all(&pages).unwrap();
        std::fs::write(pages.join("alpha.md"), "title:: The Alpha\n- x").unwrap();
        std::fs::write(pages.join("beta.md"), "- no title").unwrap();

        let config = MigrationConfig::new(dir.path(), dir.path().join("out"));
        let mut cx = ConversionContext::new();
        scan_existing(&config, &mut cx);

        assert!(cx.is_known("alpha") && cx.is_known("beta"));
        assert_eq!(cx.title_for("alpha"), Some("The Alpha"));
        assert_eq!(cx.title_for("beta"), Some("beta"));
        assert!(cx.registry.contains("alpha", crate::registry::IdKind::Document));
        assert!(cx.report.warnings.is_empty());
    }
}

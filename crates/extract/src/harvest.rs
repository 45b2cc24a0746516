//! Hyperlink harvesting for index pages.

use crate::consts::{ANCHOR_SELECTOR, FRAGMENT, IRRELEVANT_PREFIXES, MIN_NAME_CHARS, PARENT_DIR};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use scraper::Html;
use std::path::Path;
use tracing::instrument;

/// A prospective search index entry taken from a single hyperlink.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    /// Visible link text, trimmed and without newlines.
    pub name: String,
    /// Link target, resolved against the page the link was found on.
    pub path: String,
}

/// Everything harvested from one index page, in document order.
#[derive(Debug, Default)]
pub struct Harvest {
    pub candidates: Vec<Candidate>,
    /// Hyperlinks that were not relevant enough to become candidates.
    pub skipped: usize,
}

/// Normalizes the visible text of a link into an entry name.
///
/// Surrounding whitespace is trimmed first, then any newlines left inside
/// the text are removed (without substituting a space).
///
/// ```
/// use docsets_extract::link_name;
/// assert_eq!(link_name("  llvm-ar -\n archiver \n"), "llvm-ar - archiver");
/// ```
pub fn link_name(text: &str) -> String {
    text.trim().replace('\n', "")
}

/// Returns `true` if a link with the given (normalized) name and target
/// should become a search index entry.
///
/// Links are discarded when they have no target, when the name is two
/// characters or shorter, or when the target starts with `http` or
/// `index.html`. The latter is a prefix check, so `index.html5` is discarded
/// as well.
pub fn is_relevant(name: &str, href: Option<&str>) -> bool {
    let Some(href) = href else {
        return false;
    };
    name.chars().count() > MIN_NAME_CHARS && !IRRELEVANT_PREFIXES.iter().any(|prefix| href.starts_with(prefix))
}

/// Resolves a link target found on the index page at `page_path` (relative
/// to the documentation root).
///
/// - A single leading `../` is stripped; the remainder is not validated.
/// - A bare fragment (`#section`) points back at the index page itself, so
///   it is prefixed with the file name of `page_path`.
/// - Anything else is returned unchanged.
///
/// ```
/// use docsets_extract::resolve;
/// assert_eq!(resolve("../Foo.html", "CommandGuide/index.html"), "Foo.html");
/// assert_eq!(resolve("#section1", "CommandGuide/index.html"), "index.html#section1");
/// assert_eq!(resolve("llvm-ar.html", "CommandGuide/index.html"), "llvm-ar.html");
/// ```
pub fn resolve(href: &str, page_path: &str) -> String {
    if let Some(rest) = href.strip_prefix(PARENT_DIR) {
        return rest.to_string();
    }
    if href.starts_with(FRAGMENT) {
        let file_name = page_path.rsplit('/').next().unwrap_or(page_path);
        return format!("{file_name}{href}");
    }
    href.to_string()
}

/// Harvests search index candidates from the HTML of the index page located
/// at `page_path` (relative to the documentation root).
///
/// Parsing is lenient; broken markup yields fewer candidates, never an error.
#[instrument(skip(html), fields(html_size = html.len(), candidates, skipped))]
pub fn harvest(html: &str, page_path: &str) -> Harvest {
    let document = Html::parse_document(html);
    let mut harvest = Harvest::default();
    for anchor in document.select(&ANCHOR_SELECTOR) {
        let name = link_name(&anchor.text().collect::<String>());
        let href = anchor.value().attr("href");
        match href {
            Some(href) if is_relevant(&name, Some(href)) => {
                harvest.candidates.push(Candidate { name, path: resolve(href, page_path) });
            },
            _ => {
                tracing::trace!(name = %name, href = ?href, "Skipping irrelevant link");
                harvest.skipped += 1;
            },
        }
    }
    tracing::Span::current().record("candidates", harvest.candidates.len());
    tracing::Span::current().record("skipped", harvest.skipped);
    harvest
}

/// Reads `documents/page_path` and [harvests](harvest) it.
///
/// Accepts pages that are not valid UTF-8; invalid byte sequences are
/// replaced with U+FFFD before parsing.
pub fn harvest_file(documents: impl AsRef<Path>, page_path: &str) -> Result<Harvest> {
    let path = documents.as_ref().join(page_path);
    if !path.is_file() {
        exn::bail!(ErrorKind::PageNotFound(path));
    }
    let bytes = std::fs::read(&path).or_raise(|| ErrorKind::Unreadable(path.clone()))?;
    Ok(harvest(&String::from_utf8_lossy(&bytes), page_path))
}

use crate::Package;
use crate::error::{ErrorKind, Result};
use derive_more::Display;
use docsets_extract::harvest_file;
use docsets_index::{Entry, Insertion, SearchIndex};
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;

/// Tally of the candidates offered to a search index.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[display("{inserted} inserted, {duplicates} duplicates, {rejected} rejected, {skipped} links skipped")]
pub struct Report {
    pub inserted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    /// Anchors on index pages that were never offered (no target, too short
    /// a name, or pointing outside the bundle).
    pub skipped: usize,
}
impl Report {
    fn record(&mut self, outcome: Insertion) {
        match outcome {
            Insertion::Inserted => self.inserted += 1,
            Insertion::Duplicate(_) => self.duplicates += 1,
            Insertion::Rejected => self.rejected += 1,
        }
    }

    /// Number of candidates offered to the index.
    pub fn offered(&self) -> usize {
        self.inserted + self.duplicates + self.rejected
    }
}

/// Fill a search index from a package's page lists.
///
/// Single pages go in first and verbatim, so they win any name or path
/// collision with harvested links. Then every anchor of every index page
/// (read from `documents`) is offered in document order, typed after the page
/// it was found on. A missing index page is fatal; individual entries that
/// cannot be inserted are only counted.
#[instrument(skip_all, fields(package = package.name, documents = %documents.as_ref().display()))]
pub async fn populate(index: &SearchIndex, package: &Package, documents: impl AsRef<Path>) -> Result<Report> {
    let documents = documents.as_ref();
    let mut report = Report::default();

    for page in package.single_pages {
        report.record(index.insert(&Entry::new(page.name, page.kind, page.path)).await);
    }

    for page in package.index_pages {
        let harvest = harvest_file(documents, page.path).or_raise(|| ErrorKind::Harvest(page.path.to_string()))?;
        tracing::debug!(page = page.path, candidates = harvest.candidates.len(), skipped = harvest.skipped, "Harvested index page");
        report.skipped += harvest.skipped;
        for candidate in harvest.candidates {
            report.record(index.insert(&Entry::new(candidate.name, page.kind, candidate.path)).await);
        }
    }

    tracing::info!(%report, "Populated search index");
    Ok(report)
}

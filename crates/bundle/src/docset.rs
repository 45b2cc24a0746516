use crate::error::{ErrorKind, Result};
use crate::populate::{Report, populate};
use crate::{Layout, Package, assemble, metadata};
use docsets_index::{Database, SearchIndex};
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;

/// A finished documentation docset.
#[derive(Debug)]
pub struct Docset {
    pub layout: Layout,
    pub report: Report,
}

/// Build the documentation docset of `package` inside `parent`.
///
/// The generated HTML tree at `html` is moved into a fresh bundle, the
/// search index is created and populated from the package's pages, and the
/// manifest is written. The index is closed before returning, so the bundle
/// is complete and ready to be archived.
#[instrument(skip_all, fields(package = package.name, parent = %parent.as_ref().display()))]
pub async fn build_docset(
    package: &Package,
    html: impl AsRef<Path>,
    icon: impl AsRef<Path>,
    parent: impl AsRef<Path>,
) -> Result<Docset> {
    let layout = Layout::new(parent, package.docset);
    assemble::assemble(&layout, html, icon)?;

    let db = Database::connect(layout.index()).await.or_raise(|| ErrorKind::Index)?;
    let report = populate(&SearchIndex::from(&db), package, layout.documents()).await;
    db.close().await;
    let report = report?;

    metadata::write_manifest(&layout)?;
    tracing::info!(bundle = %layout.root().display(), "Built docset");
    Ok(Docset { layout, report })
}

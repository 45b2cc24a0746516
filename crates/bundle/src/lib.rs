//! Dash docset bundles.
//!
//! A docset is a directory bundle with a fixed layout (see [`Layout`]): the
//! HTML documentation, a SQLite search index Dash queries, a property-list
//! manifest and an icon. This crate assembles documentation docsets from
//! generated HTML, adopts the API docsets Doxygen produces, and archives
//! finished bundles.

mod archive;
pub mod assemble;
mod docset;
pub mod error;
mod layout;
pub mod metadata;
mod package;
mod populate;

pub use crate::archive::archive;
pub use crate::docset::{Docset, build_docset};
pub use crate::layout::Layout;
pub use crate::package::{IndexPage, Package, SinglePage, VERSION, fallback_url};
pub use crate::populate::{Report, populate};
pub use docsets_compress::Compression;

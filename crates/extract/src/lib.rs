//! Search index candidates from generated HTML.
//!
//! An index page (for example `CommandGuide/index.html`) links to the pages
//! that deserve their own entry in a docset's search index. [`harvest`] turns
//! every relevant hyperlink on such a page into a [`Candidate`]: the link's
//! visible text becomes the entry name, and its target (resolved against the
//! index page) becomes the entry path.

mod consts;
pub mod error;
mod harvest;

pub use crate::harvest::{Candidate, Harvest, harvest, harvest_file, is_relevant, link_name, resolve};

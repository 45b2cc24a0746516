//! Release source tarballs: fetching, verification and extraction.

mod checksum;
pub mod error;
mod fetch;
mod unpack;

pub use crate::checksum::{md5_file, verify};
pub use crate::fetch::{Fetched, Fetcher};
pub use crate::unpack::extract;

//! External build tools.
//!
//! Generating the HTML manuals and the API reference is delegated to the
//! projects' own build systems (`make`, `cmake`, Doxygen via make targets),
//! and source archives are unpacked with `tar`. Every invocation blocks until
//! the tool exits; a non-zero exit status is fatal.

mod build;
pub mod error;
mod tool;
mod workdir;

pub use crate::build::{cmake, make, untar};
pub use crate::tool::Tool;
pub use crate::workdir::WorkingDir;

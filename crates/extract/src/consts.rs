use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

// Every hyperlink element; links without a target are filtered out afterwards
// so they still count towards the skipped total.
selector!(ANCHOR_SELECTOR, "a");

/// Link targets starting with any of these never become index entries.
pub(crate) const IRRELEVANT_PREFIXES: [&str; 2] = ["http", "index.html"];
/// Names with this many characters or fewer are too short to be useful.
pub(crate) const MIN_NAME_CHARS: usize = 2;
pub(crate) const PARENT_DIR: &str = "../";
pub(crate) const FRAGMENT: char = '#';

//! Bundle manifests and generator configuration.
//!
//! The documentation docset's `Info.plist` is rendered from an embedded
//! [upon] template. The API docset's manifest is produced by Doxygen and only
//! patched: Doxygen names every bundle `doxygen`, which would make the LLVM
//! and Clang API docsets collide in Dash.

use crate::error::{ErrorKind, Result};
use crate::package::{Package, VERSION, fallback_url};
use crate::Layout;
use exn::{OptionExt, ResultExt};
use rust_embed::Embed;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tracing::instrument;
use upon::{Engine, Value, fmt as upon_fmt};

const MANIFEST_TEMPLATE: &str = "Info.plist";
const INDEX_FILE: &str = "index.html";
const DOXYGEN_PLACEHOLDER: &str = "<string>doxygen</string>";

#[derive(Embed)]
#[folder = "../../assets/docset/"]
struct Assets;

/// Render the manifest of a documentation docset.
pub fn render_manifest(base_name: &str) -> Result<String> {
    let source = Assets::get(MANIFEST_TEMPLATE).ok_or_raise(|| ErrorKind::AssetNotFound(MANIFEST_TEMPLATE))?;
    let source = String::from_utf8_lossy(&source.data).into_owned();
    let mut engine = Engine::new();
    engine.add_formatter("xml", xml_formatter);
    let template = engine.compile(source).or_raise(|| ErrorKind::Template)?;
    template
        .render(
            &engine,
            upon::value! {
                name: base_name,
                index: INDEX_FILE,
                fallback: fallback_url(),
            },
        )
        .to_string()
        .or_raise(|| ErrorKind::Template)
}

/// Escapes the characters that are special in XML text content.
fn xml_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
    match value {
        Value::String(s) => {
            for c in s.chars() {
                match c {
                    '&' => f.write_str("&amp;")?,
                    '<' => f.write_str("&lt;")?,
                    '>' => f.write_str("&gt;")?,
                    c => f.write_char(c)?,
                }
            }
        },
        v => upon_fmt::default(f, v)?,
    };
    Ok(())
}

/// Write `Contents/Info.plist` for a documentation docset.
///
/// The bundle identifier, name and platform family are all the bundle name
/// up to its first dot (`LLVM_5.docset` becomes `LLVM_5`).
#[instrument(skip_all, fields(bundle = %layout.root().display()))]
pub fn write_manifest(layout: &Layout) -> Result<()> {
    if !layout.contents().is_dir() {
        exn::bail!(ErrorKind::MissingBundle(layout.root().to_path_buf()));
    }
    let manifest = render_manifest(&layout.base_name())?;
    fs::write(layout.plist(), manifest).or_raise(|| ErrorKind::Io)
}

/// Replace Doxygen's generic bundle name in a generated manifest.
///
/// Every line mentioning `<string>doxygen</string>` becomes
/// `<string><name>-api</string>`; all other lines are kept as they are.
#[instrument(skip_all, fields(plist = %plist.as_ref().display(), package = name))]
pub fn patch_api_manifest(plist: impl AsRef<Path>, name: &str) -> Result<()> {
    let replacement = format!("<string>{}-api</string>", name.to_lowercase());
    rewrite_lines(plist, |line| line.contains(DOXYGEN_PLACEHOLDER).then(|| replacement.clone()))
}

/// Configure Doxygen (`docs/doxygen.cfg.in`) to emit a docset for `package`.
#[instrument(skip_all, fields(config = %config.as_ref().display(), package = package.name))]
pub fn patch_doxygen_config(config: impl AsRef<Path>, package: &Package) -> Result<()> {
    let name = package.name.to_lowercase();
    let settings = [
        ("GENERATE_DOCSET", "YES".to_string()),
        ("PROJECT_NAME", format!("{} {VERSION} C++ API", package.display)),
        ("LOOKUP_CACHE_SIZE", "3".to_string()),
        ("DOCSET_BUNDLE_ID", format!("org.llvm.{name}")),
        ("ECLIPSE_DOC_ID", format!("org.llvm.{name}")),
    ];
    rewrite_lines(config, |line| {
        settings
            .iter()
            .find(|(key, _)| line.starts_with(key))
            .map(|(key, value)| format!("{key} = {value}"))
    })
}

/// Rewrite a text file line by line. Lines for which `replace` returns
/// `Some` are substituted (and terminated with a newline); the rest are
/// copied unchanged.
fn rewrite_lines(path: impl AsRef<Path>, replace: impl Fn(&str) -> Option<String>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_file() {
        exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
    }
    let original = fs::read_to_string(path).or_raise(|| ErrorKind::Io)?;
    let mut patched = String::with_capacity(original.len());
    let mut changed = 0usize;
    for line in original.split_inclusive('\n') {
        match replace(line) {
            Some(replacement) => {
                changed += 1;
                patched.push_str(&replacement);
                patched.push('\n');
            },
            None => patched.push_str(line),
        }
    }
    tracing::debug!(lines = changed, "Patched file");
    fs::write(path, patched).or_raise(|| ErrorKind::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_manifest() {
        let manifest = render_manifest("LLVM_5").unwrap();
        assert!(manifest.starts_with("<?xml"));
        assert_eq!(manifest.matches("<string>LLVM_5</string>").count(), 3);
        assert!(manifest.contains("<key>isDashDocset</key>\n    <true/>"));
        assert!(manifest.contains("<key>isJavaScriptEnabled</key>\n    <true/>"));
        assert!(manifest.contains("<string>index.html</string>"));
        assert!(manifest.contains("<string>http://releases.llvm.org/5.0.1/docs/</string>"));
    }

    #[test]
    fn test_render_manifest_escapes_name() {
        let manifest = render_manifest("A&B<C>").unwrap();
        assert!(manifest.contains("<string>A&amp;B&lt;C&gt;</string>"));
    }

    #[test]
    fn test_write_manifest_requires_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path(), "Clang_5.docset");
        let err = write_manifest(&layout).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingBundle(_)));

        fs::create_dir_all(layout.contents()).unwrap();
        write_manifest(&layout).unwrap();
        let written = fs::read_to_string(layout.plist()).unwrap();
        assert!(written.contains("<string>Clang_5</string>"));
    }

    #[test]
    fn test_patch_doxygen_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("doxygen.cfg.in");
        fs::write(
            &config,
            "# Doxyfile\nPROJECT_NAME           = LLVM\nGENERATE_DOCSET        = NO\nDOCSET_BUNDLE_ID       = org.doxygen.Project\n\
             ECLIPSE_DOC_ID         = org.doxygen.Project\nLOOKUP_CACHE_SIZE      = 0\nINPUT = @abs_top_srcdir@/include",
        )
        .unwrap();

        patch_doxygen_config(&config, &Package::CLANG).unwrap();

        assert_eq!(
            fs::read_to_string(&config).unwrap(),
            "# Doxyfile\nPROJECT_NAME = Clang 5.0.1 C++ API\nGENERATE_DOCSET = YES\nDOCSET_BUNDLE_ID = org.llvm.clang\n\
             ECLIPSE_DOC_ID = org.llvm.clang\nLOOKUP_CACHE_SIZE = 3\nINPUT = @abs_top_srcdir@/include"
        );
    }

    #[test]
    fn test_patch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = patch_api_manifest(dir.path().join("Info.plist"), "llvm").unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingFile(_)));
    }
}

//! Placement of generated documentation into a bundle.

use crate::error::{ErrorKind, Result};
use crate::{Layout, Package, metadata};
use exn::ResultExt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::instrument;

/// Create a fresh bundle skeleton and move the generated HTML tree into it.
///
/// Any previous bundle at the same location is deleted first. The HTML
/// directory is consumed: it ends up as the bundle's `Documents` directory.
#[instrument(skip_all, fields(bundle = %layout.root().display(), html = %html.as_ref().display()))]
pub fn assemble(layout: &Layout, html: impl AsRef<Path>, icon: impl AsRef<Path>) -> Result<()> {
    let html = html.as_ref();
    if !html.is_dir() {
        exn::bail!(ErrorKind::MissingHtml(html.to_path_buf()));
    }
    remove_stale(layout.root())?;
    fs::create_dir_all(layout.resources()).or_raise(|| ErrorKind::Io)?;
    move_tree(html, layout.documents())?;
    attach_icon(layout, icon)
}

/// Adopt a bundle produced by an external generator (Doxygen) as the API
/// docset of `package`, replacing any previous one.
#[instrument(skip_all, fields(package = package.name, generated = %generated.as_ref().display()))]
pub fn adopt(package: &Package, generated: impl AsRef<Path>, parent: impl AsRef<Path>, icon: impl AsRef<Path>) -> Result<Layout> {
    let generated = generated.as_ref();
    if !generated.is_dir() {
        exn::bail!(ErrorKind::MissingBundle(generated.to_path_buf()));
    }
    let layout = Layout::new(parent, package.api_docset);
    remove_stale(layout.root())?;
    move_tree(generated, layout.root())?;
    attach_icon(&layout, icon)?;
    metadata::patch_api_manifest(layout.plist(), package.name)?;
    Ok(layout)
}

/// Copy the icon into the bundle root.
pub fn attach_icon(layout: &Layout, icon: impl AsRef<Path>) -> Result<()> {
    let icon = icon.as_ref();
    if !icon.is_file() {
        exn::bail!(ErrorKind::MissingIcon(icon.to_path_buf()));
    }
    fs::copy(icon, layout.icon()).or_raise(|| ErrorKind::Io)?;
    Ok(())
}

/// Delete a directory tree if it exists.
pub fn remove_stale(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed stale directory");
            Ok(())
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).or_raise(|| ErrorKind::Io),
    }
}

/// Rename a directory, falling back to copy-then-delete when the rename
/// would cross filesystems.
fn move_tree(from: &Path, to: impl AsRef<Path>) -> Result<()> {
    let to = to.as_ref();
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(from = %from.display(), to = %to.display(), "Copying across filesystems");
            copy_tree(from, to).or_raise(|| ErrorKind::Io)?;
            fs::remove_dir_all(from).or_raise(|| ErrorKind::Io)
        },
        Err(e) => Err(e).or_raise(|| ErrorKind::Io),
    }
}

fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        let kind = entry.file_type()?;
        if kind.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else if kind.is_symlink() {
            copy_symlink(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_tree(root: &Path) -> std::path::PathBuf {
        let html = root.join("build/html");
        fs::create_dir_all(html.join("CommandGuide")).unwrap();
        fs::write(html.join("index.html"), "<html></html>").unwrap();
        fs::write(html.join("CommandGuide/index.html"), "<html></html>").unwrap();
        html
    }

    #[test]
    fn test_assemble_moves_html_and_icon() {
        let dir = tempfile::tempdir().unwrap();
        let html = html_tree(dir.path());
        let icon = dir.path().join("icon.png");
        fs::write(&icon, b"\x89PNG").unwrap();
        let layout = Layout::new(dir.path(), "LLVM_5.docset");

        assemble(&layout, &html, &icon).unwrap();

        assert!(!html.exists());
        assert!(layout.documents().join("CommandGuide/index.html").is_file());
        assert_eq!(fs::read(layout.icon()).unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_assemble_replaces_stale_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path(), "LLVM_5.docset");
        fs::create_dir_all(layout.documents()).unwrap();
        fs::write(layout.documents().join("Stale.html"), "old").unwrap();
        let icon = dir.path().join("icon.png");
        fs::write(&icon, b"icon").unwrap();

        assemble(&layout, html_tree(dir.path()), &icon).unwrap();

        assert!(!layout.documents().join("Stale.html").exists());
        assert!(layout.documents().join("index.html").is_file());
    }

    #[test]
    fn test_assemble_without_html_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path(), "LLVM_5.docset");
        let err = assemble(&layout, dir.path().join("missing"), dir.path().join("icon.png")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingHtml(_)));
        assert!(!layout.root().exists());
    }

    #[test]
    fn test_assemble_without_icon_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path(), "LLVM_5.docset");
        let err = assemble(&layout, html_tree(dir.path()), dir.path().join("icon.png")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingIcon(_)));
    }

    #[test]
    fn test_copy_tree() {
        let dir = tempfile::tempdir().unwrap();
        let html = html_tree(dir.path());
        let copy = dir.path().join("copy");
        copy_tree(&html, &copy).unwrap();
        assert!(copy.join("index.html").is_file());
        assert!(copy.join("CommandGuide/index.html").is_file());
    }

    #[test]
    fn test_adopt_generated_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("html/org.doxygen.Project.docset");
        fs::create_dir_all(generated.join("Contents/Resources/Documents")).unwrap();
        fs::write(
            generated.join("Contents/Info.plist"),
            "<dict>\n     <string>doxygen</string>\n     <key>CFBundleName</key>\n</dict>\n",
        )
        .unwrap();
        let icon = dir.path().join("icon.png");
        fs::write(&icon, b"icon").unwrap();

        let layout = adopt(&Package::CLANG, &generated, dir.path(), &icon).unwrap();

        assert_eq!(layout.root(), dir.path().join("Clang_API_5.docset"));
        assert!(!generated.exists());
        assert!(layout.icon().is_file());
        let plist = fs::read_to_string(layout.plist()).unwrap();
        assert_eq!(plist, "<dict>\n<string>clang-api</string>\n     <key>CFBundleName</key>\n</dict>\n");
    }
}

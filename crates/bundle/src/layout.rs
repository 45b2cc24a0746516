use std::path::{Path, PathBuf};

/// Fixed on-disk layout of a docset bundle.
///
/// ```text
/// <Name>.docset/
/// ├── icon.png
/// └── Contents/
///     ├── Info.plist
///     └── Resources/
///         ├── docSet.dsidx
///         └── Documents/
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    root: PathBuf,
}
impl Layout {
    pub fn new(parent: impl AsRef<Path>, bundle: impl AsRef<Path>) -> Self {
        Self { root: parent.as_ref().join(bundle) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Bundle name without the `.docset` extension (or any other dotted suffix).
    pub fn base_name(&self) -> String {
        let name = self.root.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        name.split('.').next().unwrap_or_default().to_string()
    }

    pub fn contents(&self) -> PathBuf {
        self.root.join("Contents")
    }

    pub fn resources(&self) -> PathBuf {
        self.contents().join("Resources")
    }

    pub fn documents(&self) -> PathBuf {
        self.resources().join("Documents")
    }

    pub fn index(&self) -> PathBuf {
        self.resources().join("docSet.dsidx")
    }

    pub fn plist(&self) -> PathBuf {
        self.contents().join("Info.plist")
    }

    pub fn icon(&self) -> PathBuf {
        self.root.join("icon.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let layout = Layout::new("/work", "LLVM_5.docset");
        assert_eq!(layout.root(), Path::new("/work/LLVM_5.docset"));
        assert_eq!(layout.base_name(), "LLVM_5");
        assert_eq!(layout.plist(), Path::new("/work/LLVM_5.docset/Contents/Info.plist"));
        assert_eq!(layout.index(), Path::new("/work/LLVM_5.docset/Contents/Resources/docSet.dsidx"));
        assert_eq!(layout.documents(), Path::new("/work/LLVM_5.docset/Contents/Resources/Documents"));
        assert_eq!(layout.icon(), Path::new("/work/LLVM_5.docset/icon.png"));
    }
}

//! The build steps, in the order `build` runs them.
//!
//! All paths are resolved against the configured working directory, which
//! holds the tarballs, the extracted sources, `build/` and the bundles.

use crate::error::{ErrorKind, Result};
use docsets_bundle::{Compression, Package, VERSION, archive, assemble, build_docset, metadata};
use docsets_config::Config;
use docsets_source::Fetcher;
use docsets_toolchain::{cmake, make};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tracing::instrument;

const BUILD_DIR: &str = "build";
const DOXYGEN_BUNDLE: &str = "org.doxygen.Project.docset";

#[derive(Debug)]
pub struct Pipeline {
    root: PathBuf,
    icon: PathBuf,
    mirror: String,
    compression: Compression,
    api: bool,
}
impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            root: std::path::absolute(&config.workdir).or_raise(|| ErrorKind::Io)?,
            icon: std::path::absolute(&config.icon).or_raise(|| ErrorKind::Io)?,
            mirror: config.mirror,
            compression: config.compression,
            api: config.api,
        })
    }

    fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// Bundles this pipeline produces for a package.
    fn bundles(&self, package: &Package) -> Vec<&'static str> {
        if self.api { package.bundles().to_vec() } else { vec![package.docset] }
    }

    /// Everything: clean, fetch, extract, generate and archive.
    pub async fn build(&self) -> Result<()> {
        self.clean()?;
        self.fetch().await?;
        self.extract()?;
        self.docs().await?;
        if self.api {
            self.api()?;
        }
        self.compress()?;
        Ok(())
    }

    /// Remove the bundles of every package and the build directory.
    #[instrument(skip(self))]
    pub fn clean(&self) -> Result<()> {
        for package in Package::ALL {
            for bundle in package.bundles() {
                assemble::remove_stale(self.root.join(bundle)).or_raise(|| ErrorKind::Clean)?;
            }
        }
        assemble::remove_stale(self.build_dir()).or_raise(|| ErrorKind::Clean)
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<()> {
        let fetcher = Fetcher::new(&self.mirror, VERSION).or_raise(|| ErrorKind::Io)?;
        for package in Package::ALL {
            let fetched = fetcher
                .ensure(&self.root, &package.tarball(), package.md5)
                .await
                .or_raise(|| ErrorKind::Fetch(package.name))?;
            tracing::info!(package = package.name, tarball = %fetched.path().display(), "Verified source tarball");
        }
        Ok(())
    }

    /// Unpack every tarball. LLVM goes first since Clang's sources are
    /// placed inside its tree.
    #[instrument(skip(self))]
    pub fn extract(&self) -> Result<()> {
        for package in Package::ALL {
            docsets_source::extract(self.root.join(package.tarball()), self.root.join(package.src_dir))
                .or_raise(|| ErrorKind::Extract(package.name))?;
        }
        Ok(())
    }

    /// Generate the Sphinx manuals and build the documentation docsets.
    #[instrument(skip(self))]
    pub async fn docs(&self) -> Result<()> {
        for package in Package::ALL {
            let build_dir = self.build_dir().join(format!("{}-{VERSION}-docs", package.name));
            let makefile = self.root.join(package.src_dir).join("docs").join("Makefile.sphinx");
            make(makefile, None, Some(build_dir.as_path())).or_raise(|| ErrorKind::Generate(package.name))?;
            self.docset(package, build_dir.join("html")).await?;
        }
        Ok(())
    }

    /// Build the documentation docset of one package from generated HTML.
    pub async fn docset(&self, package: &Package, html: impl AsRef<Path>) -> Result<PathBuf> {
        let docset =
            build_docset(package, html, &self.icon, &self.root).await.or_raise(|| ErrorKind::Docset(package.name))?;
        let report = docset.report;
        if report.rejected > 0 {
            tracing::warn!(package = package.name, rejected = report.rejected, offered = report.offered(), "Some entries were not indexed");
        }
        Ok(docset.layout.root().to_path_buf())
    }

    /// Generate the Doxygen API reference and adopt its docsets.
    #[instrument(skip(self))]
    pub fn api(&self) -> Result<()> {
        for package in Package::ALL {
            let config = self.root.join(package.src_dir).join("docs").join("doxygen.cfg.in");
            metadata::patch_doxygen_config(config, package).or_raise(|| ErrorKind::Api(package.name))?;
        }

        let build_dir = self.build_dir().join(format!("doxygen-{VERSION}"));
        cmake(self.root.join(Package::LLVM.src_dir), &build_dir, &["LLVM_ENABLE_DOXYGEN=ON"])
            .or_raise(|| ErrorKind::Generate(Package::LLVM.name))?;

        for package in Package::ALL {
            let target = format!("doxygen-{}", package.name);
            make(build_dir.join("Makefile"), Some(target.as_str()), None).or_raise(|| ErrorKind::Generate(package.name))?;
            let html_dir = doxygen_html_dir(&build_dir, package);
            make(html_dir.join("Makefile"), None, None).or_raise(|| ErrorKind::Generate(package.name))?;
            assemble::adopt(package, html_dir.join(DOXYGEN_BUNDLE), &self.root, &self.icon)
                .or_raise(|| ErrorKind::Api(package.name))?;
        }
        Ok(())
    }

    /// Archive every bundle this pipeline produces.
    #[instrument(skip(self), fields(compression = %self.compression))]
    pub fn compress(&self) -> Result<Vec<PathBuf>> {
        let mut archives = Vec::new();
        for package in Package::ALL {
            for bundle in self.bundles(package) {
                archives.push(archive(self.root.join(bundle), self.compression).or_raise(|| ErrorKind::Compress(bundle))?);
            }
        }
        Ok(archives)
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }
}

/// Where Doxygen writes a package's HTML inside the CMake build tree: the
/// package's source directory relative to the LLVM tree, then `docs/doxygen/html`.
fn doxygen_html_dir(build_dir: &Path, package: &Package) -> PathBuf {
    let mut dir = build_dir.to_path_buf();
    dir.extend(package.src_dir.split('/').skip(1));
    dir.join("docs").join("doxygen").join("html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn pipeline(root: &Path, api: bool) -> Pipeline {
        Pipeline::new(Config {
            workdir: root.to_path_buf(),
            icon: root.join("icon.png"),
            mirror: "http://127.0.0.1:9".to_string(),
            compression: Compression::Gzip,
            api,
        })
        .unwrap()
    }

    #[rstest]
    #[case(&Package::LLVM, "build/doxygen-5.0.1/docs/doxygen/html")]
    #[case(&Package::CLANG, "build/doxygen-5.0.1/tools/clang/docs/doxygen/html")]
    fn test_doxygen_html_dir(#[case] package: &Package, #[case] expected: &str) {
        assert_eq!(doxygen_html_dir(Path::new("build/doxygen-5.0.1"), package), PathBuf::from(expected));
    }

    #[test]
    fn test_clean() {
        let dir = tempfile::tempdir().unwrap();
        for path in ["LLVM_5.docset/Contents", "Clang_API_5.docset", "build/llvm-5.0.1-docs/html"] {
            fs::create_dir_all(dir.path().join(path)).unwrap();
        }
        fs::write(dir.path().join("llvm-5.0.1.src.tar.xz"), "tarball").unwrap();

        pipeline(dir.path(), true).clean().unwrap();

        assert!(!dir.path().join("LLVM_5.docset").exists());
        assert!(!dir.path().join("Clang_API_5.docset").exists());
        assert!(!dir.path().join("build").exists());
        assert!(dir.path().join("llvm-5.0.1.src.tar.xz").exists());
    }

    #[test]
    fn test_compress_requires_every_bundle() {
        let dir = tempfile::tempdir().unwrap();
        for bundle in ["LLVM_5.docset", "Clang_5.docset"] {
            fs::create_dir_all(dir.path().join(bundle).join("Contents")).unwrap();
        }

        let archives = pipeline(dir.path(), false).compress().unwrap();
        assert_eq!(archives, [dir.path().join("LLVM_5.docset.tar.gz"), dir.path().join("Clang_5.docset.tar.gz")]);

        let err = pipeline(dir.path(), true).compress().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Compress(bundle) if *bundle == "LLVM_API_5.docset"));
    }

    #[tokio::test]
    async fn test_docset_from_generated_html() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("icon.png"), b"icon").unwrap();
        let html = dir.path().join("html");
        for page in Package::CLANG.index_pages {
            let path = html.join(page.path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, r##"<a href="#intro">Introduction</a>"##).unwrap();
        }

        let bundle = pipeline(dir.path(), false).docset(&Package::CLANG, &html).await.unwrap();
        assert_eq!(bundle, dir.path().join("Clang_5.docset"));
        assert!(bundle.join("Contents/Resources/docSet.dsidx").is_file());
    }
}

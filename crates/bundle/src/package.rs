//! Static descriptions of the packages a docset is built for.

use crate::error::{ErrorKind, Result};
use derive_more::Display;
use docsets_index::EntryType;
use exn::OptionExt;

/// Release of the sources every descriptor (and its checksum) refers to.
pub const VERSION: &str = "5.0.1";
const RELEASES_URL: &str = "http://releases.llvm.org";

/// Online documentation Dash falls back to for pages missing from a bundle.
pub fn fallback_url() -> String {
    format!("{RELEASES_URL}/{VERSION}/docs/")
}

/// A documentation page indexed verbatim under a fixed name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SinglePage {
    pub name: &'static str,
    pub kind: EntryType,
    /// Relative to the bundle's `Documents` directory.
    pub path: &'static str,
}

/// A documentation page whose outbound links are harvested into the index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexPage {
    /// Type given to every entry harvested from this page.
    pub kind: EntryType,
    /// Relative to the bundle's `Documents` directory.
    pub path: &'static str,
}

/// Immutable description of one project to build docsets for.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{display} {}", VERSION)]
pub struct Package {
    /// Lowercase identifier, used in build targets and bundle identifiers.
    pub name: &'static str,
    /// Human-readable project name.
    pub display: &'static str,
    /// Expected MD5 digest (lowercase hex) of the source tarball.
    pub md5: &'static str,
    /// File name prefix of the source tarball, which doesn't always match the name.
    pub tarball_stem: &'static str,
    /// Directory name of the documentation docset. Dash rejects extra dots
    /// in bundle names, so only the major version is used.
    pub docset: &'static str,
    /// Directory name of the API reference docset.
    pub api_docset: &'static str,
    /// Where the sources are extracted to, relative to the working directory.
    pub src_dir: &'static str,
    pub single_pages: &'static [SinglePage],
    pub index_pages: &'static [IndexPage],
}

const fn single(name: &'static str, kind: EntryType, path: &'static str) -> SinglePage {
    SinglePage { name, kind, path }
}

const fn index(kind: EntryType, path: &'static str) -> IndexPage {
    IndexPage { kind, path }
}

impl Package {
    pub const LLVM: Package = Package {
        name: "llvm",
        display: "LLVM",
        md5: "3a4ec6dcbc71579eeaec7cb157fe2168",
        tarball_stem: "llvm",
        docset: "LLVM_5.docset",
        api_docset: "LLVM_API_5.docset",
        src_dir: "llvm-5.0.1",
        single_pages: &[
            single("CommandLine 2.0 Library Manual", EntryType::Library, "CommandLine.html"),
            single("LLVM Coding Standards", EntryType::Guide, "CodingStandards.html"),
            single("LLVM Style RTTI", EntryType::Guide, "HowToSetUpLLVMStyleRTTI.html"),
            single("YAML I/O Library", EntryType::Library, "YamlIO.html"),
        ],
        index_pages: &[
            index(EntryType::Instruction, "ProgrammersManual.html"),
            index(EntryType::Category, "LangRef.html"),
            index(EntryType::Command, "CommandGuide/index.html"),
            index(EntryType::Guide, "GettingStarted.html"),
            index(EntryType::Sample, "tutorial/index.html"),
            index(EntryType::Service, "Passes.html"),
        ],
    };

    pub const CLANG: Package = Package {
        name: "clang",
        display: "Clang",
        md5: "e4daa278d8f252585ab73d196484bf11",
        tarball_stem: "cfe",
        docset: "Clang_5.docset",
        api_docset: "Clang_API_5.docset",
        src_dir: "llvm-5.0.1/tools/clang",
        single_pages: &[
            single("Clang Language Extensions", EntryType::Instruction, "LanguageExtensions.html"),
            single("Address Sanitizer", EntryType::Instruction, "AddressSanitizer.html"),
            single("Thread Sanitizer", EntryType::Instruction, "ThreadSanitizer.html"),
            single("Memory Sanitizer", EntryType::Instruction, "MemorySanitizer.html"),
            single("UB Sanitizer", EntryType::Instruction, "UndefinedBehaviorSanitizer.html"),
            single("Data Flow Sanitizer", EntryType::Instruction, "DataFlowSanitizer.html"),
            single("Leak Sanitizer", EntryType::Instruction, "LeakSanitizer.html"),
            single("Source Based Coverage", EntryType::Instruction, "SourceBasedCodeCoverage.html"),
            single("Modules", EntryType::Instruction, "Modules.html"),
            single("LibTooling", EntryType::Library, "LibTooling.html"),
            single("LibFormat", EntryType::Library, "LibFormat.html"),
            single("ClangFormat Options", EntryType::Instruction, "ClangFormatStyleOptions.html"),
        ],
        index_pages: &[
            index(EntryType::Instruction, "InternalsManual.html"),
            index(EntryType::Instruction, "UsersManual.html"),
            index(EntryType::Command, "CommandGuide/index.html"),
        ],
    };

    /// Every package, in build order. LLVM comes first: Clang's sources are
    /// extracted inside LLVM's tree.
    pub const ALL: [&'static Package; 2] = [&Self::LLVM, &Self::CLANG];

    /// Look up a package by its lowercase name.
    pub fn find(name: &str) -> Result<&'static Package> {
        Self::ALL
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_raise(|| ErrorKind::UnknownPackage(name.to_string()))
    }

    /// File name of the released source tarball.
    pub fn tarball(&self) -> String {
        format!("{}-{VERSION}.src.tar.xz", self.tarball_stem)
    }

    /// Both bundle directory names, documentation first.
    pub fn bundles(&self) -> [&'static str; 2] {
        [self.docset, self.api_docset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("llvm", &Package::LLVM)]
    #[case("clang", &Package::CLANG)]
    #[case(" Clang ", &Package::CLANG)]
    fn test_find(#[case] name: &str, #[case] expected: &Package) {
        assert_eq!(Package::find(name).unwrap(), expected);
    }

    #[test]
    fn test_find_unknown() {
        let err = Package::find("lldb").unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownPackage(name) if name == "lldb"));
    }

    #[rstest]
    #[case(&Package::LLVM, "llvm-5.0.1.src.tar.xz")]
    #[case(&Package::CLANG, "cfe-5.0.1.src.tar.xz")]
    fn test_tarball(#[case] package: &Package, #[case] expected: &str) {
        assert_eq!(package.tarball(), expected);
    }

    #[test]
    fn test_bundle_names_have_a_single_dot() {
        for package in Package::ALL {
            for bundle in package.bundles() {
                assert_eq!(bundle.matches('.').count(), 1, "{bundle}");
                assert!(bundle.ends_with(".docset"));
            }
        }
    }

    #[test]
    fn test_clang_sources_live_inside_llvm() {
        assert!(Package::CLANG.src_dir.starts_with(Package::LLVM.src_dir));
        assert_eq!(Package::LLVM.to_string(), "LLVM 5.0.1");
    }

    #[test]
    fn test_fallback_url_follows_version() {
        assert_eq!(fallback_url(), "http://releases.llvm.org/5.0.1/docs/");
        assert!(fallback_url().contains(VERSION));
    }
}

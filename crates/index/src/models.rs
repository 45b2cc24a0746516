use crate::error::{Error, ErrorKind};
use derive_more::Display;
use exn::ResultExt;
use std::str::FromStr;

/// The category shown next to an entry in Dash's search results.
///
/// Only the types used by the LLVM and Clang docsets are modelled; Dash
/// itself knows many more.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum EntryType {
    Category,
    Command,
    Guide,
    Instruction,
    Library,
    Sample,
    Service,
}
impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Command => "Command",
            Self::Guide => "Guide",
            Self::Instruction => "Instruction",
            Self::Library => "Library",
            Self::Sample => "Sample",
            Self::Service => "Service",
        }
    }
}
impl FromStr for EntryType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Category" => Self::Category,
            "Command" => Self::Command,
            "Guide" => Self::Guide,
            "Instruction" => Self::Instruction,
            "Library" => Self::Library,
            "Sample" => Self::Sample,
            "Service" => Self::Service,
            _ => exn::bail!(ErrorKind::UnknownEntryType(s.to_string())),
        })
    }
}

/// A single record of a docset's search index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryType,
    /// Path relative to `Contents/Resources/Documents`, optionally with a fragment.
    pub path: String,
}
impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryType, path: impl Into<String>) -> Self {
        Self { name: name.into(), kind, path: path.into() }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct EntryRow {
    #[allow(dead_code)]
    pub(crate) id: i64,
    pub(crate) name: String,
    #[sqlx(rename = "type")]
    pub(crate) kind: String,
    pub(crate) path: String,
}
impl TryFrom<EntryRow> for Entry {
    type Error = Error;
    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            name: row.name,
            kind: row.kind.parse::<EntryType>().or_raise(|| ErrorKind::InvalidData("entry type"))?,
            path: row.path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EntryType::Category)]
    #[case(EntryType::Command)]
    #[case(EntryType::Guide)]
    #[case(EntryType::Instruction)]
    #[case(EntryType::Library)]
    #[case(EntryType::Sample)]
    #[case(EntryType::Service)]
    fn test_entry_type_names_match_display(#[case] kind: EntryType) {
        assert_eq!(kind.to_string(), kind.as_str());
        assert_eq!(kind.as_str().parse::<EntryType>().unwrap(), kind);
    }

    #[test]
    fn test_unknown_entry_type() {
        let err = "Function".parse::<EntryType>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownEntryType(name) if name == "Function"));
    }

    #[test]
    fn test_row_to_model() {
        let row = EntryRow {
            id: 1,
            name: "LLVM Coding Standards".to_string(),
            kind: "Guide".to_string(),
            path: "CodingStandards.html".to_string(),
        };
        let entry = Entry::try_from(row).unwrap();
        assert_eq!(entry, Entry::new("LLVM Coding Standards", EntryType::Guide, "CodingStandards.html"));
    }

    #[test]
    fn test_row_with_foreign_type() {
        let row = EntryRow { id: 1, name: "x".to_string(), kind: "guide".to_string(), path: "x.html".to_string() };
        let err = Entry::try_from(row).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidData(field) if *field == "entry type"));
    }
}

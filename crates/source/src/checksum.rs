use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// MD5 digest of a file's contents as lowercase hex.
pub fn md5_file(path: impl AsRef<Path>) -> Result<String> {
    let mut reader = BufReader::new(File::open(path.as_ref()).or_raise(|| ErrorKind::Io)?);
    let mut hasher = Md5::new();
    io::copy(&mut reader, &mut hasher).or_raise(|| ErrorKind::Io)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Check a file against an expected MD5 digest.
///
/// A mismatch is an [`ErrorKind::IntegrityFailure`] carrying both digests.
pub fn verify(path: impl AsRef<Path>, expected: &str) -> Result<()> {
    let path = path.as_ref();
    let actual = md5_file(path)?;
    if !actual.eq_ignore_ascii_case(expected) {
        exn::bail!(ErrorKind::IntegrityFailure { file: path.to_path_buf(), expected: expected.to_string(), actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case(b"", "d41d8cd98f00b204e9800998ecf8427e")]
    #[case(b"The quick brown fox jumps over the lazy dog", "9e107d9d372bb6826bd81d3542a419d6")]
    fn test_md5_file(#[case] content: &[u8], #[case] expected: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file");
        fs::write(&path, content).unwrap();
        assert_eq!(md5_file(&path).unwrap(), expected);
    }

    #[test]
    fn test_verify() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llvm-5.0.1.src.tar.xz");
        fs::write(&path, b"The quick brown fox jumps over the lazy dog").unwrap();

        verify(&path, "9E107D9D372BB6826BD81D3542A419D6").unwrap();
        let err = verify(&path, "3a4ec6dcbc71579eeaec7cb157fe2168").unwrap_err();
        assert!(matches!(
            &*err,
            ErrorKind::IntegrityFailure { actual, .. } if actual == "9e107d9d372bb6826bd81d3542a419d6"
        ));
    }

    #[test]
    fn test_md5_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(md5_file(dir.path().join("missing")).is_err());
    }
}

//! Lenient text decoding for desktop entries.

use crate::error::{ErrorExt, Result};
use std::path::Path;

/// Reads a file as UTF-8, falling back to Latin-1 when the bytes don't
/// decode.
///
/// Desktop entries in the wild are occasionally Latin-1 encoded; every byte
/// maps to the scalar value of the same number, so the fallback never fails.
pub fn read_to_string_lenient(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).fs_context("reading file", path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entry.desktop");
        std::fs::write(&path, "Name=Caf\u{e9}\n").unwrap();
        assert_eq!(read_to_string_lenient(&path).unwrap(), "Name=Caf\u{e9}\n");
    }

    #[test]
    fn falls_back_to_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entry.desktop");
        // "Café" with a bare 0xE9 byte, which is invalid UTF-8
        std::fs::write(&path, b"Name=Caf\xe9\n").unwrap();
        assert_eq!(read_to_string_lenient(&path).unwrap(), "Name=Caf\u{e9}\n");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_to_string_lenient(Path::new("/no/such/file")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file"));
    }
}

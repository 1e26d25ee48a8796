use std::{
    collections::BTreeSet,
    io,
    path::{Path, PathBuf},
};

use similar::TextDiff;
use walkdir::WalkDir;

use crate::HarnessError;

/// The comparison oracle: `Ok(())` means structurally equivalent.
pub trait Differ {
    fn compare(&self, expected: &Path, actual: &Path) -> Result<(), HarnessError>;
}

/// Line-oriented comparison with unified-diff reporting.
///
/// Regular files are compared line by line; two directories (the UFO case)
/// must contain the same relative file set with pairwise equivalent
/// contents. Non-UTF-8 files fall back to byte equality.
#[derive(Clone, Debug, Default)]
pub struct UnifiedDiffer {
    /// Lines containing any of these substrings are dropped before
    /// comparison. Timestamps and checksums the tools rewrite on every run
    /// go here.
    pub ignore_substrings: Vec<String>,
}

impl UnifiedDiffer {
    pub fn new() -> Self {
        UnifiedDiffer::default()
    }

    pub fn ignoring(substrings: &[&str]) -> Self {
        UnifiedDiffer {
            ignore_substrings: substrings.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn filter_lines(&self, text: &str) -> String {
        let mut kept = String::with_capacity(text.len());
        for line in text.lines() {
            if self
                .ignore_substrings
                .iter()
                .any(|skip| line.contains(skip.as_str()))
            {
                continue;
            }
            kept.push_str(line);
            kept.push('\n');
        }
        kept
    }

    fn compare_files(&self, expected: &Path, actual: &Path) -> Result<(), HarnessError> {
        let old = std::fs::read(expected)?;
        let new = std::fs::read(actual)?;
        match (std::str::from_utf8(&old), std::str::from_utf8(&new)) {
            (Ok(old), Ok(new)) => {
                let old = self.filter_lines(old);
                let new = self.filter_lines(new);
                if old != new {
                    let diff = TextDiff::from_lines(&old, &new)
                        .unified_diff()
                        .header("expected", "actual")
                        .to_string();
                    return Err(mismatch(expected, actual, diff));
                }
            }
            _ => {
                if old != new {
                    return Err(mismatch(expected, actual, "binary contents differ".into()));
                }
            }
        }
        Ok(())
    }

    fn compare_dirs(&self, expected: &Path, actual: &Path) -> Result<(), HarnessError> {
        let expected_files = relative_files(expected)?;
        let actual_files = relative_files(actual)?;
        if expected_files != actual_files {
            let mut diff = String::new();
            for missing in expected_files.difference(&actual_files) {
                diff.push_str(&format!("- {}\n", missing.display()));
            }
            for extra in actual_files.difference(&expected_files) {
                diff.push_str(&format!("+ {}\n", extra.display()));
            }
            return Err(mismatch(expected, actual, diff));
        }
        for rel in &expected_files {
            self.compare_files(&expected.join(rel), &actual.join(rel))?;
        }
        Ok(())
    }
}

impl Differ for UnifiedDiffer {
    fn compare(&self, expected: &Path, actual: &Path) -> Result<(), HarnessError> {
        if expected.is_dir() {
            self.compare_dirs(expected, actual)
        } else {
            self.compare_files(expected, actual)
        }
    }
}

fn relative_files(root: &Path) -> Result<BTreeSet<PathBuf>, HarnessError> {
    let mut files = BTreeSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("walked entry is under its root");
            files.insert(rel.to_owned());
        }
    }
    Ok(files)
}

fn mismatch(expected: &Path, actual: &Path, diff: String) -> HarnessError {
    HarnessError::Mismatch {
        expected: expected.to_owned(),
        actual: actual.to_owned(),
        diff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn identical_files_compare_equal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xml");
        let b = dir.path().join("b.xml");
        fs::write(&a, "<CFFFont>\n<FontName value=\"Test\"/>\n</CFFFont>\n").unwrap();
        fs::copy(&a, &b).unwrap();
        assert!(UnifiedDiffer::new().compare(&a, &b).is_ok());
    }

    #[test]
    fn differing_files_report_a_unified_diff() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xml");
        let b = dir.path().join("b.xml");
        fs::write(&a, "one\ntwo\nthree\n").unwrap();
        fs::write(&b, "one\n2\nthree\n").unwrap();
        match UnifiedDiffer::new().compare(&a, &b) {
            Err(HarnessError::Mismatch { diff, .. }) => {
                assert!(diff.contains("-two"), "{diff}");
                assert!(diff.contains("+2"), "{diff}");
            }
            other => panic!("expected a mismatch, got {other:?}"),
        }
    }

    #[test]
    fn ignored_substrings_are_dropped_before_comparison() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xml");
        let b = dir.path().join("b.xml");
        fs::write(&a, "<checkSumAdjustment value=\"0x1\"/>\nsame\n").unwrap();
        fs::write(&b, "<checkSumAdjustment value=\"0x2\"/>\nsame\n").unwrap();
        assert!(UnifiedDiffer::new().compare(&a, &b).is_err());
        assert!(UnifiedDiffer::ignoring(&["checkSumAdjustment"])
            .compare(&a, &b)
            .is_ok());
    }

    #[test]
    fn non_utf8_files_compare_by_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        fs::write(&a, [0xff, 0xfe, 0x00]).unwrap();
        fs::write(&b, [0xff, 0xfe, 0x00]).unwrap();
        assert!(UnifiedDiffer::new().compare(&a, &b).is_ok());
        fs::write(&b, [0xff, 0xfe, 0x01]).unwrap();
        assert!(UnifiedDiffer::new().compare(&a, &b).is_err());
    }

    #[test]
    fn equivalent_bundles_compare_equal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("font.ufo");
        let b = dir.path().join("hinted.ufo");
        for root in [&a, &b] {
            fs::create_dir_all(root.join("glyphs")).unwrap();
            fs::write(root.join("fontinfo.plist"), "<dict/>\n").unwrap();
            fs::write(root.join("glyphs/a.glif"), "<glyph name=\"a\"/>\n").unwrap();
        }
        assert!(UnifiedDiffer::new().compare(&a, &b).is_ok());
    }

    #[test]
    fn bundle_with_extra_file_is_a_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("font.ufo");
        let b = dir.path().join("hinted.ufo");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("fontinfo.plist"), "<dict/>\n").unwrap();
        fs::write(b.join("fontinfo.plist"), "<dict/>\n").unwrap();
        fs::write(b.join("lib.plist"), "<dict/>\n").unwrap();
        match UnifiedDiffer::new().compare(&a, &b) {
            Err(HarnessError::Mismatch { diff, .. }) => {
                assert!(diff.contains("+ lib.plist"), "{diff}")
            }
            other => panic!("expected a mismatch, got {other:?}"),
        }
    }

    #[test]
    fn bundle_with_changed_file_is_a_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("font.ufo");
        let b = dir.path().join("hinted.ufo");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("fontinfo.plist"), "<dict>1</dict>\n").unwrap();
        fs::write(b.join("fontinfo.plist"), "<dict>2</dict>\n").unwrap();
        assert!(UnifiedDiffer::new().compare(&a, &b).is_err());
    }
}

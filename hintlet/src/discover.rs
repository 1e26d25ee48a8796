use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// The two fixture container kinds in the sample tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FontKind {
    /// A directory-based UFO source bundle.
    Ufo,
    /// A binary OpenType font carrying a 'CFF ' table.
    Otf,
}

impl FontKind {
    /// The fixed leaf name fixtures of this kind use.
    pub fn leaf_name(self) -> &'static str {
        match self {
            FontKind::Ufo => "font.ufo",
            FontKind::Otf => "font.otf",
        }
    }

    fn matches(self, entry: &walkdir::DirEntry) -> bool {
        entry.file_name() == OsStr::new(self.leaf_name())
            && match self {
                FontKind::Ufo => entry.file_type().is_dir(),
                FontKind::Otf => entry.file_type().is_file(),
            }
    }
}

/// One discovered sample font.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub kind: FontKind,
    pub path: PathBuf,
}

impl Fixture {
    /// The leaf name of the fixture, e.g. `font.otf`.
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// Enumerate fixtures of one kind under `root`.
///
/// The sample tree is exactly two directory levels deep, `root/*/*/font.ufo`
/// or `root/*/*/font.otf`, matching the type of entry the kind calls for. A
/// missing or empty root yields an empty suite, not an error. Results are
/// sorted by path so suite enumeration is deterministic.
pub fn discover(root: impl AsRef<Path>, kind: FontKind) -> Vec<Fixture> {
    let mut found: Vec<_> = WalkDir::new(root.as_ref())
        .min_depth(3)
        .max_depth(3)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| kind.matches(entry))
        .map(|entry| Fixture {
            kind,
            path: entry.into_path(),
        })
        .collect();
    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

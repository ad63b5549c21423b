//! Embedded toolkit content shipped inside the niopd binary.

use include_dir::{Dir, DirEntry, include_dir};

static CORE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/core");

/// A file embedded in the toolkit bundle.
#[derive(Debug, Clone)]
pub struct AssetFile {
    /// Path relative to the core root, using `/` separators.
    pub path: String,
    /// File content as UTF-8 text.
    pub content: &'static str,
}

/// Returns all toolkit files (relative to `core/`), lexicographically sorted.
pub fn core_files() -> Vec<AssetFile> {
    let mut files = Vec::new();
    collect_files(&CORE_DIR, &mut files);

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn collect_files(dir: &'static Dir, files: &mut Vec<AssetFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                if let Some(content) = file.contents_utf8() {
                    files.push(AssetFile {
                        path: file.path().to_string_lossy().to_string(),
                        content,
                    });
                }
            }
            DirEntry::Dir(subdir) => collect_files(subdir, files),
        }
    }
}

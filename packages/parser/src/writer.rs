//! JSON persistence of law trees and collections.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::text::strip_thai;
use crate::tree::{LawCollection, LawTree};

/// File stem used when a law code has no characters left after stripping.
const FALLBACK_STEM: &str = "document";

/// File stem for a law code: the code with Thai characters removed.
#[must_use]
pub fn file_stem(law_code: &str) -> String {
    let stem = strip_thai(law_code).trim().to_string();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Write `content` to `path` through a synced temp file and a rename.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Save one tree as pretty-printed JSON.
///
/// # Arguments
/// * `tree` - Document tree to save
/// * `output_dir` - Directory to write into; created when missing
///
/// # Returns
/// Path of the written file, `{law code without Thai}.json`.
pub fn save_tree(tree: &LawTree, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.json", file_stem(&tree.law_code)));
    write_atomic(&path, &serde_json::to_string_pretty(tree)?)?;

    tracing::debug!(path = %path.display(), "Saved law tree");
    Ok(path)
}

/// Save every tree of a collection, one file per document.
///
/// Files are named `{position:05}_{stem}.json`. The delimited position keeps
/// codes that collide after stripping distinct and fixes the reload order.
pub fn save_collection(collection: &LawCollection, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let mut paths = Vec::with_capacity(collection.len());
    for (index, tree) in collection.iter().enumerate() {
        let path = output_dir.join(format!("{index:05}_{}.json", file_stem(&tree.law_code)));
        write_atomic(&path, &serde_json::to_string_pretty(tree)?)?;
        paths.push(path);
    }

    tracing::debug!(
        dir = %output_dir.display(),
        documents = paths.len(),
        "Saved law collection"
    );
    Ok(paths)
}

/// Load one tree from a JSON file.
pub fn load_tree(path: &Path) -> Result<LawTree> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Position prefix of a file written by [`save_collection`].
fn collection_position(file_name: &str) -> Option<u64> {
    let (position, _) = file_name.split_once('_')?;
    position.parse().ok()
}

/// Load every `*.json` tree in a directory.
///
/// Files are ordered by the position before the first `_`, then by name,
/// which restores the order written by [`save_collection`]. Files without a
/// position sort last.
pub fn load_collection_dir(dir: &Path) -> Result<LawCollection> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort_by_cached_key(|path| {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        (collection_position(&name).unwrap_or(u64::MAX), name)
    });

    paths
        .iter()
        .map(|path| load_tree(path))
        .collect::<Result<Vec<_>>>()
        .map(LawCollection::new)
}

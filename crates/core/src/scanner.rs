use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::human::human_bytes;
use crate::model::{NodeId, Tree};
use crate::naming::PathStyle;

/// Build a weighted tree mirroring the directory structure under `path`.
///
/// The walk is contents-first, so every directory's children already exist
/// when the directory itself is inserted. Regular files weigh their byte
/// length, directories aggregate their children, and an empty directory
/// ends up as a weight-0 leaf. Entries that are neither (sockets,
/// symlinks) are skipped. Child order is whatever the platform yields;
/// no sorting is applied.
pub fn scan_path(path: impl AsRef<Path>) -> Result<Tree> {
    let path = path.as_ref();
    let mut tree = Tree::new();
    let mut pending: HashMap<PathBuf, Vec<NodeId>> = HashMap::new();
    let mut files: u64 = 0;
    let mut dirs: u64 = 0;

    for entry in WalkDir::new(path).contents_first(true) {
        let entry = entry?;
        let id = if entry.file_type().is_dir() {
            dirs += 1;
            let children = pending.remove(entry.path()).unwrap_or_default();
            tree.branch(node_name(entry.path()), children)
        } else if entry.file_type().is_file() {
            files += 1;
            let weight = entry.metadata()?.len();
            tree.leaf(node_name(entry.path()), weight)
        } else {
            continue;
        };
        if entry.depth() > 0 {
            if let Some(parent) = entry.path().parent() {
                pending.entry(parent.to_path_buf()).or_default().push(id);
            }
        }
    }

    let bytes = tree.root().map(|r| tree.node(r).weight).unwrap_or(0);
    debug!(files, dirs, bytes, "scanned {}", path.display());
    Ok(tree)
}

fn node_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_else(|| path.as_os_str().to_str().unwrap_or(""))
        .to_string()
}

/// Path/suffix rendering for scanned file-system trees.
pub struct FsStyle;

impl PathStyle for FsStyle {
    fn separator(&self) -> &str {
        std::path::MAIN_SEPARATOR_STR
    }

    fn suffix(&self, tree: &Tree, id: NodeId) -> String {
        let node = tree.node(id);
        if node.children.is_empty() {
            format!(" (file, {})", human_bytes(node.weight))
        } else {
            format!(
                " (folder, {} items, {})",
                node.children.len(),
                human_bytes(node.weight)
            )
        }
    }
}

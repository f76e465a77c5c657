//! File-system adapter tests. Directory entry order is platform-defined,
//! so children are looked up by name instead of position.

use std::fs;

use tempfile::TempDir;

use quiltmap_core::naming::path_string;
use quiltmap_core::scanner::{scan_path, FsStyle};
use quiltmap_core::{Error, NodeId, Tree};

fn child_by_name(tree: &Tree, id: NodeId, name: &str) -> NodeId {
    *tree
        .node(id)
        .children
        .iter()
        .find(|c| tree.node(**c).name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("no child named {name}"))
}

/// Writes the workshop fixture to disk, sized so every file weighs its
/// name's share of the 151-byte total.
fn write_workshop(dir: &TempDir) -> std::path::PathBuf {
    let root = dir.path().join("workshop");
    fs::create_dir_all(root.join("activities/images")).unwrap();
    fs::create_dir_all(root.join("prep/images")).unwrap();
    fs::write(root.join("activities/Plan.tex"), "x".repeat(2)).unwrap();
    fs::write(root.join("activities/images/Q2.pdf"), "x".repeat(20)).unwrap();
    fs::write(root.join("activities/images/Q3.pdf"), "x".repeat(49)).unwrap();
    fs::write(root.join("draft.pptx"), "x".repeat(58)).unwrap();
    fs::write(root.join("prep/images/Cats.pdf"), "x".repeat(16)).unwrap();
    fs::write(root.join("prep/reading.md"), "x".repeat(6)).unwrap();
    root
}

#[test]
fn given_a_directory_tree_when_scanned_then_weights_are_byte_sums() {
    let dir = TempDir::new().unwrap();
    let path = write_workshop(&dir);

    let tree = scan_path(&path).unwrap();
    let root = tree.root().unwrap();
    assert_eq!(tree.node(root).name.as_deref(), Some("workshop"));
    assert_eq!(tree.node(root).weight, 151);
    assert_eq!(tree.node(root).children.len(), 3);

    let activities = child_by_name(&tree, root, "activities");
    assert_eq!(tree.node(activities).weight, 71);
    let images = child_by_name(&tree, activities, "images");
    assert_eq!(tree.node(images).weight, 69);
    assert_eq!(tree.node(child_by_name(&tree, images, "Q3.pdf")).weight, 49);

    let prep = child_by_name(&tree, root, "prep");
    assert_eq!(tree.node(prep).weight, 22);
    assert_eq!(tree.node(child_by_name(&tree, root, "draft.pptx")).weight, 58);
}

#[test]
fn given_an_empty_directory_when_scanned_then_it_is_a_weight_zero_leaf() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("hollow")).unwrap();

    let tree = scan_path(dir.path()).unwrap();
    let root = tree.root().unwrap();
    let hollow = child_by_name(&tree, root, "hollow");
    assert!(tree.is_leaf(hollow));
    assert_eq!(tree.node(hollow).weight, 0);
    assert_eq!(tree.node(root).weight, 0);
}

#[test]
fn given_a_single_file_when_scanned_then_the_tree_is_one_leaf() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("alone.txt");
    fs::write(&file, "x".repeat(11)).unwrap();

    let tree = scan_path(&file).unwrap();
    let root = tree.root().unwrap();
    assert!(tree.is_leaf(root));
    assert_eq!(tree.node(root).name.as_deref(), Some("alone.txt"));
    assert_eq!(tree.node(root).weight, 11);
}

#[test]
fn given_a_scanned_tree_then_paths_render_with_fs_suffixes() {
    let dir = TempDir::new().unwrap();
    let path = write_workshop(&dir);

    let tree = scan_path(&path).unwrap();
    let root = tree.root().unwrap();
    let activities = child_by_name(&tree, root, "activities");
    let plan = child_by_name(&tree, activities, "Plan.tex");

    let sep = std::path::MAIN_SEPARATOR_STR;
    assert_eq!(
        path_string(&tree, plan, &FsStyle),
        format!("workshop{sep}activities{sep}Plan.tex (file, 2.00B)")
    );
    assert_eq!(
        path_string(&tree, root, &FsStyle),
        "workshop (folder, 3 items, 151.00B)"
    );
}

#[test]
fn given_a_missing_path_when_scanned_then_the_walk_error_surfaces() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("never-created");
    let err = scan_path(&gone).unwrap_err();
    assert!(matches!(err, Error::Walk(_)));
}

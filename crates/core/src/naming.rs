use crate::model::{NodeId, Tree};

/// How one tree flavor renders itself as text. Each producer ships a style
/// pairing the separator between path components with the trailing
/// descriptor for a node.
pub trait PathStyle {
    /// Separator placed between ancestor names.
    fn separator(&self) -> &str;

    /// Trailing descriptor for `id`, leading space included.
    fn suffix(&self, tree: &Tree, id: NodeId) -> String;
}

/// The names from the root down to `id` joined by the style's separator,
/// with the style's suffix for `id` appended. Placeholder nodes contribute
/// an empty name.
pub fn path_string(tree: &Tree, id: NodeId, style: &impl PathStyle) -> String {
    let mut names = Vec::new();
    let mut cur = Some(id);
    while let Some(n) = cur {
        let node = tree.node(n);
        names.push(node.name.clone().unwrap_or_default());
        cur = node.parent;
    }
    names.reverse();
    let mut path = names.join(style.separator());
    path.push_str(&style.suffix(tree, id));
    path
}

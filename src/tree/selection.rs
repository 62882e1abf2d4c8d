//! Resolving operation targets from the current selection.

use super::{TreeNode, TreeStore};

/// Resolve the container an add operation applies to.
///
/// Takes the most recently selected key (last inserted wins when several
/// nodes are selected, an approximation that is not ordered across
/// multiple roots, kept as documented behavior). A container resolves to
/// itself, a leaf to its parent. `None` when nothing is selected or the key
/// has gone stale.
pub fn resolve_container_target(store: &dyn TreeStore) -> Option<TreeNode> {
    let selected = store.selected_keys();
    let key = selected.last()?;
    let root_key = store.root_for_key(key)?;
    let node = store.node(&root_key, key)?;
    if node.is_container() {
        return Some(node);
    }
    let parent_key = node.parent_key.clone().or_else(|| node.key.parent())?;
    store.node(&root_key, &parent_key)
}

/// Resolve the single node a rename/duplicate applies to.
///
/// Valid only when exactly one node is selected; any other cardinality
/// makes the operation a no-op.
pub fn resolve_single_target(store: &dyn TreeStore) -> Option<TreeNode> {
    let selected = store.selected_keys();
    let [key] = selected.as_slice() else {
        return None;
    };
    let root_key = store.root_for_key(key)?;
    store.node(&root_key, key)
}

//! Tree store contract and node snapshots.
//!
//! The tree store (the browser's data layer) owns the nodes; this crate
//! only sees cheap value snapshots of them plus the current selection. A
//! node key is an opaque string that encodes backend and path; it stays
//! stable for the node's lifetime but goes stale if the entry is deleted or
//! its remote connection drops.

pub mod selection;

use std::fmt;

use crate::backend::EntryLocation;
use crate::paths;

/// Opaque, stable identifier of one tree node. Directory keys carry a
/// trailing separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key names a directory entry.
    pub fn is_container(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Canonical local-style path for the entry, with any remote authority
    /// stripped.
    pub fn local_path(&self) -> String {
        EntryLocation::parse(&self.0).local_path().to_string()
    }

    /// Key of the containing directory, `None` at a root.
    pub fn parent(&self) -> Option<NodeKey> {
        let local = self.local_path();
        if local == "/" {
            return None;
        }
        let parent_local = paths::dir_name(&local);
        let parent_with_sep = if parent_local == "/" {
            "/".to_string()
        } else {
            format!("{parent_local}/")
        };
        match EntryLocation::parse(&self.0) {
            EntryLocation::Local { .. } => Some(NodeKey(parent_with_sep)),
            EntryLocation::Remote { authority, .. } => {
                Some(NodeKey(format!("scp://{authority}{parent_with_sep}")))
            }
        }
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey(s.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        NodeKey(s)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value snapshot of one tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub key: NodeKey,
    pub root_key: NodeKey,
    /// Key of the parent node; `None` for a mounted root.
    pub parent_key: Option<NodeKey>,
}

impl TreeNode {
    pub fn is_container(&self) -> bool {
        self.key.is_container()
    }

    pub fn local_path(&self) -> String {
        self.key.local_path()
    }
}

/// Contract the browser's tree store must provide.
pub trait TreeStore {
    /// Currently selected node keys, in insertion order.
    fn selected_keys(&self) -> Vec<NodeKey>;

    /// Root key the given node is mounted under, if the key still resolves.
    fn root_for_key(&self, key: &NodeKey) -> Option<NodeKey>;

    /// Node lookup by (root key, node key).
    fn node(&self, root_key: &NodeKey, key: &NodeKey) -> Option<TreeNode>;
}

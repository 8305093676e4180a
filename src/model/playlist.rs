use serde::{Deserialize, Serialize};

/// Whether a playlist node is a folder or an actual playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Contains child nodes, no tracks
    Folder,

    /// Contains track references, no children
    Playlist,
}

/// A node in the playlist tree.
///
/// Each node exclusively owns its children; there are no parent references,
/// so the structure is a tree by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistNode {
    name: String,
    kind: NodeKind,
    children: Vec<PlaylistNode>,
    track_ids: Vec<u32>,
}

impl PlaylistNode {
    pub(crate) fn folder(name: String, children: Vec<PlaylistNode>) -> Self {
        Self {
            name,
            kind: NodeKind::Folder,
            children,
            track_ids: Vec::new(),
        }
    }

    pub(crate) fn playlist(name: String, track_ids: Vec<u32>) -> Self {
        Self {
            name,
            kind: NodeKind::Playlist,
            children: Vec::new(),
            track_ids,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_playlist(&self) -> bool {
        self.kind == NodeKind::Playlist
    }

    /// Child nodes in document order (empty for playlists)
    pub fn children(&self) -> &[PlaylistNode] {
        &self.children
    }

    /// Resolved track identifiers in document order (empty for folders)
    pub fn track_ids(&self) -> &[u32] {
        &self.track_ids
    }

    /// Pre-order iterator over every playlist (not folder) in this subtree,
    /// children visited in document order.
    pub fn iter_playlists(&self) -> impl Iterator<Item = &PlaylistNode> {
        let mut playlists = Vec::new();
        self.collect_playlists(&mut playlists);
        playlists.into_iter()
    }

    fn collect_playlists<'a>(&'a self, out: &mut Vec<&'a PlaylistNode>) {
        if self.is_playlist() {
            out.push(self);
        }
        for child in &self.children {
            child.collect_playlists(out);
        }
    }

    /// Find the first playlist with the given name under a pre-order
    /// traversal. Name collisions resolve to the earliest match.
    pub fn find_playlist(&self, name: &str) -> Option<&PlaylistNode> {
        self.iter_playlists().find(|p| p.name == name)
    }

    /// Drop track references for which `keep` returns false. Used once at
    /// assembly time to remove dangling references.
    pub(crate) fn retain_track_ids(&mut self, keep: &impl Fn(u32) -> bool) {
        self.track_ids.retain(|id| keep(*id));
        for child in &mut self.children {
            child.retain_track_ids(keep);
        }
    }
}

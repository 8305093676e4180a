//! Playlist tree reconstruction
//!
//! The playlist hierarchy arrives as nested `NODE` events. The builder keeps
//! an explicit stack of open nodes, so recursion depth is bounded by the
//! document nesting itself; track identifiers are only collected here, never
//! followed, which rules out cycles without any detection logic.

use super::attr::Attrs;
use crate::model::PlaylistNode;

/// A `NODE` element whose end tag has not been seen yet
struct PendingNode {
    name: String,
    is_playlist: bool,
    children: Vec<PlaylistNode>,
    track_ids: Vec<u32>,
}

impl PendingNode {
    fn from_attrs(attrs: &Attrs) -> Self {
        Self {
            name: attrs.string("Name"),
            // Type="1" is a playlist; everything else is treated as a folder
            is_playlist: attrs.get("Type") == Some("1"),
            children: Vec::new(),
            track_ids: Vec::new(),
        }
    }

    fn build(self) -> PlaylistNode {
        if self.is_playlist {
            PlaylistNode::playlist(self.name, self.track_ids)
        } else {
            PlaylistNode::folder(self.name, self.children)
        }
    }
}

/// Incremental builder driven by the assembler's event loop
pub(crate) struct PlaylistTreeBuilder {
    stack: Vec<PendingNode>,
    root: Option<PlaylistNode>,
}

impl PlaylistTreeBuilder {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
        }
    }

    /// A `NODE` start tag
    pub fn open_node(&mut self, attrs: &Attrs) {
        self.stack.push(PendingNode::from_attrs(attrs));
    }

    /// A self-closing `NODE` (empty playlist or empty folder)
    pub fn leaf_node(&mut self, attrs: &Attrs) {
        let node = PendingNode::from_attrs(attrs).build();
        self.attach(node);
    }

    /// A `NODE` end tag
    pub fn close_node(&mut self) {
        if let Some(pending) = self.stack.pop() {
            let node = pending.build();
            self.attach(node);
        }
    }

    /// A `TRACK Key="…"` reference inside the current playlist
    pub fn track_ref(&mut self, attrs: &Attrs) {
        let Some(id) = attrs.parse_opt::<u32>("Key") else {
            log::debug!("skipping playlist track reference without a valid Key");
            return;
        };
        match self.stack.last_mut() {
            Some(node) if node.is_playlist => node.track_ids.push(id),
            _ => log::debug!("skipping track reference {id} outside a playlist node"),
        }
    }

    fn attach(&mut self, node: PlaylistNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        } else if self.root.is_none() {
            self.root = Some(node);
        } else {
            log::debug!("ignoring extra top-level playlist node {:?}", node.name());
        }
    }

    /// The completed root node, if the document declared one
    pub fn finish(self) -> Option<PlaylistNode> {
        self.root
    }
}

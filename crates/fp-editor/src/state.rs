//! Graph editing state: the single owner of nodes, edges, selection and
//! clipboard.
//!
//! Every mutation goes through a `GraphState` method and runs to completion
//! before the next input event is processed. Calls that name an id which no
//! longer exists are silent no-ops. Stale ids are expected when an event
//! was queued before a delete.
//!
//! Deleting a node does **not** remove edges that reference it. Such edges
//! are reported by [`GraphState::dangling_edges`] and left for the host to
//! render (or hide) as it sees fit.

use crate::config::EditorConfig;
use fp_core::id::EdgeId;
use fp_core::model::*;
use fp_core::{NodeId, Point, Size, SnapGuides, Vec2, snap_with_guides};
use smallvec::SmallVec;

#[derive(Debug, Clone, Default)]
pub struct GraphState {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Deep copies of the nodes captured by the last copy.
    clipboard: Vec<Node>,
    /// Number of pastes since the last copy; scales the paste offset.
    paste_count: u32,
    /// Guides from the most recent snapped move, for the host to draw.
    last_guides: SnapGuides,
    config: EditorConfig,
}

impl GraphState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Nodes in paint order (last = topmost).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn clipboard(&self) -> &[Node] {
        &self.clipboard
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Ids of all selected nodes, in paint order.
    pub fn selected_ids(&self) -> SmallVec<[NodeId; 4]> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id)
            .collect()
    }

    /// The node the inspector edits: the single selected node, or the first
    /// of a pasted group.
    pub fn selected_id(&self) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.selected).map(|n| n.id)
    }

    /// Edges whose source or target no longer exists.
    pub fn dangling_edges(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| !self.contains(e.source) || !self.contains(e.target))
            .map(|e| e.id)
            .collect()
    }

    /// Alignment guides hit by the last `move_node`.
    pub fn last_guides(&self) -> SnapGuides {
        self.last_guides
    }

    // ─── Node lifecycle ──────────────────────────────────────────────────

    /// Create an unselected, unmeasured machine with default data.
    pub fn add_node(&mut self, kind: NodeKind, label: &str, position: Point) -> NodeId {
        self.add_node_with(kind, MachineData::new(label), position)
    }

    /// Create a node with explicit initial data (e.g. a palette template
    /// that carries a backend machine id).
    pub fn add_node_with(&mut self, kind: NodeKind, data: MachineData, position: Point) -> NodeId {
        let id = NodeId::fresh_node();
        log::debug!(
            "add {id} ({}) at ({:.1}, {:.1})",
            data.label,
            position.x,
            position.y
        );
        self.nodes.push(Node::new(id, kind, position, data));
        id
    }

    /// Snap `raw` against the other nodes and commit it as the node's
    /// position.
    pub fn move_node(&mut self, id: NodeId, raw: Point) {
        if !self.contains(id) {
            log::trace!("move ignored: {id} does not exist");
            return;
        }
        let (position, guides) = if self.config.snap_enabled {
            snap_with_guides(id, raw, &self.nodes, self.config.snap_threshold)
        } else {
            (raw, SnapGuides::default())
        };
        self.last_guides = guides;
        if let Some(node) = self.node_mut(id) {
            node.position = position;
        }
    }

    /// Record the pixel size the renderer measured for a node.
    pub fn set_measured(&mut self, id: NodeId, size: Size) {
        match self.node_mut(id) {
            Some(node) => node.measured = Some(size),
            None => log::trace!("measure ignored: {id} does not exist"),
        }
    }

    /// Remove one node by id. Edges that reference it are kept.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        let removed = self.nodes.len() != before;
        if removed {
            log::debug!("remove {id}");
        }
        removed
    }

    // ─── Edges ───────────────────────────────────────────────────────────

    /// Append an animated edge from `source` to `target`.
    ///
    /// Duplicates and cycles are allowed. Returns `None` without creating
    /// anything if either endpoint does not exist.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        if !self.contains(source) || !self.contains(target) {
            log::debug!("connect ignored: {source} -> {target} references a missing node");
            return None;
        }
        let id = NodeId::fresh_edge();
        log::debug!("connect {source} -> {target} as {id}");
        self.edges.push(Edge::new(id, source, target));
        Some(id)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Make `id` the only selected node. Unknown ids leave selection as is.
    pub fn select_node(&mut self, id: NodeId) {
        if !self.contains(id) {
            log::trace!("select ignored: {id} does not exist");
            return;
        }
        for node in &mut self.nodes {
            node.selected = node.id == id;
        }
    }

    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
    }

    /// Remove every selected node. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|n| !n.selected);
        let removed = before - self.nodes.len();
        if removed > 0 {
            log::debug!("deleted {removed} selected node(s)");
        }
        removed
    }

    // ─── Clipboard ───────────────────────────────────────────────────────

    /// Replace the clipboard with copies of the selected nodes.
    /// Does nothing when nothing is selected.
    pub fn copy_selected(&mut self) -> usize {
        let copied: Vec<Node> = self.nodes.iter().filter(|n| n.selected).cloned().collect();
        if copied.is_empty() {
            return 0;
        }
        log::debug!("copied {} node(s)", copied.len());
        self.clipboard = copied;
        self.paste_count = 0;
        self.clipboard.len()
    }

    /// Paste the clipboard as new, selected nodes.
    ///
    /// The n-th paste after a copy lands at `n * paste_offset` from the
    /// copied positions. The clipboard itself is never modified.
    pub fn paste_clipboard(&mut self) -> Vec<NodeId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        self.paste_count += 1;
        let offset: Vec2 = self.config.paste_offset * f64::from(self.paste_count);

        self.clear_selection();
        let pasted: Vec<Node> = self
            .clipboard
            .iter()
            .map(|original| {
                let mut node = original.clone();
                node.id = NodeId::fresh_node();
                node.position = original.position + offset;
                node.selected = true;
                node
            })
            .collect();
        let ids: Vec<NodeId> = pasted.iter().map(|n| n.id).collect();
        log::debug!("pasted {} node(s), paste #{}", ids.len(), self.paste_count);
        self.nodes.extend(pasted);
        ids
    }

    // ─── Data ────────────────────────────────────────────────────────────

    /// Merge `patch` into the node's data.
    pub fn update_node_data(&mut self, id: NodeId, patch: &MachineDataPatch) {
        match self.node_mut(id) {
            Some(node) => node.data.apply(patch),
            None => log::trace!("update ignored: {id} does not exist"),
        }
    }
}

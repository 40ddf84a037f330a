//! EnergySystem: the graph container.

use std::collections::HashMap;

use ef_core::{FlowId, NodeId, TimeIndex};

use crate::error::{GraphError, GraphResult};
use crate::flow::Flow;
use crate::node::Node;
use crate::validate;

/// The full node set plus the shared time index.
///
/// Nodes live in an arena indexed by `NodeId`; removal tombstones the slot so
/// surviving ids stay valid. Flows live in a second arena, each slot co-owned
/// by the two adjacency entries of its edge and freed when the edge is
/// disconnected.
///
/// All edge mutation is validate-then-mutate: every failure path is checked
/// before either adjacency map is touched, so callers never observe a
/// half-connected edge.
#[derive(Debug, Clone)]
pub struct EnergySystem {
    time_index: TimeIndex,
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) flows: Vec<Option<Flow>>,
    free_flow_slots: Vec<u32>,
    pub(crate) by_label: HashMap<String, NodeId>,
}

impl EnergySystem {
    pub fn new(time_index: TimeIndex) -> Self {
        Self {
            time_index,
            nodes: Vec::new(),
            flows: Vec::new(),
            free_flow_slots: Vec::new(),
            by_label: HashMap::new(),
        }
    }

    pub fn time_index(&self) -> &TimeIndex {
        &self.time_index
    }

    /// Number of time steps every time-varying attribute is indexed against.
    pub fn horizon(&self) -> usize {
        self.time_index.len()
    }

    /// Add a node with a unique label and return its id.
    pub fn add_node(&mut self, label: impl Into<String>) -> GraphResult<NodeId> {
        let label = label.into();
        if self.by_label.contains_key(&label) {
            return Err(GraphError::DuplicateNode { label });
        }
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.by_label.insert(label.clone(), id);
        self.nodes.push(Some(Node::new(id, label)));
        Ok(id)
    }

    /// Create the directed edge `from -> to` carrying `flow`.
    ///
    /// Fails on a self-loop, an unknown endpoint, an already existing edge in
    /// this direction, or a flow attribute that does not match the time
    /// index. On success both adjacency maps are updated in one step and the
    /// new flow's id is returned.
    pub fn connect(&mut self, from: NodeId, to: NodeId, flow: Flow) -> GraphResult<FlowId> {
        let from_label = self.node_ref(from)?.label().to_owned();
        let to_label = self.node_ref(to)?.label().to_owned();
        if from == to {
            return Err(GraphError::SelfLoop { node: from_label });
        }
        if self.node_ref(from)?.has_output(to) {
            return Err(GraphError::DuplicateEdge {
                from: from_label,
                to: to_label,
            });
        }
        flow.validate(self.time_index.len())?;

        // Every failure path is behind us; both endpoints exist.
        let fid = self.alloc_flow(flow);
        self.node_mut(from)?.outputs.insert(to, fid);
        self.node_mut(to)?.inputs.insert(from, fid);
        Ok(fid)
    }

    /// Remove the directed edge `from -> to`, returning its flow.
    pub fn disconnect(&mut self, from: NodeId, to: NodeId) -> GraphResult<Flow> {
        let from_label = self.node_ref(from)?.label().to_owned();
        let to_label = self.node_ref(to)?.label().to_owned();
        let Some(fid) = self.node_ref(from)?.outputs.get(&to).copied() else {
            return Err(GraphError::MissingEdge {
                from: from_label,
                to: to_label,
            });
        };
        if self.node_ref(to)?.inputs.get(&from).copied() != Some(fid) {
            return Err(GraphError::Invariant {
                what: format!(
                    "edge '{from_label}' -> '{to_label}' present on the output side \
                     but not mirrored on the input side"
                ),
            });
        }

        // Take the flow first: if the arena slot is already free, fail before
        // either adjacency map is touched.
        let flow = self
            .flows
            .get_mut(fid.index() as usize)
            .and_then(Option::take)
            .ok_or_else(|| GraphError::Invariant {
                what: format!("edge '{from_label}' -> '{to_label}' references a freed flow"),
            })?;
        self.node_mut(from)?.outputs.remove(&to);
        self.node_mut(to)?.inputs.remove(&from);
        self.free_flow_slots.push(fid.index());
        Ok(flow)
    }

    /// Remove a node, disconnecting it from every neighbor in both
    /// directions first. Returns the removed label.
    pub fn remove_node(&mut self, node: NodeId) -> GraphResult<String> {
        let n = self.node_ref(node)?;
        let preds: Vec<NodeId> = n.inputs().map(|(p, _)| p).collect();
        let succs: Vec<NodeId> = n.outputs().map(|(s, _)| s).collect();
        for pred in preds {
            self.disconnect(pred, node)?;
        }
        for succ in succs {
            self.disconnect(node, succ)?;
        }
        let removed = self.nodes[node.index() as usize]
            .take()
            .ok_or(GraphError::UnknownNode { id: node })?;
        self.by_label.remove(removed.label());
        Ok(removed.label)
    }

    /// Get a node by id (None if unknown or removed).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize).and_then(Option::as_ref)
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    /// Label of a node, or a placeholder for an unknown id. For messages.
    pub fn label_of(&self, id: NodeId) -> String {
        match self.node(id) {
            Some(n) => n.label().to_owned(),
            None => format!("<removed node {id}>"),
        }
    }

    /// Iterate over all live nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().map(Node::id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn edge_count(&self) -> usize {
        self.flows.len() - self.free_flow_slots.len()
    }

    pub fn flow(&self, id: FlowId) -> Option<&Flow> {
        self.flows.get(id.index() as usize).and_then(Option::as_ref)
    }

    pub fn flow_id_between(&self, from: NodeId, to: NodeId) -> Option<FlowId> {
        self.node(from)?.outputs.get(&to).copied()
    }

    pub fn flow_between(&self, from: NodeId, to: NodeId) -> Option<&Flow> {
        self.flow(self.flow_id_between(from, to)?)
    }

    /// Predecessors of `node` with the flow arriving from each.
    pub fn inputs(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Flow)> + '_ {
        self.node(node).into_iter().flat_map(move |n| {
            n.inputs()
                .filter_map(move |(pred, fid)| self.flow(fid).map(|f| (pred, f)))
        })
    }

    /// Successors of `node` with the flow leaving toward each.
    pub fn outputs(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Flow)> + '_ {
        self.node(node).into_iter().flat_map(move |n| {
            n.outputs()
                .filter_map(move |(succ, fid)| self.flow(fid).map(|f| (succ, f)))
        })
    }

    /// Audit the bidirectional invariant and arena cross-references over the
    /// whole graph. Any failure indicates a bug in this crate.
    pub fn check_consistency(&self) -> GraphResult<()> {
        validate::check_consistency(self)
    }

    fn node_ref(&self, id: NodeId) -> GraphResult<&Node> {
        self.node(id).ok_or(GraphError::UnknownNode { id })
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(id.index() as usize)
            .and_then(Option::as_mut)
            .ok_or(GraphError::UnknownNode { id })
    }

    fn alloc_flow(&mut self, flow: Flow) -> FlowId {
        match self.free_flow_slots.pop() {
            Some(slot) => {
                self.flows[slot as usize] = Some(flow);
                FlowId::from_index(slot)
            }
            None => {
                let idx = self.flows.len() as u32;
                self.flows.push(Some(flow));
                FlowId::from_index(idx)
            }
        }
    }
}

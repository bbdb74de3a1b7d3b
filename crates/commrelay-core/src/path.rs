//! Paths through the comm network and their validation.
//!
//! The network's own path query is best-effort: it may hand back a path
//! that stops short of an unreachable destination. [`find_path`] treats
//! those as "no path" rather than partial credit.

use serde::{Deserialize, Serialize};

use crate::provider::CommProvider;
use crate::vessel::NodeId;

/// An edge between two comm nodes. Links are ephemeral — produced fresh
/// by each path query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommLink {
    pub a: NodeId,
    pub b: NodeId,
    /// Per-link strength in `(0, 1]`.
    pub strength: f64,
}

impl CommLink {
    pub fn new(a: NodeId, b: NodeId, strength: f64) -> Self {
        Self { a, b, strength }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

/// Ordered link sequence from an origin node to a destination node,
/// with the network's own aggregate strength (opaque, not recomputed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommPath {
    /// Links in traversal order; each link's `a` is the nearer endpoint.
    pub links: Vec<CommLink>,
    pub signal_strength: f64,
}

impl CommPath {
    pub fn new(links: Vec<CommLink>, signal_strength: f64) -> Self {
        Self {
            links,
            signal_strength,
        }
    }

    pub fn last(&self) -> Option<&CommLink> {
        self.links.last()
    }

    /// Whether the final link's endpoint set contains `destination`.
    pub fn terminates_at(&self, destination: NodeId) -> bool {
        self.last().map_or(false, |l| l.touches(destination))
    }

    /// Corridor strength at every node along the path: the running product
    /// of per-link strengths from the origin. The origin itself is yielded
    /// at strength 1.
    pub fn corridor_strengths(&self) -> Vec<(NodeId, f64)> {
        let mut out = Vec::with_capacity(self.links.len() + 1);
        let mut corridor = 1.0;
        for (i, link) in self.links.iter().enumerate() {
            if i == 0 {
                out.push((link.a, corridor));
            }
            corridor *= link.strength;
            out.push((link.b, corridor));
        }
        out
    }
}

/// One validated path query against the provider.
///
/// Rejects paths with no links and paths whose final link does not touch
/// the requested destination.
pub fn find_path<P: CommProvider>(
    provider: &P,
    origin: NodeId,
    destination: NodeId,
) -> Option<CommPath> {
    if origin == destination {
        return None;
    }

    let path = provider.find_path(origin, destination)?;

    if path.links.is_empty() {
        return None;
    }

    if !path.terminates_at(destination) {
        return None;
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::StaticNet;

    fn chain(ids: &[u64], strengths: &[f64]) -> CommPath {
        let links = ids
            .windows(2)
            .zip(strengths)
            .map(|(w, s)| CommLink::new(NodeId(w[0]), NodeId(w[1]), *s))
            .collect();
        CommPath::new(links, strengths.iter().product())
    }

    #[test]
    fn test_corridor_strengths_running_product() {
        let path = chain(&[1, 2, 3], &[0.5, 0.4]);
        let corridors = path.corridor_strengths();
        assert_eq!(corridors[0], (NodeId(1), 1.0));
        assert_eq!(corridors[1], (NodeId(2), 0.5));
        assert!((corridors[2].1 - 0.2).abs() < 1e-12);
        assert_eq!(corridors[2].0, NodeId(3));
    }

    #[test]
    fn test_find_path_rejects_short_path() {
        // Network "finds" a path that stops at node 2 instead of node 3.
        let mut net = StaticNet::new();
        net.add_path(NodeId(1), NodeId(3), chain(&[1, 2], &[0.9]));
        assert!(find_path(&net, NodeId(1), NodeId(3)).is_none());
    }

    #[test]
    fn test_find_path_rejects_empty_path() {
        let mut net = StaticNet::new();
        net.add_path(NodeId(1), NodeId(2), CommPath::new(vec![], 1.0));
        assert!(find_path(&net, NodeId(1), NodeId(2)).is_none());
    }

    #[test]
    fn test_find_path_rejects_self_query() {
        let net = StaticNet::new();
        assert!(find_path(&net, NodeId(1), NodeId(1)).is_none());
    }

    #[test]
    fn test_find_path_accepts_terminating_path() {
        let mut net = StaticNet::new();
        net.add_path(NodeId(1), NodeId(3), chain(&[1, 2, 3], &[0.9, 0.8]));
        let path = find_path(&net, NodeId(1), NodeId(3)).expect("valid path");
        assert_eq!(path.links.len(), 2);
        assert!(path.terminates_at(NodeId(3)));
    }

    #[test]
    fn test_find_path_none_when_disconnected() {
        let net = StaticNet::new();
        assert!(find_path(&net, NodeId(1), NodeId(2)).is_none());
    }
}

//! # Segment Stitching
//!
//! Joins per-triangle segments into maximal polylines.
//!
//! ## Algorithm
//!
//! 1. Merge segment endpoints into nodes with a spatial hash. Points computed
//!    twice for a shared mesh edge land on the same node.
//! 2. Drop segments that collapse to one node and repeated undirected
//!    segments.
//! 3. Walk from every odd-degree node in discovery order until stuck: these
//!    are the open chains.
//! 4. Walk from every node that still has unused segments; a walk that comes
//!    back to its start is a closed loop.
//! 5. Order polylines by the discovery index of their start node.
//!
//! ## Junctions
//!
//! A node with more than two segments (a non-manifold edge, or a vertex where
//! the plane touches several fans) is left through its first unused segment
//! in discovery order. Discovery order follows triangle order, so the pairing
//! is reproducible.

mod spatial_hash;


use super::segment::Segment;
use crate::polyline::{CrossSection, Polyline};
use log::{debug, trace};
use spatial_hash::NodeIndex;
use std::collections::HashSet;

/// Undirected graph of intersection nodes.
struct SegmentGraph {
    nodes: Vec<glam::DVec3>,
    edges: Vec<[usize; 2]>,
    adjacency: Vec<Vec<usize>>,
}

impl SegmentGraph {
    fn build(segments: &[Segment], tolerance: f64) -> Self {
        let mut index = NodeIndex::new(tolerance);
        let mut seen = HashSet::new();
        let mut edges = Vec::with_capacity(segments.len());

        for seg in segments {
            let a = index.insert(seg.start);
            let b = index.insert(seg.end);
            if a == b {
                trace!("segment collapsed to node {a}");
                continue;
            }
            if !seen.insert((a.min(b), a.max(b))) {
                trace!("duplicate segment {a}-{b}");
                continue;
            }
            edges.push([a, b]);
        }

        let mut adjacency = vec![Vec::new(); index.len()];
        for (e, &[a, b]) in edges.iter().enumerate() {
            adjacency[a].push(e);
            adjacency[b].push(e);
        }

        Self {
            nodes: index.nodes().to_vec(),
            edges,
            adjacency,
        }
    }

    #[inline]
    fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    #[inline]
    fn other_end(&self, edge: usize, node: usize) -> usize {
        let [a, b] = self.edges[edge];
        if a == node {
            b
        } else {
            a
        }
    }
}

/// Walk state shared across all polylines of one graph.
struct Walker<'g> {
    graph: &'g SegmentGraph,
    used: Vec<bool>,
    polylines: Vec<(usize, Polyline)>,
}

impl<'g> Walker<'g> {
    fn new(graph: &'g SegmentGraph) -> Self {
        Self {
            graph,
            used: vec![false; graph.edges.len()],
            polylines: Vec::new(),
        }
    }

    fn next_unused(&self, node: usize) -> Option<usize> {
        self.graph.adjacency[node]
            .iter()
            .copied()
            .find(|&e| !self.used[e])
    }

    /// Walks from `start` until no unused segment remains or the walk
    /// returns to `start`.
    fn walk(&mut self, start: usize) {
        let mut points = vec![self.graph.nodes[start]];
        let mut current = start;

        while let Some(edge) = self.next_unused(current) {
            self.used[edge] = true;
            current = self.graph.other_end(edge, current);
            points.push(self.graph.nodes[current]);
            if current == start {
                break;
            }
        }

        let closed = current == start && points.len() > 1;
        self.polylines.push((start, Polyline::new(points, closed)));
    }

    fn drain_from(&mut self, start: usize) {
        while self.next_unused(start).is_some() {
            self.walk(start);
        }
    }
}

/// Stitches segments into polylines, merging endpoints closer than
/// `tolerance`.
pub(crate) fn stitch(segments: &[Segment], tolerance: f64) -> CrossSection {
    let graph = SegmentGraph::build(segments, tolerance);
    let node_count = graph.nodes.len();

    let junctions = (0..node_count).filter(|&n| graph.degree(n) > 2).count();
    if junctions > 0 {
        debug!("{junctions} stitch nodes have more than two segments; pairing by discovery order");
    }

    let mut walker = Walker::new(&graph);

    // Open chains start at free ends
    for node in 0..node_count {
        if graph.degree(node) % 2 == 1 {
            walker.drain_from(node);
        }
    }

    // Whatever remains forms loops
    for node in 0..node_count {
        walker.drain_from(node);
    }

    let mut polylines = walker.polylines;
    polylines.sort_by_key(|(start, _)| *start);

    let point_count = (0..node_count).filter(|&n| graph.degree(n) > 0).count();
    debug!(
        "stitched {} segments into {} polylines over {point_count} points",
        graph.edges.len(),
        polylines.len()
    );

    CrossSection::new(
        polylines.into_iter().map(|(_, polyline)| polyline).collect(),
        point_count,
    )
}

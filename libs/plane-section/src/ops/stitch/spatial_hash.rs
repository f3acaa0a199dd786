//! Grid-based spatial hash that assigns node ids to intersection points.
//!
//! Space is divided into cubic cells twice the merge tolerance wide. A new
//! point is compared only against nodes in its cell and the 26 neighbours;
//! if one lies within tolerance its id is reused, otherwise a new node is
//! appended. Node ids are dense and follow discovery order.

use glam::DVec3;
use std::collections::HashMap;

type CellKey = (i64, i64, i64);

/// Tolerance-merging point index.
pub(crate) struct NodeIndex {
    cells: HashMap<CellKey, Vec<usize>>,
    nodes: Vec<DVec3>,
    cell_size: f64,
    tolerance: f64,
}

impl NodeIndex {
    /// Creates an index where points within `tolerance` share a node.
    pub fn new(tolerance: f64) -> Self {
        Self {
            cells: HashMap::new(),
            nodes: Vec::new(),
            cell_size: tolerance * 2.0,
            tolerance,
        }
    }

    #[inline]
    fn cell_coords(&self, p: DVec3) -> CellKey {
        // `as` saturates, so huge or NaN coordinates still land in some cell
        let discretize = |v: f64| (v / self.cell_size).floor() as i64;
        (discretize(p.x), discretize(p.y), discretize(p.z))
    }

    /// Earliest node within tolerance of `point`, if any.
    pub fn find(&self, point: DVec3) -> Option<usize> {
        let (cx, cy, cz) = self.cell_coords(point);
        let mut best: Option<usize> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(ids) = self.cells.get(&key) else {
                        continue;
                    };
                    for &id in ids {
                        if self.nodes[id].distance(point) <= self.tolerance
                            && best.map_or(true, |b| id < b)
                        {
                            best = Some(id);
                        }
                    }
                }
            }
        }

        best
    }

    /// Returns the id of the node matching `point`, creating one if needed.
    pub fn insert(&mut self, point: DVec3) -> usize {
        if let Some(id) = self.find(point) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(point);
        let key = self.cell_coords(point);
        self.cells.entry(key).or_default().push(id);
        id
    }

    /// Node positions indexed by id.
    pub fn nodes(&self) -> &[DVec3] {
        &self.nodes
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

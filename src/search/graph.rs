//! Alternate quadrilateral search over an intersection graph.
//!
//! Nodes are in-bounds pairwise intersections; two nodes are connected when
//! they share exactly one line. A depth-first walk collects 4-cycles whose
//! edges use four distinct lines, which are exactly the closed quadrilateral
//! contours expressible by the line set. Ported from an alternate entry path
//! of the original system; selectable through the [`QuadSearch`] seam but
//! not wired into the default pipeline.

use super::{angle_in_range, best_by_area, in_bounds, QuadSearch, SearchParams};
use crate::geometry::{Line, Point};
use crate::quad::BoundaryQuad;
use log::debug;
use std::collections::HashSet;

/// Maximum line/point incidence error (degrees) tolerated when admitting a
/// graph node; guards against numerically unstable intersections of
/// near-parallel lines.
const INCIDENCE_TOL_DEG: f64 = 0.5;

#[derive(Clone, Copy, Debug)]
struct Node {
    point: Point,
    lines: (usize, usize),
}

impl Node {
    fn shares_line(&self, other: &Node) -> Option<usize> {
        let (a0, a1) = self.lines;
        let (b0, b1) = other.lines;
        let shared: Vec<usize> = [a0, a1]
            .into_iter()
            .filter(|l| *l == b0 || *l == b1)
            .collect();
        if shared.len() == 1 {
            Some(shared[0])
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GraphSearch;

impl QuadSearch for GraphSearch {
    fn find_quad(
        &self,
        lines: &[Line],
        image_width: f64,
        image_height: f64,
        params: &SearchParams,
    ) -> Option<BoundaryQuad> {
        let n = lines.len();
        if n < params.min_bundle_count || n > params.max_bundle_count {
            debug!("graph search skipped: {n} lines outside configured bounds");
            return None;
        }

        let nodes = build_nodes(lines, image_width, image_height);
        debug!("graph search: {} intersection nodes", nodes.len());
        if nodes.len() < 4 {
            return None;
        }

        let adjacency = build_adjacency(&nodes);
        let mut seen: HashSet<[usize; 4]> = HashSet::new();
        let mut candidates = Vec::new();

        'walk: for start in 0..nodes.len() {
            for &a in &adjacency[start] {
                for &b in &adjacency[a] {
                    if b == start {
                        continue;
                    }
                    for &c in &adjacency[b] {
                        if c == start || c == a {
                            continue;
                        }
                        if !adjacency[c].contains(&start) {
                            continue;
                        }
                        let cycle = [start, a, b, c];
                        if !is_quad_cycle(&nodes, &cycle) {
                            continue;
                        }
                        let mut key = cycle;
                        key.sort_unstable();
                        if !seen.insert(key) {
                            continue;
                        }
                        if let Some(quad) = evaluate_cycle(lines, &nodes, &cycle, params) {
                            candidates.push(quad);
                            if let Some(limit) = params.max_candidates {
                                if candidates.len() >= limit {
                                    break 'walk;
                                }
                            }
                        }
                    }
                }
            }
        }
        debug!("graph search collected {} candidates", candidates.len());
        best_by_area(candidates)
    }
}

fn build_nodes(lines: &[Line], width: f64, height: f64) -> Vec<Node> {
    let mut nodes = Vec::new();
    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            if let Some(point) = lines[i].intersection(&lines[j]) {
                if !in_bounds(&point, width, height) {
                    continue;
                }
                if lines[i].angle_to_point_deg(point) > INCIDENCE_TOL_DEG
                    || lines[j].angle_to_point_deg(point) > INCIDENCE_TOL_DEG
                {
                    continue;
                }
                nodes.push(Node {
                    point,
                    lines: (i, j),
                });
            }
        }
    }
    nodes
}

fn build_adjacency(nodes: &[Node]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); nodes.len()];
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if nodes[i].shares_line(&nodes[j]).is_some() {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }
    adjacency
}

/// A 4-cycle is a quadrilateral contour when its four nodes involve exactly
/// four distinct lines and each consecutive pair shares a different one.
fn is_quad_cycle(nodes: &[Node], cycle: &[usize; 4]) -> bool {
    let mut edge_lines = [0usize; 4];
    for i in 0..4 {
        let a = &nodes[cycle[i]];
        let b = &nodes[cycle[(i + 1) % 4]];
        match a.shares_line(b) {
            Some(line) => edge_lines[i] = line,
            None => return false,
        }
    }
    let mut distinct = edge_lines;
    distinct.sort_unstable();
    distinct.windows(2).all(|w| w[0] != w[1])
}

fn evaluate_cycle(
    lines: &[Line],
    nodes: &[Node],
    cycle: &[usize; 4],
    params: &SearchParams,
) -> Option<BoundaryQuad> {
    for &idx in cycle {
        let node = &nodes[idx];
        let angle = lines[node.lines.0].angle_between_deg(&lines[node.lines.1]);
        if !angle_in_range(angle, params.vertex_angle_range_deg) {
            return None;
        }
    }
    Some(BoundaryQuad::from_unordered([
        nodes[cycle[0]].point,
        nodes[cycle[1]].point,
        nodes[cycle[2]].point,
        nodes[cycle[3]].point,
    ]))
}

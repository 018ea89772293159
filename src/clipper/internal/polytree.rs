//! Region tree: nesting structure of contours and holes produced by a
//! boolean operation, stored as an arena of nodes addressed by index.

use crate::core::math::{Point, SCALED_EPSILON, SCALED_EPSILON_SQR};
use crate::geometry::{BoundingBox, ExPolygon, ExPolygons, Polygon, Polygons};

/// One contour in the region tree. Children alternate meaning by depth:
/// children of a filled contour are its holes, children of a hole are the
/// islands nested inside it.
#[derive(Debug, Clone)]
pub struct PolyNode {
    pub contour: Polygon,
    pub children: Vec<usize>,
    pub parent: Option<usize>,
}

/// Arena of [`PolyNode`]s with the top level contours listed as roots.
/// Traversal works on indices only.
#[derive(Debug, Clone, Default)]
pub struct PolyTree {
    nodes: Vec<PolyNode>,
    roots: Vec<usize>,
}

impl PolyTree {
    /// Build the nesting tree of an already resolved (non self overlapping)
    /// path set by containment, preserving each path's winding as given.
    pub fn from_paths(paths: Polygons) -> PolyTree {
        let bboxes: Vec<BoundingBox> = paths.iter().map(|p| p.bounding_box()).collect();
        let areas: Vec<i128> = paths.iter().map(|p| p.area2().abs()).collect();

        // place big contours first so each path only has to look at already
        // placed candidates for its tightest enclosing parent
        let mut order: Vec<usize> = (0..paths.len()).collect();
        order.sort_by(|&a, &b| areas[b].cmp(&areas[a]).then(a.cmp(&b)));

        let mut parent_of: Vec<Option<usize>> = vec![None; paths.len()];
        for (rank, &i) in order.iter().enumerate() {
            let mut best: Option<usize> = None;
            for &j in order.iter().take(rank) {
                if !bboxes[j].overlaps(&bboxes[i]) {
                    continue;
                }
                if !polygon_encloses(&paths[j], &paths[i]) {
                    continue;
                }
                let better = match best {
                    Some(b) => areas[j] < areas[b],
                    None => true,
                };
                if better {
                    best = Some(j);
                }
            }
            parent_of[i] = best;
        }

        let mut nodes: Vec<PolyNode> = paths
            .into_iter()
            .map(|contour| PolyNode {
                contour,
                children: Vec::new(),
                parent: None,
            })
            .collect();
        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            match parent_of[i] {
                Some(p) => {
                    nodes[i].parent = Some(p);
                    nodes[p].children.push(i);
                }
                None => roots.push(i),
            }
        }
        PolyTree { nodes, roots }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    #[inline]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    #[inline]
    pub fn node(&self, index: usize) -> &PolyNode {
        &self.nodes[index]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drop top level contours, and direct holes of surviving ones, that are
    /// too thin relative to their own extent (the [`test_path`] predicate).
    /// A dropped node takes its whole subtree with it.
    pub fn remove_small_nodes(&mut self) {
        self.roots
            .retain(|&r| !test_path(&self.nodes[r].contour.points));
        let roots = self.roots.clone();
        for r in roots {
            let node = &self.nodes[r];
            let small: Vec<usize> = node
                .children
                .iter()
                .copied()
                .filter(|&h| test_path(&self.nodes[h].contour.points))
                .collect();
            if !small.is_empty() {
                self.nodes[r].children.retain(|h| !small.contains(h));
            }
        }
    }
}

/// True when `inner` nests inside `outer`. Boundary touching points make a
/// single vertex probe unreliable, so a couple of probes are tried.
fn polygon_encloses(outer: &Polygon, inner: &Polygon) -> bool {
    let pts = &inner.points;
    if pts.is_empty() {
        return false;
    }
    if outer.contains_point(pts[0]) {
        return true;
    }
    if pts.len() >= 2 {
        let mid = Point::new(
            (pts[0].x + pts[1].x) / 2,
            (pts[0].y + pts[1].y) / 2,
        );
        if outer.contains_point(mid) {
            return true;
        }
        if outer.contains_point(pts[1]) {
            return true;
        }
    }
    false
}

/// True when the path is degenerate: its area is smaller than the area of a
/// `2 * SCALED_EPSILON` wide band along its own maximum vertex to centroid
/// distance, i.e. too thin relative to its extent rather than merely small.
pub fn test_path(path: &[Point]) -> bool {
    if path.len() < 3 {
        return true;
    }
    let area = Polygon::from_points(path.to_vec()).area().abs();
    let inv_n = 1.0 / path.len() as f64;
    let cx = path.iter().map(|p| p.x as f64).sum::<f64>() * inv_n;
    let cy = path.iter().map(|p| p.y as f64).sum::<f64>() * inv_n;
    let max_dist_sqr = path
        .iter()
        .map(|p| {
            let dx = p.x as f64 - cx;
            let dy = p.y as f64 - cy;
            dx * dx + dy * dy
        })
        .fold(0.0f64, f64::max);
    area < (2.0 * SCALED_EPSILON as f64) * max_dist_sqr.sqrt()
}

/// Drop paths failing the [`test_path`] thinness predicate.
pub fn remove_small_areas(polygons: &mut Polygons) {
    polygons.retain(|p| !test_path(&p.points));
}

fn keep_contour(contour: &Polygon) -> bool {
    // a clockwise outer contour is engine noise unless it is big enough to
    // be real geometry that merely lost its orientation
    if !contour.is_counter_clockwise()
        && (contour.points.len() < 5
            || contour.area().abs() < 10.0 * SCALED_EPSILON_SQR as f64)
    {
        return false;
    }
    if contour.points.len() == 3 {
        let p = &contour.points;
        if p[0].coincides_with_epsilon(p[1])
            || p[1].coincides_with_epsilon(p[2])
            || p[2].coincides_with_epsilon(p[0])
        {
            return false;
        }
    }
    true
}

/// Flatten a region tree into regions with holes.
///
/// Direct children of the root become sibling outer regions, each outer's
/// children become its holes, and every hole's own children recurse as new
/// top level outer regions ("island in a lake"). Degenerate contours are
/// pruned, and kept contours/holes are re-oriented to the kernel convention.
pub fn polytree_to_expolygons(tree: PolyTree) -> ExPolygons {
    let mut out = Vec::new();
    collect_outer_level(&tree, tree.roots(), &mut out);
    out
}

fn collect_outer_level(tree: &PolyTree, outer_indices: &[usize], out: &mut ExPolygons) {
    for &ci in outer_indices {
        let node = tree.node(ci);
        if !keep_contour(&node.contour) {
            continue;
        }
        let mut contour = node.contour.clone();
        contour.make_counter_clockwise();
        let mut ex = ExPolygon::new(contour);
        for &hi in &node.children {
            let hole_node = tree.node(hi);
            let mut hole = hole_node.contour.clone();
            if hole.is_valid() {
                hole.make_clockwise();
                ex.holes.push(hole);
            }
            collect_outer_level(tree, &hole_node.children, out);
        }
        out.push(ex);
    }
}

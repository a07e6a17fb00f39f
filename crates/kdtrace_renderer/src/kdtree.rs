//! Kd-tree acceleration structure over triangles.
//!
//! Nodes are split on axis-aligned planes placed at the median of the
//! triangles' box coordinates. The split rule favours balanced counts over
//! surface-area cost, which keeps construction fast. Triangles whose boxes
//! straddle a split plane are referenced from both children, so a ray can
//! test the same triangle from more than one leaf.

use crate::{hit::Geometry, Hit, Ray, Triangle};
use kdtrace_math::{bounding_box, Aabb, Axis, BoundsResult, Interval};

/// Nodes holding fewer triangles than this become leaves.
const LEAF_MAX_SIZE: usize = 8;

/// A split is only taken if the bigger side holds fewer than this fraction
/// of the node's triangles.
const SPLIT_RATIO: f64 = 0.85;

/// Kd-tree node - either a split plane with two children or a leaf.
///
/// Children are owned exclusively; triangles live in the tree's arena and
/// leaves refer to them by index.
#[derive(Debug)]
pub enum KdNode {
    /// Internal node. `left` holds triangles whose boxes reach below (or
    /// onto) the plane, `right` those reaching above (or onto) it.
    Split {
        axis: Axis,
        point: f32,
        left: Box<KdNode>,
        right: Box<KdNode>,
    },
    /// Leaf node with indices into the tree's triangle list.
    Leaf { triangles: Vec<usize> },
}

/// Shape summary of a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KdTreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
    /// Sum of leaf sizes; exceeds the triangle count when triangles straddle
    pub triangle_refs: usize,
}

/// A kd-tree over a triangle mesh.
#[derive(Debug)]
pub struct KdTree {
    /// Box around every triangle; node boxes are implied by the splits
    bounds: Aabb,
    root: KdNode,
    triangles: Vec<Triangle>,
}

impl KdTree {
    /// Build a tree over `triangles`.
    ///
    /// Fails with `InsufficientInput` when there is no geometry to bound.
    pub fn build(triangles: Vec<Triangle>) -> BoundsResult<Self> {
        let vertices: Vec<_> = triangles.iter().flat_map(|t| t.vertices()).collect();
        let bounds = bounding_box(&vertices)?;

        // Boxes are only needed while building
        let boxes: Vec<Aabb> = triangles.iter().map(Triangle::bounding_box).collect();
        let root = KdNode::build((0..triangles.len()).collect(), &boxes);

        let tree = Self {
            bounds,
            root,
            triangles,
        };

        let stats = tree.stats();
        log::info!(
            "Built kd-tree: {} triangles, {} nodes, {} leaves, depth {}, {} leaf refs",
            tree.triangles.len(),
            stats.nodes,
            stats.leaves,
            stats.max_depth,
            stats.triangle_refs
        );

        Ok(tree)
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn root(&self) -> &KdNode {
        &self.root
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Nearest triangle hit along `ray`, or [`Hit::NONE`].
    pub fn intersect(&self, ray: &Ray) -> Hit {
        let range = self.bounds.intersect(ray);
        if range.is_empty() || range.max <= 0.0 {
            return Hit::NONE;
        }
        self.root.intersect(&self.triangles, ray, range)
    }

    /// Walk the tree and summarize its shape.
    pub fn stats(&self) -> KdTreeStats {
        let mut stats = KdTreeStats::default();
        self.root.collect_stats(0, &mut stats);
        stats
    }
}

impl KdNode {
    /// Recursive construction over the triangles named by `indices`.
    fn build(indices: Vec<usize>, boxes: &[Aabb]) -> Self {
        if indices.len() < LEAF_MAX_SIZE {
            return KdNode::Leaf { triangles: indices };
        }

        let mut best = (indices.len() as f64 * SPLIT_RATIO) as usize;
        let mut best_split = None;

        for axis in Axis::ALL {
            let mut coords: Vec<f32> = indices
                .iter()
                .flat_map(|&i| [axis.of(boxes[i].min), axis.of(boxes[i].max)])
                .collect();
            coords.sort_unstable_by(f32::total_cmp);

            let point = median(&coords);
            let score = partition_score(&indices, boxes, axis, point);
            if score < best {
                best = score;
                best_split = Some((axis, point));
            }
        }

        let Some((axis, point)) = best_split else {
            return KdNode::Leaf { triangles: indices };
        };

        let (left, right) = partition(&indices, boxes, axis, point);
        // The parent keeps no triangles once split
        drop(indices);

        KdNode::Split {
            axis,
            point,
            left: Box::new(Self::build(left, boxes)),
            right: Box::new(Self::build(right, boxes)),
        }
    }

    /// Nearest hit within this subtree for the parametric range `range`.
    fn intersect(&self, triangles: &[Triangle], ray: &Ray, range: Interval) -> Hit {
        match self {
            KdNode::Leaf { triangles: indices } => indices
                .iter()
                .map(|&i| triangles[i].intersect(ray))
                .fold(Hit::NONE, Hit::closer),

            KdNode::Split {
                axis,
                point,
                left,
                right,
            } => {
                let origin = axis.of(ray.origin);
                let direction = axis.of(ray.direction);
                let t_split = (point - origin) / direction;

                // Origin exactly on the plane: the direction decides which
                // half-space the ray enters first
                let left_first = origin < *point || (origin == *point && direction <= 0.0);
                let (near, far) = if left_first {
                    (left, right)
                } else {
                    (right, left)
                };

                if t_split > range.max || t_split <= 0.0 {
                    near.intersect(triangles, ray, range)
                } else if t_split < range.min {
                    far.intersect(triangles, ray, range)
                } else {
                    let near_hit = near.intersect(triangles, ray, range.with_max(t_split));
                    // Nothing past the plane can beat a hit before it
                    if near_hit.t <= t_split {
                        return near_hit;
                    }
                    let far_range = range.with_min(t_split).with_max(range.max.min(near_hit.t));
                    near_hit.closer(far.intersect(triangles, ray, far_range))
                }
            }
        }
    }

    fn collect_stats(&self, depth: usize, stats: &mut KdTreeStats) {
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);
        match self {
            KdNode::Leaf { triangles } => {
                stats.leaves += 1;
                stats.triangle_refs += triangles.len();
            }
            KdNode::Split { left, right, .. } => {
                left.collect_stats(depth + 1, stats);
                right.collect_stats(depth + 1, stats);
            }
        }
    }
}

/// Larger of the two side counts for a candidate plane. Straddling boxes
/// count toward both sides.
fn partition_score(indices: &[usize], boxes: &[Aabb], axis: Axis, point: f32) -> usize {
    let (mut left, mut right) = (0, 0);
    for &i in indices {
        let (l, r) = boxes[i].partition(axis, point);
        left += l as usize;
        right += r as usize;
    }
    left.max(right)
}

/// Split `indices` by the plane; straddling triangles go to both sides.
fn partition(
    indices: &[usize],
    boxes: &[Aabb],
    axis: Axis,
    point: f32,
) -> (Vec<usize>, Vec<usize>) {
    let mut left = Vec::with_capacity(indices.len());
    let mut right = Vec::with_capacity(indices.len());
    for &i in indices {
        let (l, r) = boxes[i].partition(axis, point);
        if l {
            left.push(i);
        }
        if r {
            right.push(i);
        }
    }
    (left, right)
}

/// Median of sorted values; the mean of the middle pair for even lengths.
fn median(sorted: &[f32]) -> f32 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

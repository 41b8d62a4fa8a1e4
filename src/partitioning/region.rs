//! Regions of space backed by an inside/outside labeled BSP tree

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::partitioning::boundary::BoundarySize;
use crate::partitioning::bsp::{BspTree, InternalNode, LeafTag};
use crate::partitioning::factory::RegionFactory;
use crate::partitioning::{Branch, Hyperplane, Location, Side, SubHyperplane, Transform};
use std::fmt::Debug;
use std::sync::OnceLock;

/// Point type of the space a region lives in
pub type RegionPoint<R> = <<R as Region>::Hyperplane as Hyperplane>::Point;

/// Sub-hyperplane type of the space a region lives in
pub type RegionSub<R> = <<R as Region>::Hyperplane as Hyperplane>::Sub;

/// Size and barycenter of a region
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricalProperties<P> {
    pub size: Real,
    pub barycenter: P,
}

/// State shared by every concrete region: the tree, the tolerance and the cached properties.
#[derive(Debug, Clone)]
pub struct AbstractRegion<H: Hyperplane> {
    tree: BspTree<H>,
    tolerance: Real,
    properties: OnceLock<GeometricalProperties<H::Point>>,
}

impl<H: Hyperplane> AbstractRegion<H> {
    /// Region covering the whole space
    pub fn whole_space(tolerance: Real) -> Self {
        Self::from_tree(BspTree::Leaf(LeafTag::Inside), tolerance)
    }

    /// Region backed by an already labeled tree
    pub fn from_tree(tree: BspTree<H>, tolerance: Real) -> Self {
        Self {
            tree,
            tolerance,
            properties: OnceLock::new(),
        }
    }

    /// Region enclosed by a boundary.
    ///
    /// The boundary elements must be oriented so that the inside of the
    /// region is on the minus side of each of them. Larger elements are
    /// inserted first; elements whose hyperplane no longer cuts the cell they
    /// fall in are ignored. An empty boundary gives the whole space.
    pub fn from_boundary<I>(boundary: I, tolerance: Real) -> Self
    where
        I: IntoIterator<Item = H::Sub>,
    {
        let mut boundary: Vec<H::Sub> = boundary.into_iter().collect();
        if boundary.is_empty() {
            return Self::whole_space(tolerance);
        }

        // decreasing size, stable so that equal sized elements keep their order
        boundary.sort_by(|a, b| b.size().total_cmp(&a.size()));

        let mut tree = BspTree::default();
        insert_cuts(&mut tree, &mut Vec::new(), boundary);
        tag_boundary_leaves(&mut tree);
        log::trace!("built region tree with {} leaves from boundary", tree.leaf_count());
        Self::from_tree(tree, tolerance)
    }

    pub const fn tree(&self) -> &BspTree<H> {
        &self.tree
    }

    pub fn into_tree(self) -> BspTree<H> {
        self.tree
    }

    pub const fn tolerance(&self) -> Real {
        self.tolerance
    }
}

/// Insert the boundary elements top-down: the first element cutting the
/// cell becomes the cut, the others are distributed between the children.
fn insert_cuts<H: Hyperplane>(node: &mut BspTree<H>, ancestors: &mut Vec<(H, Branch)>, boundary: Vec<H::Sub>) {
    let mut remaining = boundary.into_iter();
    let inserted = loop {
        match remaining.next() {
            Some(sub) => {
                if node.insert_cut_within(sub.hyperplane(), &ancestors[..]) {
                    break sub.hyperplane().clone();
                }
            },
            None => return,
        }
    };

    let mut plus_list = Vec::new();
    let mut minus_list = Vec::new();
    for other in remaining {
        match other.side(&inserted) {
            Side::Plus => plus_list.push(other),
            Side::Minus => minus_list.push(other),
            Side::Both => {
                let split = other.split(&inserted);
                plus_list.extend(split.plus);
                minus_list.extend(split.minus);
            },
            // already represented by the cut
            Side::Hyper => {},
        }
    }
    if plus_list.is_empty() && minus_list.is_empty() {
        return;
    }

    if let BspTree::Internal(internal) = node {
        ancestors.push((inserted.clone(), Branch::Plus));
        insert_cuts(&mut internal.plus, ancestors, plus_list);
        ancestors.pop();
        ancestors.push((inserted, Branch::Minus));
        insert_cuts(&mut internal.minus, ancestors, minus_list);
        ancestors.pop();
    }
}

/// Plus side leaves are outside, minus side leaves and a lone root leaf are inside.
fn tag_boundary_leaves<H: Hyperplane>(tree: &mut BspTree<H>) {
    let mut stack = vec![(tree, LeafTag::Inside)];
    while let Some((node, tag)) = stack.pop() {
        match node {
            BspTree::Leaf(leaf) => *leaf = tag,
            BspTree::Internal(internal) => {
                let InternalNode { plus, minus, .. } = &mut **internal;
                stack.push((plus, LeafTag::Outside));
                stack.push((minus, LeafTag::Inside));
            },
        }
    }
}

/// Check if a sub-tree only contains outside leaves.
pub fn is_empty_tree<H: Hyperplane>(tree: &BspTree<H>) -> bool {
    match tree {
        BspTree::Leaf(tag) => !tag.is_inside(),
        BspTree::Internal(node) => is_empty_tree(&node.plus) && is_empty_tree(&node.minus),
    }
}

/// Check if a sub-tree only contains inside leaves.
pub fn is_full_tree<H: Hyperplane>(tree: &BspTree<H>) -> bool {
    match tree {
        BspTree::Leaf(tag) => tag.is_inside(),
        BspTree::Internal(node) => is_full_tree(&node.plus) && is_full_tree(&node.minus),
    }
}

/// Location of a point with respect to the region described by a sub-tree.
///
/// Points closer than `tolerance` to a cut are classified on both sides of
/// it; if the two answers differ the point is on the boundary.
pub fn check_point_from<H: Hyperplane>(tree: &BspTree<H>, point: &H::Point, tolerance: Real) -> Location {
    match tree.cell_with_tolerance(point, tolerance) {
        BspTree::Leaf(tag) => {
            if tag.is_inside() {
                Location::Inside
            } else {
                Location::Outside
            }
        },
        BspTree::Internal(node) => {
            let minus = check_point_from(&node.minus, point, tolerance);
            let plus = check_point_from(&node.plus, point, tolerance);
            if minus == plus { minus } else { Location::Boundary }
        },
    }
}

/// Flags gathered while classifying a hyperplane against a region
#[derive(Default)]
struct Sides {
    plus: bool,
    minus: bool,
}

impl Sides {
    const fn both(&self) -> bool {
        self.plus && self.minus
    }
}

fn inside_or_internal<H: Hyperplane>(tree: &BspTree<H>) -> bool {
    match tree {
        BspTree::Leaf(tag) => tag.is_inside(),
        BspTree::Internal(_) => true,
    }
}

fn recurse_sides<H: Hyperplane>(tree: &BspTree<H>, sub: &H::Sub, sides: &mut Sides) {
    let node = match tree {
        BspTree::Leaf(tag) => {
            if tag.is_inside() {
                // an inside cell expanding across the hyperplane
                sides.plus = true;
                sides.minus = true;
            }
            return;
        },
        BspTree::Internal(node) => node,
    };

    let hyperplane = node.cut.hyperplane();
    match sub.side(hyperplane) {
        Side::Plus => {
            let cut_on_plus = node.cut.side(sub.hyperplane()) == Side::Plus;
            if !is_empty_tree(&node.minus) {
                if cut_on_plus {
                    sides.plus = true;
                } else {
                    sides.minus = true;
                }
            }
            if !sides.both() {
                recurse_sides(&node.plus, sub, sides);
            }
        },
        Side::Minus => {
            let cut_on_plus = node.cut.side(sub.hyperplane()) == Side::Plus;
            if !is_empty_tree(&node.plus) {
                if cut_on_plus {
                    sides.plus = true;
                } else {
                    sides.minus = true;
                }
            }
            if !sides.both() {
                recurse_sides(&node.minus, sub, sides);
            }
        },
        Side::Both => {
            let split = sub.split(hyperplane);
            if let Some(plus) = &split.plus {
                recurse_sides(&node.plus, plus, sides);
            }
            if !sides.both() {
                if let Some(minus) = &split.minus {
                    recurse_sides(&node.minus, minus, sides);
                }
            }
        },
        Side::Hyper => {
            let same = hyperplane.same_orientation_as(sub.hyperplane());
            if inside_or_internal(&node.plus) {
                if same {
                    sides.plus = true;
                } else {
                    sides.minus = true;
                }
            }
            if inside_or_internal(&node.minus) {
                if same {
                    sides.minus = true;
                } else {
                    sides.plus = true;
                }
            }
        },
    }
}

fn recurse_intersection<H: Hyperplane>(tree: &BspTree<H>, sub: H::Sub) -> Option<H::Sub> {
    let node = match tree {
        BspTree::Leaf(tag) => return tag.is_inside().then_some(sub),
        BspTree::Internal(node) => node,
    };
    let hyperplane = node.cut.hyperplane();
    match sub.side(hyperplane) {
        Side::Plus => recurse_intersection(&node.plus, sub),
        Side::Minus => recurse_intersection(&node.minus, sub),
        Side::Both => {
            let split = sub.split(hyperplane);
            let plus = split.plus.and_then(|part| recurse_intersection(&node.plus, part));
            let minus = split.minus.and_then(|part| recurse_intersection(&node.minus, part));
            match (plus, minus) {
                (Some(plus), Some(minus)) => Some(plus.reunite(&minus)),
                (plus, minus) => plus.or(minus),
            }
        },
        Side::Hyper => recurse_intersection(&node.minus, sub)
            .and_then(|part| recurse_intersection(&node.plus, part)),
    }
}

fn recurse_transform<H: Hyperplane>(tree: &BspTree<H>, transform: &dyn Transform<H>) -> BspTree<H> {
    match tree {
        BspTree::Leaf(tag) => BspTree::Leaf(*tag),
        BspTree::Internal(node) => {
            let transformed = InternalNode::new(
                node.cut.transformed(transform),
                recurse_transform(&node.plus, transform),
                recurse_transform(&node.minus, transform),
            );
            if let Some(attribute) = node.boundary.get() {
                let _ = transformed.boundary.set(crate::partitioning::BoundaryAttribute::new(
                    attribute.plus_outside.as_ref().map(|sub| sub.transformed(transform)),
                    attribute.plus_inside.as_ref().map(|sub| sub.transformed(transform)),
                ));
            }
            BspTree::Internal(Box::new(transformed))
        },
    }
}

/// A region of space, the common interface of every concrete region type.
///
/// Implementors only provide access to their [`AbstractRegion`] core, a way
/// to build a sibling region from a tree, and the computation of size and
/// barycenter; everything else is shared.
pub trait Region: Clone + Debug + Sized {
    type Hyperplane: Hyperplane;

    fn core(&self) -> &AbstractRegion<Self::Hyperplane>;

    /// New region of the same type and tolerance backed by `tree`
    fn build_new(&self, tree: BspTree<Self::Hyperplane>) -> Self;

    /// Size and barycenter, computed from scratch
    fn compute_geometrical_properties(&self) -> GeometricalProperties<RegionPoint<Self>>;

    fn tree(&self) -> &BspTree<Self::Hyperplane> {
        self.core().tree()
    }

    fn tolerance(&self) -> Real {
        self.core().tolerance()
    }

    /// Independent copy of the region, with fresh caches
    fn copy_self(&self) -> Self {
        self.build_new(self.tree().clone())
    }

    fn check_point(&self, point: &RegionPoint<Self>) -> Location {
        check_point_from(self.tree(), point, self.tolerance())
    }

    /// Check if the region contains no inside cell
    fn is_empty(&self) -> bool {
        is_empty_tree(self.tree())
    }

    /// Check if the region covers the whole space
    fn is_full(&self) -> bool {
        is_full_tree(self.tree())
    }

    /// Check if the sub-tree rooted at `node` contains no inside cell
    fn is_empty_from(&self, node: &BspTree<Self::Hyperplane>) -> bool {
        is_empty_tree(node)
    }

    /// Check if the sub-tree rooted at `node` contains only inside cells
    fn is_full_from(&self, node: &BspTree<Self::Hyperplane>) -> bool {
        is_full_tree(node)
    }

    /// Check if `other` lies entirely within this region
    fn contains(&self, other: &Self) -> bool {
        RegionFactory::difference(other, self).is_empty()
    }

    /// Cached size and barycenter
    fn properties(&self) -> &GeometricalProperties<RegionPoint<Self>> {
        self.core()
            .properties
            .get_or_init(|| self.compute_geometrical_properties())
    }

    fn size(&self) -> Real {
        self.properties().size
    }

    fn barycenter(&self) -> RegionPoint<Self> {
        self.properties().barycenter.clone()
    }

    /// Tree of the region with all its boundary attributes computed
    fn tree_with_boundary(&self) -> Result<&BspTree<Self::Hyperplane>, GeometryError> {
        self.tree().compute_boundary_attributes()?;
        Ok(self.tree())
    }

    /// Total size of the boundary
    fn boundary_size(&self) -> Result<Real, GeometryError> {
        let mut visitor = BoundarySize { size: 0.0 };
        self.tree_with_boundary()?.visit(&mut visitor);
        Ok(visitor.size)
    }

    /// Side of the region with respect to a hyperplane.
    ///
    /// [`Side::Hyper`] means the region has no inside part on either side.
    fn side(&self, hyperplane: &Self::Hyperplane) -> Side {
        let mut sides = Sides::default();
        recurse_sides(self.tree(), &hyperplane.whole_hyperplane(), &mut sides);
        match (sides.plus, sides.minus) {
            (true, true) => Side::Both,
            (true, false) => Side::Plus,
            (false, true) => Side::Minus,
            (false, false) => Side::Hyper,
        }
    }

    /// Part of a sub-hyperplane lying inside the region
    fn intersection(&self, sub: &RegionSub<Self>) -> Option<RegionSub<Self>> {
        recurse_intersection(self.tree(), sub.clone())
    }

    /// Transformed copy of the region
    fn apply_transform(&self, transform: &dyn Transform<Self::Hyperplane>) -> Self {
        self.build_new(recurse_transform(self.tree(), transform))
    }
}

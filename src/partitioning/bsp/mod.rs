//! Binary Space Partitioning (BSP) tree
//!
//! ```text
//!             [cut]
//!            /     \
//!        plus       minus
//!     (offset > 0) (offset <= 0)
//! ```
//!
//! Leaves carry a [`LeafTag`]; internal nodes carry the cut sub-hyperplane
//! (already fitted to the cell defined by their ancestors), both children
//! and a lazily computed [`BoundaryAttribute`].
//!
//! Nodes do not know their parent. Operations that need the ancestors of a
//! node either start from the root with an explicit [`Branch`] path, or carry
//! the ancestor hyperplanes down the recursion.

pub mod merge;
pub mod visitor;

use crate::partitioning::boundary::BoundaryAttribute;
use crate::partitioning::{Branch, Hyperplane, SubHyperplane};
use crate::float_types::Real;
use std::sync::OnceLock;

pub use merge::{LeafMerger, VanishingCutHandler, VanishingToLeaf};

/// Inside/outside status carried by a leaf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LeafTag {
    Inside,
    Outside,
    /// Freshly created by a cut insertion, not labeled yet
    #[default]
    Undetermined,
}

impl LeafTag {
    pub const fn from_inside(inside: bool) -> Self {
        if inside { LeafTag::Inside } else { LeafTag::Outside }
    }

    /// Only [`LeafTag::Inside`] is inside; undetermined cells are not.
    pub const fn is_inside(self) -> bool {
        matches!(self, LeafTag::Inside)
    }

    /// Swap inside and outside, keep undetermined.
    pub const fn complement(self) -> Self {
        match self {
            LeafTag::Inside => LeafTag::Outside,
            LeafTag::Outside => LeafTag::Inside,
            LeafTag::Undetermined => LeafTag::Undetermined,
        }
    }
}

/// A node of a BSP tree; the tree is identified with its root node.
#[derive(Debug, Clone)]
pub enum BspTree<H: Hyperplane> {
    Leaf(LeafTag),
    Internal(Box<InternalNode<H>>),
}

/// Internal node: a cut and the two half-space sub-trees it separates.
#[derive(Debug)]
pub struct InternalNode<H: Hyperplane> {
    /// Cut sub-hyperplane, restricted to the cell of the node.
    pub cut: H::Sub,

    /// Sub-tree on the plus side of the cut.
    pub plus: BspTree<H>,

    /// Sub-tree on the minus side of the cut.
    pub minus: BspTree<H>,

    /// Lazily computed boundary parts of the cut.
    pub(crate) boundary: OnceLock<BoundaryAttribute<H::Sub>>,
}

/// Deep copy; computed boundary attributes are not carried over.
impl<H: Hyperplane> Clone for InternalNode<H> {
    fn clone(&self) -> Self {
        Self::new(self.cut.clone(), self.plus.clone(), self.minus.clone())
    }
}

impl<H: Hyperplane> InternalNode<H> {
    pub fn new(cut: H::Sub, plus: BspTree<H>, minus: BspTree<H>) -> Self {
        Self {
            cut,
            plus,
            minus,
            boundary: OnceLock::new(),
        }
    }

    pub const fn child(&self, branch: Branch) -> &BspTree<H> {
        match branch {
            Branch::Plus => &self.plus,
            Branch::Minus => &self.minus,
        }
    }

    pub const fn child_mut(&mut self, branch: Branch) -> &mut BspTree<H> {
        match branch {
            Branch::Plus => &mut self.plus,
            Branch::Minus => &mut self.minus,
        }
    }

    /// Boundary attribute, if it has already been computed
    /// (see [`Region::tree_with_boundary`](crate::partitioning::Region::tree_with_boundary)).
    pub fn boundary_attribute(&self) -> Option<&BoundaryAttribute<H::Sub>> {
        self.boundary.get()
    }
}

impl<H: Hyperplane> Default for BspTree<H> {
    fn default() -> Self {
        BspTree::Leaf(LeafTag::Undetermined)
    }
}

impl<H: Hyperplane> BspTree<H> {
    /// Single leaf tree
    pub const fn leaf(tag: LeafTag) -> Self {
        BspTree::Leaf(tag)
    }

    /// Internal node built from an already fitted cut and two sub-trees
    pub fn internal(cut: H::Sub, plus: BspTree<H>, minus: BspTree<H>) -> Self {
        BspTree::Internal(Box::new(InternalNode::new(cut, plus, minus)))
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, BspTree::Leaf(_))
    }

    /// Tag of a leaf, `None` for internal nodes
    pub const fn leaf_tag(&self) -> Option<LeafTag> {
        match self {
            BspTree::Leaf(tag) => Some(*tag),
            BspTree::Internal(_) => None,
        }
    }

    /// Relabel a leaf. Returns false (and does nothing) on internal nodes.
    pub fn set_leaf_tag(&mut self, tag: LeafTag) -> bool {
        match self {
            BspTree::Leaf(current) => {
                *current = tag;
                true
            },
            BspTree::Internal(_) => false,
        }
    }

    pub fn cut(&self) -> Option<&H::Sub> {
        match self {
            BspTree::Leaf(_) => None,
            BspTree::Internal(node) => Some(&node.cut),
        }
    }

    pub fn plus(&self) -> Option<&BspTree<H>> {
        match self {
            BspTree::Leaf(_) => None,
            BspTree::Internal(node) => Some(&node.plus),
        }
    }

    pub fn minus(&self) -> Option<&BspTree<H>> {
        match self {
            BspTree::Leaf(_) => None,
            BspTree::Internal(node) => Some(&node.minus),
        }
    }

    /// Node reached by following `path` from this node
    pub fn node(&self, path: &[Branch]) -> Option<&BspTree<H>> {
        let mut node = self;
        for &branch in path {
            match node {
                BspTree::Internal(internal) => node = internal.child(branch),
                BspTree::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Mutable node reached by following `path` from this node
    pub fn node_mut(&mut self, path: &[Branch]) -> Option<&mut BspTree<H>> {
        let mut node = self;
        for &branch in path {
            match node {
                BspTree::Internal(internal) => node = internal.child_mut(branch),
                BspTree::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Hyperplanes of the cuts crossed by `path`, with the branch taken below each of them.
    ///
    /// Returns `None` if the path leaves the tree.
    pub fn ancestors(&self, path: &[Branch]) -> Option<Vec<(H, Branch)>> {
        let mut ancestors = Vec::with_capacity(path.len());
        let mut node = self;
        for &branch in path {
            match node {
                BspTree::Internal(internal) => {
                    ancestors.push((internal.cut.hyperplane().clone(), branch));
                    node = internal.child(branch);
                },
                BspTree::Leaf(_) => return None,
            }
        }
        Some(ancestors)
    }

    /// Insert a cut at the root of a tree (see [`insert_cut_at`](Self::insert_cut_at)).
    pub fn insert_cut(&mut self, hyperplane: &H) -> bool {
        self.insert_cut_within(hyperplane, &[])
    }

    /// Insert a cut in the leaf addressed by `path`.
    ///
    /// The hyperplane is first fitted to the cell of the leaf by chopping it
    /// with every ancestor cut. If nothing of it remains inside the cell, the
    /// tree is left unchanged and false is returned. Otherwise the leaf
    /// becomes an internal node with two [`LeafTag::Undetermined`] children;
    /// its previous tag is discarded.
    ///
    /// Internal nodes are never re-cut: addressing one returns false.
    pub fn insert_cut_at(&mut self, path: &[Branch], hyperplane: &H) -> bool {
        let Some(ancestors) = self.ancestors(path) else {
            return false;
        };
        match self.node_mut(path) {
            Some(node) => node.insert_cut_within(hyperplane, &ancestors),
            None => false,
        }
    }

    /// Insert a cut in this leaf, knowing the ancestors of the node.
    pub(crate) fn insert_cut_within(&mut self, hyperplane: &H, ancestors: &[(H, Branch)]) -> bool {
        if !self.is_leaf() {
            log::debug!("refusing to re-cut an internal node");
            return false;
        }
        match fit_to_cell(hyperplane.whole_hyperplane(), ancestors) {
            Some(chopped) if !chopped.is_empty() => {
                *self = BspTree::internal(chopped, BspTree::default(), BspTree::default());
                true
            },
            _ => {
                log::debug!("cut {:?} does not intersect its cell, rejected", hyperplane);
                false
            },
        }
    }

    /// Leaf cell containing a point.
    ///
    /// Points lying exactly on a cut (zero offset) are sent to the minus side.
    pub fn cell(&self, point: &H::Point) -> &BspTree<H> {
        let mut node = self;
        while let BspTree::Internal(internal) = node {
            node = if internal.cut.hyperplane().offset(point) <= 0.0 {
                &internal.minus
            } else {
                &internal.plus
            };
        }
        node
    }

    /// Cell containing a point, stopping on cuts the point lies on.
    ///
    /// The descent stops at the first internal node (closest to the root)
    /// whose cut hyperplane is closer than `tolerance` to the point, and
    /// returns that internal node. Otherwise the leaf cell is returned, with
    /// the same minus-side convention as [`cell`](Self::cell).
    pub fn cell_with_tolerance(&self, point: &H::Point, tolerance: Real) -> &BspTree<H> {
        let mut node = self;
        while let BspTree::Internal(internal) = node {
            let offset = internal.cut.hyperplane().offset(point);
            if offset.abs() < tolerance {
                return node;
            }
            node = if offset <= 0.0 {
                &internal.minus
            } else {
                &internal.plus
            };
        }
        node
    }

    /// Path from this node to the leaf returned by [`cell`](Self::cell)
    pub fn path_to_cell(&self, point: &H::Point) -> Vec<Branch> {
        let mut path = Vec::new();
        let mut node = self;
        while let BspTree::Internal(internal) = node {
            let branch = if internal.cut.hyperplane().offset(point) <= 0.0 {
                Branch::Minus
            } else {
                Branch::Plus
            };
            path.push(branch);
            node = internal.child(branch);
        }
        path
    }

    /// Build the minimal tree isolating the convex cell of the leaf addressed by `path`.
    ///
    /// The result only keeps the cuts on the path from the root to the leaf;
    /// the cell itself is tagged `cell_tag` and every other leaf `other_tag`.
    /// Returns `None` if `path` does not address a leaf.
    pub fn prune_around_convex_cell(
        &self,
        path: &[Branch],
        cell_tag: LeafTag,
        other_tag: LeafTag,
    ) -> Option<BspTree<H>> {
        let mut cuts = Vec::with_capacity(path.len());
        let mut node = self;
        for &branch in path {
            match node {
                BspTree::Internal(internal) => {
                    cuts.push((internal.cut.clone(), branch));
                    node = internal.child(branch);
                },
                BspTree::Leaf(_) => return None,
            }
        }
        if !node.is_leaf() {
            return None;
        }

        // build the pruned tree bottom-up
        let mut tree = BspTree::Leaf(cell_tag);
        for (cut, branch) in cuts.into_iter().rev() {
            tree = match branch {
                Branch::Plus => BspTree::internal(cut, tree, BspTree::Leaf(other_tag)),
                Branch::Minus => BspTree::internal(cut, BspTree::Leaf(other_tag), tree),
            };
        }
        Some(tree)
    }

    /// Replace an internal node whose children are equally tagged leaves by a single leaf.
    pub fn condensed(self) -> Self {
        match self {
            BspTree::Internal(internal) => match (internal.plus.leaf_tag(), internal.minus.leaf_tag()) {
                (Some(plus), Some(minus)) if plus == minus => BspTree::Leaf(plus),
                _ => BspTree::Internal(internal),
            },
            leaf => leaf,
        }
    }

    /// Copy of the tree with inside and outside leaves swapped.
    ///
    /// Already computed boundary attributes are carried over with their two parts swapped.
    pub fn complemented(&self) -> Self {
        match self {
            BspTree::Leaf(tag) => BspTree::Leaf(tag.complement()),
            BspTree::Internal(internal) => {
                let node = InternalNode::new(
                    internal.cut.clone(),
                    internal.plus.complemented(),
                    internal.minus.complemented(),
                );
                if let Some(attribute) = internal.boundary.get() {
                    let _ = node.boundary.set(attribute.swapped());
                }
                BspTree::Internal(Box::new(node))
            },
        }
    }

    /// Drop every cached boundary attribute.
    pub fn clear_boundary_attributes(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let BspTree::Internal(internal) = node {
                let InternalNode {
                    plus,
                    minus,
                    boundary,
                    ..
                } = &mut **internal;
                *boundary = OnceLock::new();
                stack.push(plus);
                stack.push(minus);
            }
        }
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                BspTree::Leaf(_) => count += 1,
                BspTree::Internal(internal) => {
                    stack.push(&internal.plus);
                    stack.push(&internal.minus);
                },
            }
        }
        count
    }

    /// Number of cuts on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                BspTree::Leaf(_) => deepest = deepest.max(depth),
                BspTree::Internal(internal) => {
                    stack.push((&internal.plus, depth + 1));
                    stack.push((&internal.minus, depth + 1));
                },
            }
        }
        deepest
    }

    /// Structural equality: same shape, same leaf tags, and cuts accepted by `same_cut`.
    pub fn same_structure_by<F>(&self, other: &BspTree<H>, same_cut: F) -> bool
    where
        F: Fn(&H::Sub, &H::Sub) -> bool,
    {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            match (a, b) {
                (BspTree::Leaf(ta), BspTree::Leaf(tb)) => {
                    if ta != tb {
                        return false;
                    }
                },
                (BspTree::Internal(na), BspTree::Internal(nb)) => {
                    if !same_cut(&na.cut, &nb.cut) {
                        return false;
                    }
                    stack.push((&na.plus, &nb.plus));
                    stack.push((&na.minus, &nb.minus));
                },
                _ => return false,
            }
        }
        true
    }
}

/// Chop a whole hyperplane by every ancestor cut, keeping the part on the branch leading to the cell.
///
/// `ancestors` is ordered from the root down.
pub(crate) fn fit_to_cell<H: Hyperplane>(whole: H::Sub, ancestors: &[(H, Branch)]) -> Option<H::Sub> {
    let mut chopped = whole;
    for (hyperplane, branch) in ancestors.iter().rev() {
        let split = chopped.split(hyperplane);
        chopped = match branch {
            Branch::Plus => split.plus?,
            Branch::Minus => split.minus?,
        };
    }
    Some(chopped)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn leaf_tag_complement() {
        assert_eq!(LeafTag::Inside.complement(), LeafTag::Outside);
        assert_eq!(LeafTag::Outside.complement(), LeafTag::Inside);
        assert_eq!(LeafTag::Undetermined.complement(), LeafTag::Undetermined);
        assert!(!LeafTag::Undetermined.is_inside());
        assert_eq!(LeafTag::from_inside(true), LeafTag::Inside);
    }
}

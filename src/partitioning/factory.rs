//! Boolean operations on regions

use crate::partitioning::bsp::{BspTree, LeafMerger, LeafTag, VanishingToLeaf};
use crate::partitioning::{Branch, Hyperplane, Region};

/// Builds new regions by combining or complementing existing ones.
///
/// Operands are never modified; every result is a fresh region of the same
/// type as its first operand, sharing its tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionFactory;

impl RegionFactory {
    /// Convex region bounded by a set of hyperplanes.
    ///
    /// The region lies on the minus side of every hyperplane. Hyperplanes
    /// that do not cut the region built so far are ignored. Returns `None`
    /// when no hyperplane is given.
    pub fn build_convex<H: Hyperplane>(hyperplanes: &[H]) -> Option<H::WholeSpace> {
        let first = hyperplanes.first()?;
        let whole_space = first.whole_space();

        let mut tree = BspTree::Leaf(LeafTag::Inside);
        let mut path = Vec::with_capacity(hyperplanes.len());
        for hyperplane in hyperplanes {
            if tree.insert_cut_at(&path, hyperplane) {
                path.push(Branch::Plus);
                if let Some(plus) = tree.node_mut(&path) {
                    plus.set_leaf_tag(LeafTag::Outside);
                }
                path.pop();
                path.push(Branch::Minus);
                if let Some(minus) = tree.node_mut(&path) {
                    minus.set_leaf_tag(LeafTag::Inside);
                }
            } else {
                log::debug!("hyperplane {:?} does not cut the convex region, ignored", hyperplane);
            }
        }

        Some(whole_space.build_new(tree))
    }

    /// Region covering the points of either operand
    pub fn union<R: Region>(region1: &R, region2: &R) -> R {
        Self::combine(region1, region2, &UnionMerger)
    }

    /// Region covering the points common to both operands
    pub fn intersection<R: Region>(region1: &R, region2: &R) -> R {
        Self::combine(region1, region2, &IntersectionMerger)
    }

    /// Region covering the points belonging to exactly one operand
    pub fn xor<R: Region>(region1: &R, region2: &R) -> R {
        Self::combine(region1, region2, &XorMerger)
    }

    /// Region covering the points of `region1` not in `region2`
    pub fn difference<R: Region>(region1: &R, region2: &R) -> R {
        Self::combine(region1, region2, &DifferenceMerger)
    }

    /// Region covering the points outside of `region`
    pub fn complement<R: Region>(region: &R) -> R {
        region.build_new(region.tree().complemented())
    }

    fn combine<R: Region, M: LeafMerger<R::Hyperplane>>(region1: &R, region2: &R, merger: &M) -> R {
        let mut tree = region1.tree().merge(region2.tree(), merger);
        // attributes copied from the operands do not describe the result
        tree.clear_boundary_attributes();
        region1.build_new(tree)
    }
}

struct UnionMerger;

impl<H: Hyperplane> LeafMerger<H> for UnionMerger {
    fn merge_leaf(&self, leaf: LeafTag, tree: &BspTree<H>, _: bool) -> (BspTree<H>, VanishingToLeaf) {
        if leaf.is_inside() {
            (BspTree::Leaf(leaf), VanishingToLeaf::new(true))
        } else {
            (tree.clone(), VanishingToLeaf::new(false))
        }
    }
}

struct IntersectionMerger;

impl<H: Hyperplane> LeafMerger<H> for IntersectionMerger {
    fn merge_leaf(&self, leaf: LeafTag, tree: &BspTree<H>, _: bool) -> (BspTree<H>, VanishingToLeaf) {
        if leaf.is_inside() {
            (tree.clone(), VanishingToLeaf::new(true))
        } else {
            (BspTree::Leaf(leaf), VanishingToLeaf::new(false))
        }
    }
}

struct XorMerger;

impl<H: Hyperplane> LeafMerger<H> for XorMerger {
    fn merge_leaf(&self, leaf: LeafTag, tree: &BspTree<H>, _: bool) -> (BspTree<H>, VanishingToLeaf) {
        let merged = if leaf.is_inside() {
            tree.complemented()
        } else {
            tree.clone()
        };
        (merged, VanishingToLeaf::new(true))
    }
}

struct DifferenceMerger;

impl<H: Hyperplane> LeafMerger<H> for DifferenceMerger {
    fn merge_leaf(
        &self,
        leaf: LeafTag,
        tree: &BspTree<H>,
        leaf_from_instance: bool,
    ) -> (BspTree<H>, VanishingToLeaf) {
        let merged = match (leaf.is_inside(), leaf_from_instance) {
            // inside of the first operand, keep what is outside of the second one
            (true, true) => tree.complemented(),
            (true, false) => BspTree::Leaf(leaf.complement()),
            (false, true) => BspTree::Leaf(leaf),
            (false, false) => tree.clone(),
        };
        (merged, VanishingToLeaf::new(false))
    }
}

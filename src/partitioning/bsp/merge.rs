//! Tree merging and splitting
//!
//! Merging two trees walks down the first one, splitting the second one by
//! each cut it meets. When one side reaches a leaf, a [`LeafMerger`] decides
//! what replaces it, and the replacement is inserted in the partially built
//! result, chopping off whatever lies outside of the current cell.

use crate::partitioning::bsp::{BspTree, InternalNode, LeafTag, fit_to_cell};
use crate::partitioning::{Branch, Hyperplane, Side, SplitSubHyperplane, SubHyperplane};

/// Combination rule applied when the merge reaches a leaf on either side
pub trait LeafMerger<H: Hyperplane> {
    /// Merge a leaf with a sub-tree covering the same cell.
    ///
    /// `leaf_from_instance` is true when the leaf belongs to the first
    /// operand of the merge and `tree` to the second one, false otherwise.
    /// Returns the tree replacing the cell and the handler to use if some
    /// of its cuts vanish while fitting it in the cell.
    fn merge_leaf(
        &self,
        leaf: LeafTag,
        tree: &BspTree<H>,
        leaf_from_instance: bool,
    ) -> (BspTree<H>, VanishingToLeaf);
}

/// Fix-up for internal nodes whose cut vanished while being chopped
pub trait VanishingCutHandler<H: Hyperplane> {
    /// Replacement for a node that lost its cut
    fn fix_node(&self, node: InternalNode<H>) -> BspTree<H>;
}

/// Replace nodes whose cut vanished by a leaf.
///
/// If both children are leaves sharing the same tag that tag is kept,
/// otherwise the node becomes inside or outside depending on `inside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VanishingToLeaf {
    pub inside: bool,
}

impl VanishingToLeaf {
    pub const fn new(inside: bool) -> Self {
        Self { inside }
    }
}

impl<H: Hyperplane> VanishingCutHandler<H> for VanishingToLeaf {
    fn fix_node(&self, node: InternalNode<H>) -> BspTree<H> {
        match (node.plus.leaf_tag(), node.minus.leaf_tag()) {
            (Some(plus), Some(minus)) if plus == minus => BspTree::Leaf(plus),
            _ => BspTree::Leaf(LeafTag::from_inside(self.inside)),
        }
    }
}

impl<H: Hyperplane> BspTree<H> {
    /// Merge this tree with another one.
    ///
    /// Neither operand is modified; the result is a new tree, with no
    /// boundary attributes computed.
    pub fn merge<M: LeafMerger<H> + ?Sized>(&self, other: &BspTree<H>, merger: &M) -> BspTree<H> {
        let mut ancestors = Vec::new();
        merge_within(self, other, merger, &mut ancestors)
    }

    /// Split this tree by a sub-hyperplane.
    ///
    /// The result has `sub` as its root cut, the parts of this tree lying on
    /// the plus side of it as plus child and the parts lying on the minus
    /// side as minus child. `sub` must already be fitted to the cell this
    /// tree covers.
    pub fn split(&self, sub: &H::Sub) -> BspTree<H> {
        let node = match self {
            BspTree::Leaf(tag) => {
                return BspTree::internal(sub.clone(), BspTree::Leaf(*tag), BspTree::Leaf(*tag));
            },
            BspTree::Internal(node) => node,
        };

        let sub_hyperplane = sub.hyperplane();
        let sub_parts = sub.split(node.cut.hyperplane());
        match sub_parts {
            SplitSubHyperplane {
                plus: Some(_),
                minus: None,
            } => {
                // sub only crosses the plus sub-tree
                let mut split = node.plus.split(sub);
                let cut_side = node.cut.split(sub_hyperplane).side();
                if let BspTree::Internal(parts) = &mut split {
                    let slot = parts.child_mut(side_branch(cut_side));
                    let part = std::mem::take(slot);
                    *slot = BspTree::internal(node.cut.clone(), part, node.minus.clone()).condensed();
                }
                split
            },
            SplitSubHyperplane {
                plus: None,
                minus: Some(_),
            } => {
                // sub only crosses the minus sub-tree
                let mut split = node.minus.split(sub);
                let cut_side = node.cut.split(sub_hyperplane).side();
                if let BspTree::Internal(parts) = &mut split {
                    let slot = parts.child_mut(side_branch(cut_side));
                    let part = std::mem::take(slot);
                    *slot = BspTree::internal(node.cut.clone(), node.plus.clone(), part).condensed();
                }
                split
            },
            SplitSubHyperplane {
                plus: Some(sub_plus),
                minus: Some(sub_minus),
            } => {
                // sub and cut cross each other
                let cut_parts = node.cut.split(sub_hyperplane);
                let (plus_plus, plus_minus) = node.plus.split(&sub_plus).into_children();
                let (minus_plus, minus_minus) = node.minus.split(&sub_minus).into_children();
                let cut_plus = cut_parts.plus.unwrap_or_else(|| {
                    log::debug!("cut vanished on the plus side of a crossing sub-hyperplane");
                    node.cut.clone()
                });
                let cut_minus = cut_parts.minus.unwrap_or_else(|| {
                    log::debug!("cut vanished on the minus side of a crossing sub-hyperplane");
                    node.cut.clone()
                });
                BspTree::internal(
                    sub.clone(),
                    BspTree::internal(cut_plus, plus_plus, minus_plus).condensed(),
                    BspTree::internal(cut_minus, plus_minus, minus_minus).condensed(),
                )
            },
            SplitSubHyperplane {
                plus: None,
                minus: None,
            } => {
                // sub lies on the cut hyperplane
                if node.cut.hyperplane().same_orientation_as(sub_hyperplane) {
                    BspTree::internal(sub.clone(), node.plus.clone(), node.minus.clone())
                } else {
                    BspTree::internal(sub.clone(), node.minus.clone(), node.plus.clone())
                }
            },
        }
    }

    /// Plus and minus children of an internal node, or two copies of a leaf
    fn into_children(self) -> (BspTree<H>, BspTree<H>) {
        match self {
            BspTree::Leaf(tag) => (BspTree::Leaf(tag), BspTree::Leaf(tag)),
            BspTree::Internal(node) => {
                let InternalNode { plus, minus, .. } = *node;
                (plus, minus)
            },
        }
    }
}

const fn side_branch(side: Side) -> Branch {
    match side {
        Side::Plus => Branch::Plus,
        _ => Branch::Minus,
    }
}

fn merge_within<H, M>(
    tree: &BspTree<H>,
    other: &BspTree<H>,
    merger: &M,
    ancestors: &mut Vec<(H, Branch)>,
) -> BspTree<H>
where
    H: Hyperplane,
    M: LeafMerger<H> + ?Sized,
{
    let node = match (tree, other) {
        (BspTree::Leaf(tag), _) => {
            let (merged, handler) = merger.merge_leaf(*tag, other, true);
            return insert_in_tree(merged, ancestors, &handler);
        },
        (_, BspTree::Leaf(tag)) => {
            let (merged, handler) = merger.merge_leaf(*tag, tree, false);
            return insert_in_tree(merged, ancestors, &handler);
        },
        (BspTree::Internal(node), BspTree::Internal(_)) => node,
    };

    let (cut, other_plus, other_minus) = match other.split(&node.cut) {
        BspTree::Internal(split) => {
            let InternalNode { cut, plus, minus, .. } = *split;
            (cut, plus, minus)
        },
        leaf => return leaf,
    };

    ancestors.push((cut.hyperplane().clone(), Branch::Plus));
    let plus = merge_within(&node.plus, &other_plus, merger, ancestors);
    if let Some(last) = ancestors.last_mut() {
        last.1 = Branch::Minus;
    }
    let minus = merge_within(&node.minus, &other_minus, merger, ancestors);
    ancestors.pop();

    match BspTree::internal(cut, plus, minus).condensed() {
        BspTree::Internal(mut merged) => {
            // the cut may extend further now that some cells have been merged
            match fit_to_cell(merged.cut.hyperplane().whole_hyperplane(), ancestors) {
                Some(fitted) => merged.cut = fitted,
                None => log::trace!("merged cut does not fit its cell, keeping it as is"),
            }
            BspTree::Internal(merged)
        },
        leaf => leaf,
    }
}

/// Fit a tree in the cell defined by `ancestors` (ordered from the root down).
///
/// Every cut is chopped by the ancestor hyperplanes, keeping only the part
/// lying on the branch leading to the cell. Nodes whose cut vanishes are
/// replaced through `handler`.
pub(crate) fn insert_in_tree<H: Hyperplane>(
    tree: BspTree<H>,
    ancestors: &[(H, Branch)],
    handler: &dyn VanishingCutHandler<H>,
) -> BspTree<H> {
    let mut tree = tree;
    for (hyperplane, branch) in ancestors.iter().rev() {
        let mut node = match tree {
            BspTree::Internal(node) => node,
            leaf => return leaf,
        };
        let kept = pick(node.cut.split(hyperplane), *branch);
        node.plus = chop_off(std::mem::take(&mut node.plus), hyperplane, *branch, handler);
        node.minus = chop_off(std::mem::take(&mut node.minus), hyperplane, *branch, handler);
        tree = match kept {
            Some(cut) => {
                node.cut = cut;
                BspTree::Internal(node)
            },
            None => handler.fix_node(*node),
        };
    }
    tree.condensed()
}

/// Chop off the parts of a tree lying on the side of `hyperplane` opposite to `keep`.
fn chop_off<H: Hyperplane>(
    tree: BspTree<H>,
    hyperplane: &H,
    keep: Branch,
    handler: &dyn VanishingCutHandler<H>,
) -> BspTree<H> {
    match tree {
        BspTree::Leaf(_) => tree,
        BspTree::Internal(mut node) => {
            let kept = pick(node.cut.split(hyperplane), keep);
            node.plus = chop_off(std::mem::take(&mut node.plus), hyperplane, keep, handler);
            node.minus = chop_off(std::mem::take(&mut node.minus), hyperplane, keep, handler);
            match kept {
                Some(cut) => {
                    node.cut = cut;
                    BspTree::Internal(node)
                },
                None => handler.fix_node(*node),
            }
        },
    }
}

fn pick<S>(parts: SplitSubHyperplane<S>, branch: Branch) -> Option<S> {
    match branch {
        Branch::Plus => parts.plus,
        Branch::Minus => parts.minus,
    }
}

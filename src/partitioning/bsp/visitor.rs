//! Tree traversal with a caller-chosen order at each internal node

use crate::partitioning::Hyperplane;
use crate::partitioning::bsp::{BspTree, InternalNode, LeafTag};

/// Order in which the cut of an internal node ("sub") and its two sub-trees are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    PlusMinusSub,
    PlusSubMinus,
    MinusPlusSub,
    MinusSubPlus,
    SubPlusMinus,
    SubMinusPlus,
}

#[derive(Clone, Copy)]
enum Visit {
    Plus,
    Minus,
    Sub,
}

impl Order {
    const fn sequence(self) -> [Visit; 3] {
        match self {
            Order::PlusMinusSub => [Visit::Plus, Visit::Minus, Visit::Sub],
            Order::PlusSubMinus => [Visit::Plus, Visit::Sub, Visit::Minus],
            Order::MinusPlusSub => [Visit::Minus, Visit::Plus, Visit::Sub],
            Order::MinusSubPlus => [Visit::Minus, Visit::Sub, Visit::Plus],
            Order::SubPlusMinus => [Visit::Sub, Visit::Plus, Visit::Minus],
            Order::SubMinusPlus => [Visit::Sub, Visit::Minus, Visit::Plus],
        }
    }
}

/// Callbacks invoked while walking a [`BspTree`]
pub trait BspTreeVisitor<H: Hyperplane> {
    /// Order to use for the given internal node
    fn visit_order(&mut self, node: &InternalNode<H>) -> Order;

    /// Called when the cut of an internal node is reached in the chosen order
    fn visit_internal_node(&mut self, node: &InternalNode<H>);

    fn visit_leaf_node(&mut self, _tag: LeafTag) {}
}

enum Step<'a, H: Hyperplane> {
    Enter(&'a BspTree<H>),
    Sub(&'a InternalNode<H>),
}

impl<H: Hyperplane> BspTree<H> {
    /// Walk the whole tree, calling back `visitor` on every node.
    pub fn visit<V: BspTreeVisitor<H> + ?Sized>(&self, visitor: &mut V) {
        let mut stack = vec![Step::Enter(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(BspTree::Leaf(tag)) => visitor.visit_leaf_node(*tag),
                Step::Enter(BspTree::Internal(node)) => {
                    let node: &InternalNode<H> = node;
                    // pushed in reverse so that the first item is popped first
                    for item in visitor.visit_order(node).sequence().iter().rev() {
                        stack.push(match item {
                            Visit::Plus => Step::Enter(&node.plus),
                            Visit::Minus => Step::Enter(&node.minus),
                            Visit::Sub => Step::Sub(node),
                        });
                    }
                },
                Step::Sub(node) => visitor.visit_internal_node(node),
            }
        }
    }
}

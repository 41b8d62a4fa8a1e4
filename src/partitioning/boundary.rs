//! Boundary extraction
//!
//! The boundary of a region is made of the parts of the cuts separating an
//! inside cell from an outside cell. For each internal node those parts are
//! found by characterizing the cut against both of its sub-trees.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::partitioning::bsp::visitor::{BspTreeVisitor, Order};
use crate::partitioning::bsp::{BspTree, InternalNode};
use crate::partitioning::{Hyperplane, SubHyperplane};

/// Parts of a cut belonging to the region boundary.
///
/// `plus_outside` has the outside of the region on its plus side,
/// `plus_inside` has the inside on its plus side. Either may be absent.
#[derive(Debug, Clone)]
pub struct BoundaryAttribute<S> {
    pub plus_outside: Option<S>,
    pub plus_inside: Option<S>,
}

impl<S: Clone> BoundaryAttribute<S> {
    pub const fn new(plus_outside: Option<S>, plus_inside: Option<S>) -> Self {
        Self {
            plus_outside,
            plus_inside,
        }
    }

    /// Attribute of the same cut once inside and outside are exchanged
    pub fn swapped(&self) -> Self {
        Self {
            plus_outside: self.plus_inside.clone(),
            plus_inside: self.plus_outside.clone(),
        }
    }
}

/// Partition of a sub-hyperplane into the parts touching inside and outside leaves of a tree
#[derive(Debug, Clone)]
pub struct Characterization<S> {
    outside_touching: Option<S>,
    inside_touching: Option<S>,
}

impl<S: SubHyperplane> Characterization<S> {
    /// Characterize `sub` against `tree`.
    ///
    /// Fails with [`GeometryError::Internal`] if a piece of `sub` turns out
    /// to lie on a cut of `tree`, which cannot happen when `sub` is a cut of
    /// a parent node of `tree`.
    pub fn new(tree: &BspTree<S::Hyperplane>, sub: S) -> Result<Self, GeometryError> {
        let mut characterization = Self {
            outside_touching: None,
            inside_touching: None,
        };
        let mut pending = vec![(tree, sub)];
        while let Some((node, sub)) = pending.pop() {
            match node {
                BspTree::Leaf(tag) => {
                    if tag.is_inside() {
                        Self::add(&mut characterization.inside_touching, sub);
                    } else {
                        Self::add(&mut characterization.outside_touching, sub);
                    }
                },
                BspTree::Internal(internal) => {
                    let split = sub.split(internal.cut.hyperplane());
                    match (split.plus, split.minus) {
                        (Some(plus), Some(minus)) => {
                            pending.push((&internal.plus, plus));
                            pending.push((&internal.minus, minus));
                        },
                        (Some(_), None) => pending.push((&internal.plus, sub)),
                        (None, Some(_)) => pending.push((&internal.minus, sub)),
                        (None, None) => {
                            return Err(GeometryError::Internal(
                                "sub-hyperplane lies on a cut of its own sub-tree",
                            ));
                        },
                    }
                },
            }
        }
        Ok(characterization)
    }

    fn add(touching: &mut Option<S>, sub: S) {
        *touching = Some(match touching.take() {
            Some(previous) => previous.reunite(&sub),
            None => sub,
        });
    }

    pub const fn touch_outside(&self) -> bool {
        self.outside_touching.is_some()
    }

    pub const fn touch_inside(&self) -> bool {
        self.inside_touching.is_some()
    }

    /// Parts of the sub-hyperplane touching outside leaves
    pub const fn outside_touching(&self) -> Option<&S> {
        self.outside_touching.as_ref()
    }

    /// Parts of the sub-hyperplane touching inside leaves
    pub const fn inside_touching(&self) -> Option<&S> {
        self.inside_touching.as_ref()
    }

    pub fn into_parts(self) -> (Option<S>, Option<S>) {
        (self.outside_touching, self.inside_touching)
    }
}

/// Boundary attribute of a single internal node
pub(crate) fn boundary_of<H: Hyperplane>(
    node: &InternalNode<H>,
) -> Result<BoundaryAttribute<H::Sub>, GeometryError> {
    let (outside_on_plus, inside_on_plus) = Characterization::new(&node.plus, node.cut.clone())?.into_parts();

    let plus_outside = match outside_on_plus {
        Some(sub) => Characterization::new(&node.minus, sub)?.into_parts().1,
        None => None,
    };
    let plus_inside = match inside_on_plus {
        Some(sub) => Characterization::new(&node.minus, sub)?.into_parts().0,
        None => None,
    };

    Ok(BoundaryAttribute::new(plus_outside, plus_inside))
}

/// Fills the boundary attribute of every internal node still missing it
pub(crate) struct BoundaryBuilder {
    pub(crate) error: Option<GeometryError>,
}

impl<H: Hyperplane> BspTreeVisitor<H> for BoundaryBuilder {
    fn visit_order(&mut self, _node: &InternalNode<H>) -> Order {
        Order::PlusMinusSub
    }

    fn visit_internal_node(&mut self, node: &InternalNode<H>) {
        if self.error.is_some() || node.boundary.get().is_some() {
            return;
        }
        match boundary_of(node) {
            Ok(attribute) => {
                // another thread may have won the race, both results are equal
                let _ = node.boundary.set(attribute);
            },
            Err(error) => self.error = Some(error),
        }
    }
}

/// Sums the sizes of all boundary parts
pub(crate) struct BoundarySize {
    pub(crate) size: Real,
}

impl<H: Hyperplane> BspTreeVisitor<H> for BoundarySize {
    fn visit_order(&mut self, _node: &InternalNode<H>) -> Order {
        Order::MinusSubPlus
    }

    fn visit_internal_node(&mut self, node: &InternalNode<H>) {
        if let Some(attribute) = node.boundary.get() {
            if let Some(plus_outside) = &attribute.plus_outside {
                self.size += plus_outside.size();
            }
            if let Some(plus_inside) = &attribute.plus_inside {
                self.size += plus_inside.size();
            }
        }
    }
}

impl<H: Hyperplane> BspTree<H> {
    /// Compute the missing boundary attributes of the whole tree.
    pub fn compute_boundary_attributes(&self) -> Result<(), GeometryError> {
        let mut builder = BoundaryBuilder { error: None };
        self.visit(&mut builder);
        match builder.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

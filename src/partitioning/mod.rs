//! Dimension-independent space partitioning.
//!
//! Regions of space are represented as inside/outside labeled
//! [BSP trees](bsp::BspTree). The framework only talks to the concrete
//! geometry through the [`Hyperplane`], [`SubHyperplane`] and [`Transform`]
//! traits, so the same tree algorithms serve arcs on the circle and intervals
//! on the line.
//!
//! The boolean algorithms follow B. Naylor, J. Amanatides and W. Thibault,
//! *Merging BSP Trees Yields Polyhedral Set Operations*, Siggraph '90.

pub mod boundary;
pub mod bsp;
pub mod factory;
pub mod region;
pub mod traits;

pub use boundary::{BoundaryAttribute, Characterization};
pub use bsp::visitor::{BspTreeVisitor, Order};
pub use bsp::{BspTree, InternalNode, LeafTag};
pub use factory::RegionFactory;
pub use region::{AbstractRegion, GeometricalProperties, Region};
pub use traits::{Hyperplane, SplitSubHyperplane, SubHyperplane, Transform};

/// Position of an object with respect to an oriented hyperplane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Entirely on the plus side
    Plus,
    /// Entirely on the minus side
    Minus,
    /// Spanning both sides
    Both,
    /// Lying on the hyperplane itself (within tolerance)
    Hyper,
}

/// Position of a point with respect to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Inside,
    Outside,
    Boundary,
}

/// Child selector of an internal node, used to address nodes by their path from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Plus,
    Minus,
}

impl Branch {
    /// The other child
    pub const fn opposite(self) -> Self {
        match self {
            Branch::Plus => Branch::Minus,
            Branch::Minus => Branch::Plus,
        }
    }
}

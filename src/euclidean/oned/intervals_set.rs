//! Finite unions of intervals on the real line

use crate::errors::GeometryError;
use crate::euclidean::oned::{Interval, OrientedPoint, Point1D, SubOrientedPoint};
use crate::float_types::{Real, SAFE_MIN, tolerance};
use crate::partitioning::region::check_point_from;
use crate::partitioning::{
    AbstractRegion, BspTree, GeometricalProperties, Hyperplane, LeafTag, Location, Region, SubHyperplane,
};

/// A region of the real line made of disjoint, possibly unbounded, intervals.
#[derive(Debug, Clone)]
pub struct IntervalsSet {
    region: AbstractRegion<OrientedPoint>,
}

impl Default for IntervalsSet {
    /// The whole line, with the default tolerance
    fn default() -> Self {
        Self::whole_line(tolerance())
    }
}

impl IntervalsSet {
    pub fn whole_line(tolerance: Real) -> Self {
        Self {
            region: AbstractRegion::whole_space(tolerance),
        }
    }

    /// Single interval `[lower, upper]`; infinite bounds give half-lines or the whole line.
    pub fn new(lower: Real, upper: Real, tolerance: Real) -> Result<Self, GeometryError> {
        if upper < lower {
            return Err(GeometryError::NotAnInterval { lower, upper });
        }
        Ok(Self {
            region: AbstractRegion::from_tree(Self::build_tree(lower, upper, tolerance), tolerance),
        })
    }

    pub fn from_tree(tree: BspTree<OrientedPoint>, tolerance: Real) -> Self {
        Self {
            region: AbstractRegion::from_tree(tree, tolerance),
        }
    }

    /// Set enclosed by a collection of boundary points, inside on their minus side.
    pub fn from_boundary<I>(boundary: I, tolerance: Real) -> Self
    where
        I: IntoIterator<Item = SubOrientedPoint>,
    {
        Self {
            region: AbstractRegion::from_boundary(boundary, tolerance),
        }
    }

    fn build_tree(lower: Real, upper: Real, tolerance: Real) -> BspTree<OrientedPoint> {
        let cut = |x: Real, direct: bool| OrientedPoint::new(Point1D::new(x), direct, tolerance).whole_hyperplane();
        let bounded = |sub: SubOrientedPoint| -> BspTree<OrientedPoint> {
            BspTree::internal(sub, BspTree::Leaf(LeafTag::Outside), BspTree::Leaf(LeafTag::Inside))
        };

        match (lower == Real::NEG_INFINITY, upper == Real::INFINITY) {
            (true, true) => BspTree::Leaf(LeafTag::Inside),
            // open on the negative side
            (true, false) => bounded(cut(upper, true)),
            // open on the positive side
            (false, true) => bounded(cut(lower, false)),
            (false, false) => BspTree::internal(
                cut(lower, false),
                BspTree::Leaf(LeafTag::Outside),
                bounded(cut(upper, true)),
            ),
        }
    }

    /// Lowest value belonging to the set, `-inf` if unbounded below, `+inf` if empty
    pub fn inf(&self) -> Real {
        let mut node = self.tree();
        let mut inf = Real::INFINITY;
        while let BspTree::Internal(internal) = node {
            let point = internal.cut.hyperplane();
            inf = point.location().x;
            node = if point.is_direct() { &internal.minus } else { &internal.plus };
        }
        if node.leaf_tag().is_some_and(LeafTag::is_inside) {
            Real::NEG_INFINITY
        } else {
            inf
        }
    }

    /// Highest value belonging to the set, `+inf` if unbounded above, `-inf` if empty
    pub fn sup(&self) -> Real {
        let mut node = self.tree();
        let mut sup = Real::NEG_INFINITY;
        while let BspTree::Internal(internal) = node {
            let point = internal.cut.hyperplane();
            sup = point.location().x;
            node = if point.is_direct() { &internal.plus } else { &internal.minus };
        }
        if node.leaf_tag().is_some_and(LeafTag::is_inside) {
            Real::INFINITY
        } else {
            sup
        }
    }

    /// The disjoint intervals making up the set, in increasing order
    pub fn as_list(&self) -> Vec<Interval> {
        let mut list = Vec::new();
        self.collect_intervals(self.tree(), &mut list, Real::NEG_INFINITY, Real::INFINITY);
        list
    }

    fn collect_intervals(
        &self,
        node: &BspTree<OrientedPoint>,
        list: &mut Vec<Interval>,
        lower: Real,
        upper: Real,
    ) {
        let internal = match node {
            BspTree::Leaf(tag) => {
                if tag.is_inside() {
                    list.extend(Interval::new(lower, upper).ok());
                }
                return;
            },
            BspTree::Internal(internal) => internal,
        };

        let point = internal.cut.hyperplane();
        let location = point.location();
        let (low, high) = if point.is_direct() {
            (&internal.minus, &internal.plus)
        } else {
            (&internal.plus, &internal.minus)
        };

        let mut x = location.x;
        self.collect_intervals(low, list, lower, x);
        let tolerance = self.region.tolerance();
        if check_point_from(low, location, tolerance) == Location::Inside
            && check_point_from(high, location, tolerance) == Location::Inside
        {
            // dummy cut inside an interval: continue the last interval in the high sub-tree
            if let Some(last) = list.pop() {
                x = last.inf();
            }
        }
        self.collect_intervals(high, list, x, upper);
    }
}

impl Region for IntervalsSet {
    type Hyperplane = OrientedPoint;

    fn core(&self) -> &AbstractRegion<OrientedPoint> {
        &self.region
    }

    fn build_new(&self, tree: BspTree<OrientedPoint>) -> Self {
        Self::from_tree(tree, self.region.tolerance())
    }

    fn compute_geometrical_properties(&self) -> GeometricalProperties<Point1D> {
        let nan = Point1D::new(Real::NAN);
        if let BspTree::Leaf(tag) = self.tree() {
            return GeometricalProperties {
                size: if tag.is_inside() { Real::INFINITY } else { 0.0 },
                barycenter: nan,
            };
        }

        let (size, sum) = self.as_list().iter().fold((0.0, 0.0), |(size, sum), interval| {
            (size + interval.size(), sum + interval.size() * interval.barycenter())
        });

        let barycenter = if size.is_infinite() {
            nan
        } else if size >= SAFE_MIN {
            Point1D::new(sum / size)
        } else {
            self.tree()
                .cut()
                .map_or(nan, |cut| *cut.hyperplane().location())
        };
        GeometricalProperties { size, barycenter }
    }
}

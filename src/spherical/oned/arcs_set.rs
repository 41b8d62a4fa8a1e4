//! Finite unions of arcs on the circle

use crate::errors::GeometryError;
use crate::float_types::{Real, SAFE_MIN, TAU, tolerance};
use crate::partitioning::{
    AbstractRegion, BspTree, BspTreeVisitor, GeometricalProperties, Hyperplane, InternalNode, LeafTag,
    Order, Region, RegionFactory, Side, SubHyperplane,
};
use crate::spherical::oned::{Arc, Chord, S1Point, SubChord};

/// A region of the circle made of disjoint arcs.
///
/// Internally the circle is cut open at angle `0`: cuts are compared on the
/// `[0, 2π)` representation of their location, and an arc crossing `0` is
/// stored as its two halves `[lower, 2π)` and `[0, upper - 2π]`.
#[derive(Debug, Clone)]
pub struct ArcsSet {
    region: AbstractRegion<Chord>,
}

impl Default for ArcsSet {
    /// The whole circle, with the default tolerance
    fn default() -> Self {
        Self::whole_circle(tolerance())
    }
}

impl ArcsSet {
    /// The whole circle
    pub fn whole_circle(tolerance: Real) -> Self {
        Self {
            region: AbstractRegion::whole_space(tolerance),
        }
    }

    /// Single arc from `lower` to `upper`.
    ///
    /// Equal bounds, or bounds at least `2π` apart, give the whole circle.
    pub fn new(lower: Real, upper: Real, tolerance: Real) -> Result<Self, GeometryError> {
        let tree = Self::build_tree(lower, upper, tolerance)?;
        Ok(Self {
            region: AbstractRegion::from_tree(tree, tolerance),
        })
    }

    /// Set backed by an existing tree.
    ///
    /// Fails if the inside/outside states on both sides of angle `0` differ.
    pub fn from_tree(tree: BspTree<Chord>, tolerance: Real) -> Result<Self, GeometryError> {
        let set = Self {
            region: AbstractRegion::from_tree(tree, tolerance),
        };
        set.check_2pi_consistency()?;
        Ok(set)
    }

    /// Set enclosed by a collection of boundary chords, inside on their minus side.
    pub fn from_boundary<I>(boundary: I, tolerance: Real) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = SubChord>,
    {
        let set = Self {
            region: AbstractRegion::from_boundary(boundary, tolerance),
        };
        set.check_2pi_consistency()?;
        Ok(set)
    }

    fn build_tree(lower: Real, upper: Real, tolerance: Real) -> Result<BspTree<Chord>, GeometryError> {
        Ok(Self::arc_tree(&Arc::new(lower, upper, tolerance)?, tolerance))
    }

    /// Tree of a single arc, `Outside` on the plus branches and `Inside` on the minus ones
    fn arc_tree(arc: &Arc, tolerance: Real) -> BspTree<Chord> {
        if arc.size() >= TAU {
            return BspTree::Leaf(LeafTag::Inside);
        }

        let lower = S1Point::new(arc.inf());
        let upper = S1Point::new(arc.sup());
        let lower_cut = Chord::new(lower, false, tolerance).whole_hyperplane();
        let upper_cut = Chord::new(upper, true, tolerance).whole_hyperplane();

        if arc.sup() < TAU && upper.alpha() >= lower.alpha() {
            // arc between 0 and 2π
            BspTree::internal(
                lower_cut,
                BspTree::Leaf(LeafTag::Outside),
                BspTree::internal(
                    upper_cut,
                    BspTree::Leaf(LeafTag::Outside),
                    BspTree::Leaf(LeafTag::Inside),
                ),
            )
        } else {
            // arc wrapping around 2π
            BspTree::internal(
                lower_cut,
                BspTree::internal(
                    upper_cut,
                    BspTree::Leaf(LeafTag::Outside),
                    BspTree::Leaf(LeafTag::Inside),
                ),
                BspTree::Leaf(LeafTag::Inside),
            )
        }
    }

    /// Tolerance below which angles are considered identical
    pub fn tolerance(&self) -> Real {
        self.region.tolerance()
    }

    /// Cut with the smallest location, `None` for single leaf trees
    pub fn smallest_limit(&self) -> Option<Chord> {
        let mut node = self.tree();
        let mut smallest = None;
        while let BspTree::Internal(internal) = node {
            smallest = Some(*internal.cut.hyperplane());
            node = child_before(internal);
        }
        smallest
    }

    /// Cut with the largest location, `None` for single leaf trees
    pub fn largest_limit(&self) -> Option<Chord> {
        let mut node = self.tree();
        let mut largest = None;
        while let BspTree::Internal(internal) = node {
            largest = Some(*internal.cut.hyperplane());
            node = child_after(internal);
        }
        largest
    }

    /// Leaf holding the smallest angles, right after the opening at `0`
    fn first_leaf(&self) -> &BspTree<Chord> {
        let mut first = self.tree();
        while let BspTree::Internal(internal) = first {
            first = child_before(internal);
        }
        first
    }

    fn check_2pi_consistency(&self) -> Result<(), GeometryError> {
        let root = self.tree();
        if root.is_leaf() {
            return Ok(());
        }

        let mut last = root;
        while let BspTree::Internal(internal) = last {
            last = child_after(internal);
        }

        let inside_before = self.first_leaf().leaf_tag().is_some_and(LeafTag::is_inside);
        let inside_after = last.leaf_tag().is_some_and(LeafTag::is_inside);
        if inside_before == inside_after {
            Ok(())
        } else {
            log::debug!("inside/outside states differ on both sides of angle 0");
            Err(GeometryError::InconsistentStateAt2PiWrapping)
        }
    }

    /// The disjoint arcs making up the set, in increasing angular order.
    ///
    /// An arc crossing angle `0` is returned as a single arc whose upper
    /// bound exceeds `2π`, at the end of the list.
    pub fn as_list(&self) -> Vec<Arc> {
        let root = self.tree();
        if let BspTree::Leaf(tag) = root {
            return if tag.is_inside() {
                vec![Arc::full_circle(self.tolerance())]
            } else {
                Vec::new()
            };
        }

        let mut collector = LimitsCollector {
            tree: root,
            limits: Vec::new(),
        };
        root.visit(&mut collector);
        let mut limits = collector.limits;
        limits.sort_by(Real::total_cmp);
        // cuts repeated at the same location bound the same transition
        limits.dedup();

        if limits.len() < 2 {
            // only dummy cuts remain
            return if self.is_empty() {
                Vec::new()
            } else {
                vec![Arc::full_circle(self.tolerance())]
            };
        }

        if self.first_leaf().leaf_tag().is_some_and(LeafTag::is_inside) {
            // the first limit is the end of the arc crossing 0
            let first = limits.remove(0);
            limits.push(first + TAU);
        }

        limits
            .chunks_exact(2)
            .map(|pair| Arc::normalized(pair[0], pair[1], self.tolerance()))
            .collect()
    }

    /// Iterator over the `[lower, upper]` bounds of the arcs
    pub fn iter(&self) -> impl Iterator<Item = [Real; 2]> {
        self.as_list().into_iter().map(|arc| [arc.inf(), arc.sup()])
    }

    /// Split the set in the parts lying outside (plus) and inside (minus) an arc.
    ///
    /// Parts smaller than the tolerance are dropped.
    pub fn split(&self, arc: &Arc) -> ArcsSplit {
        let tolerance = self.tolerance();
        let arc_set = self.build_new(Self::arc_tree(arc, tolerance));

        let keep = |part: ArcsSet| (part.size() > tolerance).then_some(part);
        let plus = keep(RegionFactory::difference(self, &arc_set));
        let minus = keep(RegionFactory::intersection(self, &arc_set));
        log::trace!(
            "split arcs set by [{}, {}]: plus {:?}, minus {:?}",
            arc.inf(),
            arc.sup(),
            plus.as_ref().map(|part| part.size()),
            minus.as_ref().map(|part| part.size())
        );
        ArcsSplit { plus, minus }
    }
}

/// Child holding the angles smaller than the cut location
fn child_before(node: &InternalNode<Chord>) -> &BspTree<Chord> {
    if node.cut.hyperplane().is_direct() {
        &node.minus
    } else {
        &node.plus
    }
}

/// Child holding the angles larger than the cut location
fn child_after(node: &InternalNode<Chord>) -> &BspTree<Chord> {
    if node.cut.hyperplane().is_direct() {
        &node.plus
    } else {
        &node.minus
    }
}

/// Collects the cut locations where the set switches between inside and outside
struct LimitsCollector<'a> {
    tree: &'a BspTree<Chord>,
    limits: Vec<Real>,
}

impl LimitsCollector<'_> {
    /// Tag of the cell right after (or right before) a location, ties on
    /// other cuts at the same location resolved the same way
    fn inside_next_to(&self, location: &S1Point, after: bool) -> bool {
        let mut node = self.tree;
        while let BspTree::Internal(internal) = node {
            let chord = internal.cut.hyperplane();
            let offset = chord.offset(location);
            let plus = if offset == 0.0 { after == chord.is_direct() } else { offset > 0.0 };
            node = if plus { &internal.plus } else { &internal.minus };
        }
        node.leaf_tag().is_some_and(LeafTag::is_inside)
    }
}

impl BspTreeVisitor<Chord> for LimitsCollector<'_> {
    fn visit_order(&mut self, _node: &InternalNode<Chord>) -> Order {
        Order::MinusPlusSub
    }

    fn visit_internal_node(&mut self, node: &InternalNode<Chord>) {
        let location = node.cut.hyperplane().location();
        if self.inside_next_to(location, false) != self.inside_next_to(location, true) {
            self.limits.push(location.alpha());
        }
    }
}

impl Region for ArcsSet {
    type Hyperplane = Chord;

    fn core(&self) -> &AbstractRegion<Chord> {
        &self.region
    }

    fn build_new(&self, tree: BspTree<Chord>) -> Self {
        Self {
            region: AbstractRegion::from_tree(tree, self.tolerance()),
        }
    }

    fn compute_geometrical_properties(&self) -> GeometricalProperties<S1Point> {
        if let BspTree::Leaf(tag) = self.tree() {
            return GeometricalProperties {
                size: if tag.is_inside() { TAU } else { 0.0 },
                barycenter: S1Point::nan(),
            };
        }

        let (size, sum) = self
            .as_list()
            .iter()
            .fold((0.0, 0.0), |(size, sum), arc| {
                (size + arc.size(), sum + arc.size() * arc.barycenter())
            });

        let barycenter = if size == TAU {
            S1Point::nan()
        } else if size >= SAFE_MIN {
            S1Point::new(sum / size)
        } else {
            self.tree()
                .cut()
                .map_or_else(S1Point::nan, |cut| *cut.hyperplane().location())
        };
        GeometricalProperties { size, barycenter }
    }
}

/// The two parts of an [`ArcsSet`] split by an arc
#[derive(Debug, Clone)]
pub struct ArcsSplit {
    /// Part outside of the arc
    pub plus: Option<ArcsSet>,
    /// Part inside the arc
    pub minus: Option<ArcsSet>,
}

impl ArcsSplit {
    /// Side of the split set with respect to the arc
    pub const fn side(&self) -> Side {
        match (&self.plus, &self.minus) {
            (Some(_), Some(_)) => Side::Both,
            (Some(_), None) => Side::Plus,
            (None, Some(_)) => Side::Minus,
            (None, None) => Side::Hyper,
        }
    }
}

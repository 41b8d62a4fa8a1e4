mod support;

use bspregion::{
    euclidean::oned::IntervalsSet,
    float_types::{Real, TAU},
    partitioning::{
        BspTreeVisitor, Hyperplane, InternalNode, Location, Order, Region, RegionFactory, SubHyperplane,
    },
    spherical::oned::{ArcsSet, Chord, S1Point},
};
use proptest::prelude::*;

use crate::support::TOLERANCE;

fn intervals(bounds: &[(Real, Real)]) -> IntervalsSet {
    bounds
        .iter()
        .map(|&(lower, length)| IntervalsSet::new(lower, lower + length, TOLERANCE).unwrap())
        .fold(RegionFactory::complement(&IntervalsSet::whole_line(TOLERANCE)), |set, part| {
            RegionFactory::union(&set, &part)
        })
}

fn arcs(bounds: &[(Real, Real)]) -> ArcsSet {
    bounds
        .iter()
        .map(|&(lower, length)| ArcsSet::new(lower, lower + length, TOLERANCE).unwrap())
        .fold(RegionFactory::complement(&ArcsSet::whole_circle(TOLERANCE)), |set, part| {
            RegionFactory::union(&set, &part)
        })
}

fn interval_bounds() -> impl Strategy<Value = Vec<(Real, Real)>> {
    prop::collection::vec((-100.0 as Real..100.0, 0.5 as Real..40.0), 1..4)
}

fn arc_bounds() -> impl Strategy<Value = Vec<(Real, Real)>> {
    prop::collection::vec((0.0 as Real..TAU, 0.05 as Real..3.0), 1..4)
}

proptest! {
    #[test]
    fn intervals_union_and_intersection_sizes(a in interval_bounds(), b in interval_bounds()) {
        let (a, b) = (intervals(&a), intervals(&b));
        let union = RegionFactory::union(&a, &b);
        let intersection = RegionFactory::intersection(&a, &b);
        prop_assert!((union.size() + intersection.size() - a.size() - b.size()).abs() < 1.0e-8);
    }

    #[test]
    fn intervals_xor_is_union_minus_intersection(a in interval_bounds(), b in interval_bounds()) {
        let (a, b) = (intervals(&a), intervals(&b));
        let xor = RegionFactory::xor(&a, &b);
        let union = RegionFactory::union(&a, &b);
        let intersection = RegionFactory::intersection(&a, &b);
        prop_assert!((xor.size() - (union.size() - intersection.size())).abs() < 1.0e-8);
    }

    #[test]
    fn intervals_difference_is_contained(a in interval_bounds(), b in interval_bounds()) {
        let (a, b) = (intervals(&a), intervals(&b));
        let difference = RegionFactory::difference(&a, &b);
        prop_assert!(a.contains(&difference));
        prop_assert!(RegionFactory::intersection(&difference, &b).size() < 1.0e-8);
        prop_assert!(a.contains(&RegionFactory::intersection(&a, &b)));
    }

    #[test]
    fn arcs_union_and_intersection_sizes(a in arc_bounds(), b in arc_bounds()) {
        let (a, b) = (arcs(&a), arcs(&b));
        let union = RegionFactory::union(&a, &b);
        let intersection = RegionFactory::intersection(&a, &b);
        prop_assert!((union.size() + intersection.size() - a.size() - b.size()).abs() < 1.0e-8);
    }

    #[test]
    fn arcs_complement_covers_the_rest(a in arc_bounds()) {
        let a = arcs(&a);
        let complement = RegionFactory::complement(&a);
        prop_assert!((a.size() + complement.size() - TAU).abs() < 1.0e-8);
        prop_assert!(RegionFactory::union(&a, &complement).is_full());
    }

    #[test]
    fn arcs_list_is_sorted_and_disjoint(a in arc_bounds()) {
        let list = arcs(&a).as_list();
        for pair in list.windows(2) {
            prop_assert!(pair[0].sup() < pair[1].inf());
        }
        let total: Real = list.iter().map(|arc| arc.size()).sum();
        prop_assert!(total <= TAU + 1.0e-10);
    }
}

/// Grid step for arc endpoints; samples sit halfway between grid points
const STEP: Real = TAU / 16.0;

/// Tolerance of the jittered sets, endpoints move by up to twice this value
const JITTER_TOLERANCE: Real = 1.0e-6;

fn jittered_arc() -> impl Strategy<Value = (Real, Real)> {
    let jitter = -2.0 * JITTER_TOLERANCE..2.0 * JITTER_TOLERANCE;
    (0..=16usize, 1..=16usize, jitter.clone(), jitter).prop_map(
        |(start, steps, lower_jitter, upper_jitter)| {
            let lower = start as Real * STEP;
            (lower + lower_jitter, lower + steps as Real * STEP + upper_jitter)
        },
    )
}

fn jittered_union(bounds: &[(Real, Real)]) -> ArcsSet {
    bounds
        .iter()
        .map(|&(lower, upper)| ArcsSet::new(lower, upper, JITTER_TOLERANCE).unwrap())
        .fold(RegionFactory::complement(&ArcsSet::whole_circle(JITTER_TOLERANCE)), |set, part| {
            RegionFactory::union(&set, &part)
        })
}

fn covers(&(lower, upper): &(Real, Real), alpha: Real) -> bool {
    upper - lower >= TAU || (alpha - lower).rem_euclid(TAU) < upper - lower
}

fn samples() -> impl Iterator<Item = Real> {
    (0..16).map(|k| (k as Real + 0.5) * STEP)
}

/// Point queries on the tree agree with the expected membership and with the arcs list
fn assert_round_trip(set: &ArcsSet, bounds: &[(Real, Real)]) -> Result<(), TestCaseError> {
    let list = set.as_list();
    for alpha in samples() {
        let inside = bounds.iter().any(|bound| covers(bound, alpha));
        let expected = if inside { Location::Inside } else { Location::Outside };
        prop_assert_eq!(set.check_point(&S1Point::new(alpha)), expected, "alpha = {}", alpha);
        let listed = list.iter().any(|arc| arc.check_point(alpha) == Location::Inside);
        prop_assert_eq!(listed, inside, "alpha = {} in {:?}", alpha, list);
    }
    let total: Real = list.iter().map(|arc| arc.size()).sum();
    prop_assert!((total - set.size()).abs() < 1.0e-12);
    Ok(())
}

/// Boundary cuts with the side of the region found on their plus side
struct BoundaryCuts(Vec<(Chord, Location)>);

impl BspTreeVisitor<Chord> for BoundaryCuts {
    fn visit_order(&mut self, _node: &InternalNode<Chord>) -> Order {
        Order::PlusMinusSub
    }

    fn visit_internal_node(&mut self, node: &InternalNode<Chord>) {
        if let Some(attribute) = node.boundary_attribute() {
            let outside = attribute.plus_outside.iter().map(|sub| (*sub.hyperplane(), Location::Outside));
            let inside = attribute.plus_inside.iter().map(|sub| (*sub.hyperplane(), Location::Inside));
            self.0.extend(outside.chain(inside));
        }
    }
}

proptest! {
    #[test]
    fn jittered_arc_round_trip(bounds in jittered_arc()) {
        let set = ArcsSet::new(bounds.0, bounds.1, JITTER_TOLERANCE).unwrap();
        assert_round_trip(&set, &[bounds])?;
        let expected_size = (bounds.1 - bounds.0).min(TAU);
        prop_assert!((set.size() - expected_size).abs() < 1.0e-9, "{} != {}", set.size(), expected_size);
    }

    #[test]
    fn jittered_arc_from_boundary_round_trip(bounds in jittered_arc()) {
        prop_assume!(bounds.1 - bounds.0 < TAU - 8.0 * JITTER_TOLERANCE);
        let cut = |alpha: Real, direct: bool| {
            Chord::new(S1Point::new(alpha), direct, JITTER_TOLERANCE).whole_hyperplane()
        };
        let boundary = vec![cut(bounds.0, false), cut(bounds.1, true)];
        let set = ArcsSet::from_boundary(boundary, JITTER_TOLERANCE).unwrap();
        assert_round_trip(&set, &[bounds])?;
    }

    #[test]
    fn jittered_union_round_trip(bounds in prop::collection::vec(jittered_arc(), 1..4)) {
        let set = jittered_union(&bounds);
        assert_round_trip(&set, &bounds)?;
    }

    #[test]
    fn boundary_attributes_face_the_right_way(a in arc_bounds(), b in arc_bounds()) {
        let set = RegionFactory::difference(&arcs(&a), &arcs(&b));
        let mut cuts = BoundaryCuts(Vec::new());
        set.tree_with_boundary().unwrap().visit(&mut cuts);
        prop_assert_eq!(cuts.0.is_empty(), set.is_empty() || set.is_full());

        let delta = 1.0e-8;
        for (chord, plus_side) in cuts.0 {
            let alpha = chord.location().alpha();
            let (plus, minus) = if chord.is_direct() {
                (alpha + delta, alpha - delta)
            } else {
                (alpha - delta, alpha + delta)
            };
            let minus_side = if plus_side == Location::Inside {
                Location::Outside
            } else {
                Location::Inside
            };
            prop_assert_eq!(set.check_point(&S1Point::new(plus)), plus_side, "plus side of {:?}", chord);
            prop_assert_eq!(set.check_point(&S1Point::new(minus)), minus_side, "minus side of {:?}", chord);
        }
    }

    #[test]
    fn copies_answer_like_the_original(
        bounds in prop::collection::vec(jittered_arc(), 1..4),
        angles in prop::collection::vec(0.0 as Real..TAU, 32),
    ) {
        let set = jittered_union(&bounds);
        let copy = set.copy_self();
        let endpoints = bounds.iter().flat_map(|&(lower, upper)| [lower, upper]);
        for alpha in angles.into_iter().chain(endpoints) {
            let point = S1Point::new(alpha);
            prop_assert_eq!(copy.check_point(&point), set.check_point(&point), "alpha = {}", alpha);
        }
        prop_assert_eq!(copy.as_list(), set.as_list());
        prop_assert_eq!(copy.size(), set.size());
    }
}

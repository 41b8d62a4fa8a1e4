//! Test support library
//! Provides various helper functions & utilities for tests.

use bspregion::{
    euclidean::oned::{OrientedPoint, Point1D, SubOrientedPoint},
    float_types::Real,
    partitioning::{BspTree, Hyperplane, LeafTag},
    spherical::oned::{ArcsSet, Chord, S1Point, SubChord},
};

/// Tolerance used by most tests
pub const TOLERANCE: Real = 1.0e-10;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Chord at `alpha`, with the default test tolerance
pub fn chord(alpha: Real, direct: bool) -> Chord {
    Chord::new(S1Point::new(alpha), direct, TOLERANCE)
}

pub fn sub_chord(alpha: Real, direct: bool) -> SubChord {
    chord(alpha, direct).whole_hyperplane()
}

pub fn oriented_point(x: Real, direct: bool) -> OrientedPoint {
    OrientedPoint::new(Point1D::new(x), direct, TOLERANCE)
}

pub fn sub_point(x: Real, direct: bool) -> SubOrientedPoint {
    oriented_point(x, direct).whole_hyperplane()
}

pub fn leaf<H: Hyperplane>(inside: bool) -> BspTree<H> {
    BspTree::Leaf(LeafTag::from_inside(inside))
}

/// Asserts that the arcs of a set match `expected` bounds, in order.
pub fn assert_arcs(set: &ArcsSet, expected: &[[Real; 2]]) {
    let arcs = set.as_list();
    assert_eq!(
        arcs.len(),
        expected.len(),
        "expected {} arcs, got {:?}",
        expected.len(),
        arcs
    );
    for (arc, [lower, upper]) in arcs.iter().zip(expected) {
        assert!(
            approx_eq(arc.inf(), *lower, 1.0e-10) && approx_eq(arc.sup(), *upper, 1.0e-10),
            "expected [{lower}, {upper}], got [{}, {}]",
            arc.inf(),
            arc.sup()
        );
    }
}

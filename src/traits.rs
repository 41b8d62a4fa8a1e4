use crate::partitioning::{Region, RegionFactory};

/// Boolean operations on regions, as methods.
///
/// The intersection of two regions is [`RegionOps::intersect`], since
/// [`Region::intersection`] already clips a sub-hyperplane to a region.
pub trait RegionOps: Region {
    fn union(&self, other: &Self) -> Self {
        RegionFactory::union(self, other)
    }

    fn difference(&self, other: &Self) -> Self {
        RegionFactory::difference(self, other)
    }

    fn intersect(&self, other: &Self) -> Self {
        RegionFactory::intersection(self, other)
    }

    fn xor(&self, other: &Self) -> Self {
        RegionFactory::xor(self, other)
    }

    /// Region covering everything this one does not
    fn complement(&self) -> Self {
        RegionFactory::complement(self)
    }
}

impl<R: Region> RegionOps for R {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::euclidean::oned::IntervalsSet;
    use approx::assert_relative_eq;

    #[test]
    fn method_forms_match_factory() {
        let a = IntervalsSet::new(0.0, 4.0, 1.0e-10).unwrap();
        let b = IntervalsSet::new(2.0, 6.0, 1.0e-10).unwrap();
        assert_relative_eq!(a.union(&b).size(), 6.0, epsilon = 1e-10);
        assert_relative_eq!(a.intersect(&b).size(), 2.0, epsilon = 1e-10);
        assert_relative_eq!(a.difference(&b).size(), 2.0, epsilon = 1e-10);
        assert_relative_eq!(a.xor(&b).size(), 4.0, epsilon = 1e-10);
        assert!(a.complement().size().is_infinite());
    }
}

use crate::core::math::Point;
use crate::geometry::{ExPolygon, Polygon, Surface};

/// Uniform read-only view over the path sources fed into the boolean/offset
/// layer.
///
/// Implementations are zero copy: iterating yields borrowed point slices in
/// source order and orientation, contour first, then holes. Consumers must
/// not rely on anything beyond that ordering contract.
pub trait PathProvider {
    fn paths(&self) -> impl Iterator<Item = &[Point]>;

    fn path_count(&self) -> usize {
        self.paths().count()
    }
}

impl<P: PathProvider + ?Sized> PathProvider for &P {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        (**self).paths()
    }

    fn path_count(&self) -> usize {
        (**self).path_count()
    }
}

/// Provider with no paths, used as the clip side of unary operations.
pub struct EmptyPathProvider;

impl PathProvider for EmptyPathProvider {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::empty()
    }

    fn path_count(&self) -> usize {
        0
    }
}

impl PathProvider for [Point] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self)
    }

    fn path_count(&self) -> usize {
        1
    }
}

impl PathProvider for Polygon {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self.points.as_slice())
    }

    fn path_count(&self) -> usize {
        1
    }
}

impl PathProvider for [Polygon] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        self.iter().map(|p| p.points.as_slice())
    }

    fn path_count(&self) -> usize {
        self.len()
    }
}

impl PathProvider for Vec<Polygon> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        self.iter().map(|p| p.points.as_slice())
    }

    fn path_count(&self) -> usize {
        self.len()
    }
}

impl PathProvider for ExPolygon {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self.contour.points.as_slice())
            .chain(self.holes.iter().map(|h| h.points.as_slice()))
    }

    fn path_count(&self) -> usize {
        1 + self.holes.len()
    }
}

impl PathProvider for [ExPolygon] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        self.iter().flat_map(|ex| ex.paths())
    }

    fn path_count(&self) -> usize {
        self.iter().map(|ex| 1 + ex.holes.len()).sum()
    }
}

impl PathProvider for Vec<ExPolygon> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        self.iter().flat_map(|ex| ex.paths())
    }

    fn path_count(&self) -> usize {
        self.as_slice().path_count()
    }
}

impl PathProvider for [Surface] {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        self.iter().flat_map(|s| s.expolygon.paths())
    }

    fn path_count(&self) -> usize {
        self.iter().map(|s| 1 + s.expolygon.holes.len()).sum()
    }
}

impl PathProvider for Vec<Surface> {
    fn paths(&self) -> impl Iterator<Item = &[Point]> {
        self.iter().flat_map(|s| s.expolygon.paths())
    }

    fn path_count(&self) -> usize {
        self.as_slice().path_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ExPolygon;

    #[test]
    fn expolygon_yields_contour_then_holes() {
        let ex = ExPolygon {
            contour: polygon![(0, 0), (10, 0), (10, 10), (0, 10)],
            holes: vec![polygon![(2, 2), (2, 8), (8, 8), (8, 2)]],
        };
        let paths: Vec<_> = ex.paths().collect();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], ex.contour.points.as_slice());
        assert_eq!(paths[1], ex.holes[0].points.as_slice());
        assert_eq!(ex.path_count(), 2);
    }

    #[test]
    fn empty_provider_is_empty() {
        assert_eq!(EmptyPathProvider.path_count(), 0);
        assert_eq!(EmptyPathProvider.paths().count(), 0);
    }
}

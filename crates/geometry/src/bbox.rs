//! Axis-aligned bounding boxes in upscaled canvas space

/// Axis-aligned bounding box, `[min_x, min_y, max_x, max_y]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Tightest box around a vertex list. Empty input yields a degenerate
    /// box at the origin.
    pub fn of_vertices(vertices: &[(i32, i32)]) -> Self {
        if vertices.is_empty() {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for &(x, y) in vertices {
            let (x, y) = (f64::from(x), f64::from(y));
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Union of two boxes.
    pub fn merge(&self, other: &BBox) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Overlap test with both boxes inflated by `separation` on every side.
    /// Conservative placement check: touching within the separation distance
    /// counts as overlapping.
    pub fn overlaps_with_separation(&self, other: &BBox, separation: f64) -> bool {
        !(self.max_x + separation < other.min_x
            || self.min_x - separation > other.max_x
            || self.max_y + separation < other.min_y
            || self.min_y - separation > other.max_y)
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    pub fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_vertices() {
        let bb = BBox::of_vertices(&[(3, 7), (-2, 9), (5, 1)]);
        assert_eq!(bb, BBox::new(-2.0, 1.0, 5.0, 9.0));
    }

    #[test]
    fn test_of_vertices_empty() {
        let bb = BBox::of_vertices(&[]);
        assert_eq!(bb.width(), 0.0);
        assert_eq!(bb.height(), 0.0);
    }

    #[test]
    fn test_overlap_with_separation() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(12.0, 0.0, 20.0, 10.0);
        // Disjoint by 2, but a separation of 3 closes the gap.
        assert!(!a.overlaps_with_separation(&b, 0.0));
        assert!(!a.overlaps_with_separation(&b, 1.0));
        assert!(a.overlaps_with_separation(&b, 3.0));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 5.0, 30.0, 30.0);
        assert!(a.overlaps_with_separation(&b, 0.0));
        assert!(b.overlaps_with_separation(&a, 0.0));
    }

    #[test]
    fn test_merge_and_roundtrip() {
        let a = BBox::new(0.0, 0.0, 4.0, 4.0);
        let b = BBox::new(-2.0, 1.0, 3.0, 9.0);
        let m = a.merge(&b);
        assert_eq!(m, BBox::new(-2.0, 0.0, 4.0, 9.0));
        assert_eq!(BBox::from_array(m.to_array()), m);
    }
}

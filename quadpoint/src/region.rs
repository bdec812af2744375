//! Rectangular regions of coordinate space.

use std::fmt;

/// A rectangular region of 2D coordinate space.
///
/// A region is defined by its center `(lat, lng)` and half-extents
/// `(delta_lat, delta_lng)`, spanning
/// `[lat - delta_lat, lat + delta_lat] x [lng - delta_lng, lng + delta_lng]`.
///
/// The quadrant layout used when a region is split into four children:
///
/// ```text
/// ---------------
/// |      |      |
/// |  01  |  11  |
/// |      |      |
/// |-------------|
/// |      |      |
/// |  00  |  10  |
/// |      |      |
/// ---------------
/// ```
///
/// Bit 0 of a quadrant index is the `lat` comparison, bit 1 the `lng`
/// comparison. Points exactly on a center line route to the low side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Center latitude.
    pub lat: u32,
    /// Center longitude.
    pub lng: u32,
    /// Half-extent on the latitude axis.
    pub delta_lat: u32,
    /// Half-extent on the longitude axis.
    pub delta_lng: u32,
}

impl Region {
    /// Creates a new region from a center point and half-extents.
    ///
    /// No domain validation happens here; the tree constructor validates the
    /// root region once, and every derived child region is contained in it.
    pub fn new(lat: u32, lng: u32, delta_lat: u32, delta_lng: u32) -> Region {
        Region {
            lat,
            lng,
            delta_lat,
            delta_lng,
        }
    }

    /// Returns the quadrant index (0..4) of a point relative to this
    /// region's center.
    ///
    /// The comparison is strict on both axes: a point exactly on a center
    /// line lands in the low quadrant of that axis.
    pub fn quadrant_of(&self, lat: u32, lng: u32) -> usize {
        let mut quadrant = (lat > self.lat) as usize;
        quadrant |= ((lng > self.lng) as usize) << 1;
        quadrant
    }

    /// Returns the halved half-extents, or `None` when either axis can no
    /// longer be halved (minimum granularity).
    pub fn halved(&self) -> Option<(u32, u32)> {
        let delta_lat = self.delta_lat / 2;
        let delta_lng = self.delta_lng / 2;
        if delta_lat == 0 || delta_lng == 0 {
            return None;
        }
        Some((delta_lat, delta_lng))
    }

    /// Derives the child region for a quadrant, given the already-halved
    /// extents.
    pub fn child(&self, quadrant: usize, delta_lat: u32, delta_lng: u32) -> Region {
        let lat = if quadrant & 0b01 != 0 {
            self.lat + delta_lat
        } else {
            self.lat - delta_lat
        };
        let lng = if quadrant & 0b10 != 0 {
            self.lng + delta_lng
        } else {
            self.lng - delta_lng
        };
        Region::new(lat, lng, delta_lat, delta_lng)
    }

    /// Lowest latitude covered by this region.
    pub fn min_lat(&self) -> u32 {
        self.lat.saturating_sub(self.delta_lat)
    }

    /// Highest latitude covered by this region.
    pub fn max_lat(&self) -> u32 {
        self.lat.saturating_add(self.delta_lat)
    }

    /// Lowest longitude covered by this region.
    pub fn min_lng(&self) -> u32 {
        self.lng.saturating_sub(self.delta_lng)
    }

    /// Highest longitude covered by this region.
    pub fn max_lng(&self) -> u32 {
        self.lng.saturating_add(self.delta_lng)
    }

    /// Checks whether a point falls within this region, boundaries included.
    pub fn contains(&self, lat: u32, lng: u32) -> bool {
        lat >= self.min_lat()
            && lat <= self.max_lat()
            && lng >= self.min_lng()
            && lng <= self.max_lng()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region(lat: {}, lng: {}, delta_lat: {}, delta_lng: {})",
            self.lat, self.lng, self.delta_lat, self.delta_lng
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let region = Region::new(10, 20, 3, 4);
        assert_eq!(region.lat, 10);
        assert_eq!(region.lng, 20);
        assert_eq!(region.delta_lat, 3);
        assert_eq!(region.delta_lng, 4);
    }

    #[test]
    fn test_quadrant_mapping() {
        let region = Region::new(10, 10, 10, 10);

        assert_eq!(region.quadrant_of(5, 5), 0); // low lat, low lng
        assert_eq!(region.quadrant_of(15, 5), 1); // high lat, low lng
        assert_eq!(region.quadrant_of(5, 15), 2); // low lat, high lng
        assert_eq!(region.quadrant_of(15, 15), 3); // high lat, high lng
    }

    #[test]
    fn test_quadrant_center_routes_low() {
        let region = Region::new(10, 10, 10, 10);

        // Exactly on a center line is not "greater than".
        assert_eq!(region.quadrant_of(10, 10), 0);
        assert_eq!(region.quadrant_of(10, 15), 2);
        assert_eq!(region.quadrant_of(15, 10), 1);
    }

    #[test]
    fn test_halved() {
        assert_eq!(Region::new(10, 10, 10, 10).halved(), Some((5, 5)));
        assert_eq!(Region::new(10, 10, 5, 5).halved(), Some((2, 2)));
    }

    #[test]
    fn test_halved_at_minimum_granularity() {
        assert_eq!(Region::new(10, 10, 1, 1).halved(), None);
        assert_eq!(Region::new(10, 10, 0, 0).halved(), None);
        // One axis collapsing is enough to stop.
        assert_eq!(Region::new(10, 10, 8, 1).halved(), None);
    }

    #[test]
    fn test_child_regions() {
        let region = Region::new(10, 10, 10, 10);
        let (delta_lat, delta_lng) = region.halved().unwrap();

        assert_eq!(region.child(0, delta_lat, delta_lng), Region::new(5, 5, 5, 5));
        assert_eq!(region.child(1, delta_lat, delta_lng), Region::new(15, 5, 5, 5));
        assert_eq!(region.child(2, delta_lat, delta_lng), Region::new(5, 15, 5, 5));
        assert_eq!(region.child(3, delta_lat, delta_lng), Region::new(15, 15, 5, 5));
    }

    #[test]
    fn test_children_tile_the_parent() {
        let region = Region::new(32, 32, 32, 32);
        let (delta_lat, delta_lng) = region.halved().unwrap();

        for quadrant in 0..4 {
            let child = region.child(quadrant, delta_lat, delta_lng);
            assert!(child.min_lat() >= region.min_lat());
            assert!(child.max_lat() <= region.max_lat());
            assert!(child.min_lng() >= region.min_lng());
            assert!(child.max_lng() <= region.max_lng());
        }
    }

    #[test]
    fn test_contains() {
        let region = Region::new(10, 10, 10, 10);

        assert!(region.contains(10, 10));
        assert!(region.contains(0, 0));
        assert!(region.contains(20, 20));
        assert!(!region.contains(21, 10));
        assert!(!region.contains(10, 21));
    }

    #[test]
    fn test_display() {
        let region = Region::new(1, 2, 3, 4);
        assert_eq!(
            format!("{}", region),
            "Region(lat: 1, lng: 2, delta_lat: 3, delta_lng: 4)"
        );
    }
}

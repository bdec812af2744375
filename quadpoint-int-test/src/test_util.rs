use quadpoint::{QuadError, QuadTree};
use rand::Rng;

/// Builds a tree spanning `0..=2 * extent` on both axes and fills it with
/// `count` random points. Returns the tree together with the inserted
/// points, insertion order preserved.
///
/// A minimum-granularity status is tolerated: the point is stored either
/// way, and a random workload may legitimately saturate a tiny leaf.
pub fn random_tree(extent: u32, count: usize) -> (QuadTree<usize>, Vec<(u32, u32)>) {
    let tree = QuadTree::new(extent, extent, extent, extent).expect("valid tree region");
    let mut rng = rand::rng();
    let mut points = Vec::with_capacity(count);

    for id in 0..count {
        let lat = rng.random_range(0..=extent * 2);
        let lng = rng.random_range(0..=extent * 2);
        match tree.insert(id, lat, lng) {
            Ok(()) | Err(QuadError::MinimumGranularity) => {}
            Err(err) => panic!("insert at ({}, {}) failed: {}", lat, lng, err),
        }
        points.push((lat, lng));
    }

    (tree, points)
}

/// Sums the bucket counts over every node of a breadth-first walk.
pub fn stored_points<T>(tree: &QuadTree<T>) -> usize {
    tree.walk().iter().map(|report| report.bucket_count).sum()
}

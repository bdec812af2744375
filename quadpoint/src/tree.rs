//! The public quadtree handle.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::constants::MAX_COORDINATE;
use crate::cursor::{QuadCursor, QueryResult};
use crate::errors::{check_coordinate, QuadError, QuadResult};
use crate::node::{Bucket, Node};
use crate::region::Region;

pub(crate) struct TreeState<T> {
    pub(crate) root: Node<T>,
    pub(crate) len: usize,
}

/// An in-memory point quadtree over bounded integer coordinates.
///
/// The tree owns its entire node/bucket graph and the payloads stored in it;
/// everything is released when the last handle is dropped. Handles are cheap
/// to clone and share one tree (the inner state sits behind an `Arc`).
///
/// # Concurrency
///
/// Structural access is serialized by a per-tree read-write lock:
/// [`insert`](QuadTree::insert) takes the write lock, queries and walks take
/// the read lock. Cursors receive a snapshot of the located leaf's chain at
/// bind time, so they stay valid across later mutations and never hold the
/// lock while being consumed.
///
/// # Coordinate domain
///
/// Coordinates are validated against
/// [`MAX_COORDINATE`](crate::constants::MAX_COORDINATE). Points inside the
/// domain but outside the tree's region are accepted: leaf location performs
/// no bounds check and routes them to a boundary leaf.
pub struct QuadTree<T> {
    pub(crate) state: Arc<RwLock<TreeState<T>>>,
}

impl<T> Clone for QuadTree<T> {
    fn clone(&self) -> Self {
        QuadTree {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> QuadTree<T> {
    /// Creates a tree whose root leaf spans the region centered at
    /// `(lat, lng)` with half-extents `(delta_lat, delta_lng)`.
    ///
    /// The region must lie fully inside the coordinate domain, i.e.
    /// `lat - delta_lat` must not underflow and `lat + delta_lat` must not
    /// exceed [`MAX_COORDINATE`](crate::constants::MAX_COORDINATE) (same for
    /// the longitude axis). This keeps every derived child region, at any
    /// subdivision depth, inside the domain as well.
    pub fn new(lat: u32, lng: u32, delta_lat: u32, delta_lng: u32) -> QuadResult<QuadTree<T>> {
        check_coordinate("lat", lat)?;
        check_coordinate("lng", lng)?;

        if delta_lat > lat
            || delta_lng > lng
            || lat + delta_lat > MAX_COORDINATE
            || lng + delta_lng > MAX_COORDINATE
        {
            log::error!(
                "tree region centered at ({}, {}) with half-extents ({}, {}) leaves the coordinate domain",
                lat, lng, delta_lat, delta_lng
            );
            return Err(QuadError::RegionOutOfDomain);
        }

        let region = Region::new(lat, lng, delta_lat, delta_lng);
        log::debug!("created quadtree over {}", region);

        Ok(QuadTree {
            state: Arc::new(RwLock::new(TreeState {
                root: Node::leaf(region),
                len: 0,
            })),
        })
    }

    /// Inserts a payload at `(lat, lng)`.
    ///
    /// The point is prepended to its target leaf's chain; when the leaf goes
    /// over capacity it is subdivided and its points redistributed.
    ///
    /// The returned status is the subdivision's: a leaf at minimum
    /// granularity cannot split and reports
    /// [`QuadError::MinimumGranularity`](crate::QuadError::MinimumGranularity)
    /// **with the point stored anyway**: the leaf simply stays over
    /// capacity. Callers decide whether that is acceptable for their
    /// workload. Only a coordinate outside the domain leaves the tree
    /// untouched.
    pub fn insert(&self, payload: T, lat: u32, lng: u32) -> QuadResult<()> {
        check_coordinate("lat", lat)?;
        check_coordinate("lng", lng)?;

        let mut state = self.state.write();
        state.len += 1;
        state.root.insert_bucket(Bucket::new(lat, lng, payload))
    }

    /// Creates a new, unbound cursor for this tree.
    pub fn cursor(&self) -> QuadCursor<T> {
        QuadCursor::unbound()
    }

    /// Binds `cursor` to the leaf containing `(lat, lng)`.
    ///
    /// The cursor receives a copy of the leaf's chain, most recently
    /// inserted point first. An empty leaf is a successful query that leaves
    /// the cursor not-good; it is not an error.
    pub fn query(&self, cursor: &mut QuadCursor<T>, lat: u32, lng: u32) -> QuadResult<()>
    where
        T: Clone,
    {
        check_coordinate("lat", lat)?;
        check_coordinate("lng", lng)?;

        let state = self.state.read();
        let leaf = state.root.find_leaf(lat, lng);
        let results = leaf
            .buckets()
            .map(|bucket| QueryResult {
                lat: bucket.lat,
                lng: bucket.lng,
                payload: bucket.payload.clone(),
            })
            .collect();
        cursor.bind(results);
        Ok(())
    }

    /// Binds `cursor` to results around `(lat, lng)` within `range`.
    ///
    /// **Degraded fallback contract**: gathering every leaf intersecting the
    /// given radius is not implemented; this method currently ignores
    /// `range` and behaves exactly like [`query`](QuadTree::query), i.e. it
    /// returns the single located leaf's chain. Callers must not rely on it
    /// for real range semantics.
    pub fn range_query(
        &self,
        cursor: &mut QuadCursor<T>,
        lat: u32,
        lng: u32,
        range: u32,
    ) -> QuadResult<()>
    where
        T: Clone,
    {
        log::debug!(
            "range query around ({}, {}) with range {} degrades to a point query",
            lat,
            lng,
            range
        );
        self.query(cursor, lat, lng)
    }

    /// Total number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.state.read().len
    }

    /// Returns `true` when the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

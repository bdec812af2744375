//! Breadth-first tree inspection.
//!
//! Read-only diagnostics: a walk produces one report per node, visiting the
//! root first and then each internal node's four children in quadrant order.
//! Rendering is left to the caller; [`QuadTree::dump`] writes a
//! human-readable form and [`QuadTree::debug_dump`] routes it to the logger.

use std::collections::VecDeque;
use std::fmt;

use crate::node::NodeBody;
use crate::region::Region;
use crate::tree::QuadTree;

/// One stored point as seen by a walk: its coordinates and the absolute
/// offsets from its node's center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketReport {
    pub lat: u32,
    pub lng: u32,
    pub lat_offset: u32,
    pub lng_offset: u32,
}

/// One node as seen by a walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeReport {
    /// The node's region.
    pub region: Region,
    /// Whether the node is a leaf.
    pub is_leaf: bool,
    /// Exact length of the node's own chain; zero for internal nodes.
    pub bucket_count: usize,
    /// The node's own chain, most recently inserted first.
    pub buckets: Vec<BucketReport>,
}

impl fmt::Display for NodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}, size: {}, leaf: {}",
            self.region, self.bucket_count, self.is_leaf
        )?;
        for bucket in &self.buckets {
            writeln!(
                f,
                "  lat: {}, lng: {}, lat offset: {}, lng offset: {}",
                bucket.lat, bucket.lng, bucket.lat_offset, bucket.lng_offset
            )?;
        }
        Ok(())
    }
}

impl<T> QuadTree<T> {
    /// Walks the whole tree breadth-first and reports every node exactly
    /// once.
    ///
    /// Non-authoritative debugging aid: the reports are a snapshot taken
    /// under the read lock and carry no payloads.
    pub fn walk(&self) -> Vec<NodeReport> {
        let state = self.state.read();
        let mut reports = Vec::new();
        let mut worklist = VecDeque::new();
        worklist.push_back(&state.root);

        while let Some(node) = worklist.pop_front() {
            if let NodeBody::Internal { children } = &node.body {
                for child in children.iter() {
                    worklist.push_back(child);
                }
            }

            let region = node.region;
            reports.push(NodeReport {
                region,
                is_leaf: node.is_leaf(),
                bucket_count: node.bucket_count(),
                buckets: node
                    .buckets()
                    .map(|bucket| BucketReport {
                        lat: bucket.lat,
                        lng: bucket.lng,
                        lat_offset: bucket.lat.abs_diff(region.lat),
                        lng_offset: bucket.lng.abs_diff(region.lng),
                    })
                    .collect(),
            });
        }

        reports
    }

    /// Renders the breadth-first walk to the given writer.
    pub fn dump<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "quadtree state ({} points)", self.len())?;
        for report in self.walk() {
            write!(out, "{}", report)?;
        }
        Ok(())
    }

    /// Logs the rendered walk at debug level.
    pub fn debug_dump(&self) {
        if log::log_enabled!(log::Level::Debug) {
            let mut rendered = String::new();
            if self.dump(&mut rendered).is_ok() {
                log::debug!("{}", rendered);
            }
        }
    }
}

//! Internal node and bucket representation of the quadtree.
//!
//! Nothing in this module is part of the public API; the tree handle in
//! [`crate::tree`] is the only entry point.

use crate::constants::MAX_BUCKET_SIZE;
use crate::errors::{QuadError, QuadResult};
use crate::region::Region;

/// One stored point in a leaf's chain.
///
/// Buckets form a singly linked, owned chain built by prepend: the head is
/// always the most recently inserted point. During subdivision a bucket
/// record moves from its leaf's chain into a descendant's chain; it is never
/// copied or dropped by that migration.
pub(crate) struct Bucket<T> {
    pub(crate) lat: u32,
    pub(crate) lng: u32,
    pub(crate) payload: T,
    pub(crate) next: Option<Box<Bucket<T>>>,
}

impl<T> Bucket<T> {
    pub(crate) fn new(lat: u32, lng: u32, payload: T) -> Box<Bucket<T>> {
        Box::new(Bucket {
            lat,
            lng,
            payload,
            next: None,
        })
    }
}

impl<T> Drop for Bucket<T> {
    fn drop(&mut self) {
        // Unlink the chain iteratively; a saturated leaf can hold an
        // unbounded chain, which recursive drop would turn into a stack
        // overflow.
        let mut next = self.next.take();
        while let Some(mut bucket) = next {
            next = bucket.next.take();
        }
    }
}

/// What a node is: a leaf owning a bucket chain, or an internal node owning
/// exactly four children.
///
/// A node is a leaf if and only if it has no children. Making the body a
/// two-variant enum enforces that invariant by construction: a partially
/// subdivided node cannot be represented, so leaf location never encounters
/// a missing child.
pub(crate) enum NodeBody<T> {
    Leaf {
        head: Option<Box<Bucket<T>>>,
        count: usize,
    },
    Internal {
        children: Box<[Node<T>; 4]>,
    },
}

/// A rectangular region of the tree.
pub(crate) struct Node<T> {
    pub(crate) region: Region,
    pub(crate) body: NodeBody<T>,
}

impl<T> Node<T> {
    /// Creates a fresh leaf covering `region` with an empty chain.
    pub(crate) fn leaf(region: Region) -> Node<T> {
        Node {
            region,
            body: NodeBody::Leaf {
                head: None,
                count: 0,
            },
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.body, NodeBody::Leaf { .. })
    }

    /// Number of buckets held directly by this node. Always zero for an
    /// internal node; buckets are migrated out at the moment of subdivision.
    pub(crate) fn bucket_count(&self) -> usize {
        match &self.body {
            NodeBody::Leaf { count, .. } => *count,
            NodeBody::Internal { .. } => 0,
        }
    }

    /// Iterates this node's own chain, most recently inserted first.
    pub(crate) fn buckets(&self) -> BucketIter<'_, T> {
        let next = match &self.body {
            NodeBody::Leaf { head, .. } => head.as_deref(),
            NodeBody::Internal { .. } => None,
        };
        BucketIter { next }
    }

    /// Descends from this node to the unique leaf whose region covers the
    /// point under the quadrant rule. Points outside this node's region are
    /// still routed; the comparison chain simply selects a boundary leaf.
    pub(crate) fn find_leaf(&self, lat: u32, lng: u32) -> &Node<T> {
        let mut node = self;
        while let NodeBody::Internal { children } = &node.body {
            node = &children[node.region.quadrant_of(lat, lng)];
        }
        node
    }

    /// Routes a bucket to its target leaf, prepends it there, and splits the
    /// leaf when it goes over capacity.
    ///
    /// The bucket is stored unconditionally; the returned status is the
    /// subdivision's. A leaf that cannot split reports
    /// [`QuadError::MinimumGranularity`] and stays over capacity, with the
    /// new bucket in place.
    pub(crate) fn insert_bucket(&mut self, mut bucket: Box<Bucket<T>>) -> QuadResult<()> {
        let quadrant = self.region.quadrant_of(bucket.lat, bucket.lng);
        let over_capacity = match &mut self.body {
            NodeBody::Internal { children } => {
                return children[quadrant].insert_bucket(bucket);
            }
            NodeBody::Leaf { head, count } => {
                bucket.next = head.take();
                *head = Some(bucket);
                *count += 1;
                *count > MAX_BUCKET_SIZE
            }
        };

        if over_capacity {
            self.subdivide()?;
        }
        Ok(())
    }

    /// Converts this leaf into an internal node with four fresh leaf
    /// children and redistributes its chain among them.
    ///
    /// The chain is drained by popping head buckets and re-routing each one
    /// with this node as the search root. If more than
    /// [`MAX_BUCKET_SIZE`] drained points land in the same child, that child
    /// subdivides in turn; the recursion is bounded because extents strictly
    /// shrink at every level.
    pub(crate) fn subdivide(&mut self) -> QuadResult<()> {
        let NodeBody::Leaf { head, count } = &mut self.body else {
            return Err(QuadError::SubdivideInternal);
        };
        let Some((delta_lat, delta_lng)) = self.region.halved() else {
            return Err(QuadError::MinimumGranularity);
        };

        let mut chain = head.take();
        *count = 0;

        let region = self.region;
        self.body = NodeBody::Internal {
            children: Box::new([
                Node::leaf(region.child(0, delta_lat, delta_lng)),
                Node::leaf(region.child(1, delta_lat, delta_lng)),
                Node::leaf(region.child(2, delta_lat, delta_lng)),
                Node::leaf(region.child(3, delta_lat, delta_lng)),
            ]),
        };
        log::debug!("subdivided {} into four children", region);

        while let Some(mut bucket) = chain {
            chain = bucket.next.take();
            // A re-split of a child that bottoms out at minimum granularity
            // leaves the drained bucket stored there; the drain itself has
            // nothing to report.
            let _ = self.insert_bucket(bucket);
        }

        Ok(())
    }
}

/// Iterator over a single node's bucket chain.
pub(crate) struct BucketIter<'a, T> {
    next: Option<&'a Bucket<T>>,
}

impl<'a, T> Iterator for BucketIter<'a, T> {
    type Item = &'a Bucket<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.next?;
        self.next = bucket.next.as_deref();
        Some(bucket)
    }
}

//! # Quadpoint - An In-Memory Point Quadtree
//!
//! This crate provides a spatial index over a bounded 2D coordinate space
//! (latitude/longitude as bounded unsigned integers), supporting insertion
//! of point-tagged payloads and cursor-based retrieval of payloads near a
//! query point.
//!
//! ## Features
//!
//! - **Bucketed Leaves**: points accumulate in a leaf until it exceeds a
//!   fixed capacity, then the leaf splits into four quadrants
//! - **Cursor Protocol**: queries bind a cursor to the located leaf and
//!   enumerate its points lazily, most recently inserted first
//! - **Snapshot Cursors**: a bound cursor owns a copy of its result chain
//!   and stays valid across later inserts and subdivisions
//! - **Thread Safe**: handles are cheaply cloneable and share one tree
//!   behind a read-write lock
//! - **Bounded Domain**: coordinates are validated against a named
//!   bit-width constant instead of being silently truncated
//! - **Request Decoding**: a small wire format feeds `(lat, lng, payload)`
//!   triples into the tree
//!
//! ## Quick Start
//!
//! ```rust
//! use quadpoint::QuadTree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // A tree spanning 0..=20 on both axes.
//! let tree = QuadTree::new(10, 10, 10, 10)?;
//!
//! tree.insert("city hall", 4, 6)?;
//! tree.insert("harbor", 4, 7)?;
//!
//! // Bind a cursor to the leaf around a query point.
//! let mut cursor = tree.cursor();
//! tree.query(&mut cursor, 5, 5)?;
//!
//! while cursor.good() {
//!     if let Some(result) = cursor.next() {
//!         println!("({}, {}): {}", result.lat, result.lng, result.payload);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod cursor;
pub mod errors;
pub mod protocol;
pub mod region;
pub mod traversal;

mod node;
mod tree;

pub use cursor::{QuadCursor, QueryResult};
pub use errors::{QuadError, QuadResult};
pub use protocol::{IncomingRequest, InsertRecord};
pub use region::Region;
pub use traversal::{BucketReport, NodeReport};
pub use tree::QuadTree;

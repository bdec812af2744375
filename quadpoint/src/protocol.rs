//! Wire-format decoding for insert requests.
//!
//! The request format is a sequence of little-endian records, each one
//! carrying a point and its payload:
//!
//! ```text
//! u32 lat | u32 lng | u16 payload_len | payload bytes
//! ```
//!
//! A request object accumulates records across [`parse`] calls and hands
//! them to the tree with [`apply`]. Decoding is purely structural;
//! coordinate validation happens on insertion.
//!
//! [`parse`]: IncomingRequest::parse
//! [`apply`]: IncomingRequest::apply

use bytes::{Buf, Bytes};

use crate::errors::{QuadError, QuadResult};
use crate::tree::QuadTree;

/// Fixed bytes preceding each record's payload.
const RECORD_HEADER_LEN: usize = 4 + 4 + 2;

/// One decoded `(lat, lng, payload)` triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertRecord {
    pub lat: u32,
    pub lng: u32,
    pub payload: Bytes,
}

/// A decoded insert request.
///
/// Reusable: [`reset`](IncomingRequest::reset) clears the accumulated
/// records so the same object can decode the next buffer.
#[derive(Debug, Default)]
pub struct IncomingRequest {
    records: Vec<InsertRecord>,
}

impl IncomingRequest {
    /// Creates an empty request.
    pub fn new() -> IncomingRequest {
        IncomingRequest::default()
    }

    /// Decodes every record in `data`, appending to this request.
    ///
    /// Returns the number of records decoded from this buffer. A truncated
    /// record fails with [`QuadError::MalformedRequest`]; records decoded
    /// before the truncation point are kept.
    pub fn parse(&mut self, data: impl Into<Bytes>) -> QuadResult<usize> {
        let mut buf: Bytes = data.into();
        let mut parsed = 0;

        while buf.has_remaining() {
            if buf.remaining() < RECORD_HEADER_LEN {
                log::error!(
                    "insert request truncated inside a record header, {} bytes left",
                    buf.remaining()
                );
                return Err(QuadError::MalformedRequest(format!(
                    "truncated record header, {} bytes left",
                    buf.remaining()
                )));
            }

            let lat = buf.get_u32_le();
            let lng = buf.get_u32_le();
            let payload_len = buf.get_u16_le() as usize;

            if buf.remaining() < payload_len {
                log::error!(
                    "insert request truncated inside a payload, expected {} bytes, {} left",
                    payload_len,
                    buf.remaining()
                );
                return Err(QuadError::MalformedRequest(format!(
                    "truncated payload, expected {} bytes, {} left",
                    payload_len,
                    buf.remaining()
                )));
            }

            let payload = buf.copy_to_bytes(payload_len);
            self.records.push(InsertRecord { lat, lng, payload });
            parsed += 1;
        }

        log::debug!("decoded {} insert records", parsed);
        Ok(parsed)
    }

    /// Clears all accumulated records for reuse.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// The records accumulated so far, in decode order.
    pub fn records(&self) -> &[InsertRecord] {
        &self.records
    }

    /// Inserts every accumulated record into `tree`.
    ///
    /// A minimum-granularity status from an insert is not fatal (the record
    /// is stored regardless) and does not interrupt the batch. Any other
    /// failure, such as an out-of-domain coordinate, stops the batch and
    /// propagates; records inserted before that point stay in the tree.
    /// Returns the number of inserted records.
    pub fn apply(&self, tree: &QuadTree<Bytes>) -> QuadResult<usize> {
        for record in &self.records {
            match tree.insert(record.payload.clone(), record.lat, record.lng) {
                Ok(()) | Err(QuadError::MinimumGranularity) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(self.records.len())
    }
}

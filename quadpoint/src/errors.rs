//! Error and result types for quadtree operations.

use thiserror::Error;

use crate::constants::MAX_COORDINATE;

/// Errors that can occur during quadtree operations.
///
/// Structural invariants (an internal node with a missing child) have no
/// variant here: the node representation makes that state unrepresentable,
/// so it cannot surface as a runtime error.
///
/// An empty query result is not an error either; it is reported as a
/// successful query with a not-good cursor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuadError {
    /// Subdivision was requested on a node that is not a leaf.
    ///
    /// The node is left unchanged; callers may treat this as a no-op.
    #[error("cannot subdivide an internal node")]
    SubdivideInternal,

    /// The region's half-extents can no longer be halved.
    ///
    /// The leaf keeps its bucket chain and may grow past
    /// [`MAX_BUCKET_SIZE`](crate::constants::MAX_BUCKET_SIZE) without bound.
    /// This is documented behavior, not retried automatically.
    #[error("region cannot be halved further, leaf retains its buckets over capacity")]
    MinimumGranularity,

    /// A coordinate lies outside the supported domain.
    #[error("{axis} coordinate {value} exceeds the supported maximum {max}", max = MAX_COORDINATE)]
    CoordinateOutOfRange {
        /// Which axis carried the offending value, `"lat"` or `"lng"`.
        axis: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// The requested tree region extends outside the coordinate domain.
    #[error("tree region is not fully inside the coordinate domain")]
    RegionOutOfDomain,

    /// A wire-format insert request could not be decoded.
    #[error("malformed insert request: {0}")]
    MalformedRequest(String),
}

/// A result type alias for quadtree operations.
pub type QuadResult<T> = Result<T, QuadError>;

/// Validates a single coordinate against the supported domain.
pub(crate) fn check_coordinate(axis: &'static str, value: u32) -> QuadResult<u32> {
    if value > MAX_COORDINATE {
        log::error!("{} coordinate {} rejected, exceeds {}", axis, value, MAX_COORDINATE);
        return Err(QuadError::CoordinateOutOfRange { axis, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_coordinate_accepts_domain() {
        assert_eq!(check_coordinate("lat", 0), Ok(0));
        assert_eq!(check_coordinate("lat", MAX_COORDINATE), Ok(MAX_COORDINATE));
    }

    #[test]
    fn test_check_coordinate_rejects_out_of_domain() {
        let err = check_coordinate("lng", MAX_COORDINATE + 1).unwrap_err();
        assert_eq!(
            err,
            QuadError::CoordinateOutOfRange {
                axis: "lng",
                value: MAX_COORDINATE + 1,
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err = QuadError::SubdivideInternal;
        assert_eq!(format!("{}", err), "cannot subdivide an internal node");

        let err = QuadError::CoordinateOutOfRange { axis: "lat", value: 70_000_000 };
        let rendered = format!("{}", err);
        assert!(rendered.contains("lat"));
        assert!(rendered.contains("70000000"));
        assert!(rendered.contains("67108863"));
    }
}

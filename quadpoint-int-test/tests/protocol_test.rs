//! Wire-format decoding driven end to end: buffer -> request -> tree -> cursor.

use bytes::Bytes;
use quadpoint::{IncomingRequest, QuadTree};
use quadpoint_int_test::test_util::stored_points;

#[ctor::ctor]
fn init() {
    colog::init();
}

fn encode_record(lat: u32, lng: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&lat.to_le_bytes());
    buf.extend_from_slice(&lng.to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

#[test]
fn test_decoded_request_populates_the_tree() {
    let mut buf = Vec::new();
    for i in 1u32..=20 {
        buf.extend_from_slice(&encode_record(i % 16, (i * 3) % 16, format!("payload-{}", i).as_bytes()));
    }

    let mut request = IncomingRequest::new();
    assert_eq!(request.parse(buf).unwrap(), 20);

    let tree = QuadTree::new(8, 8, 8, 8).unwrap();
    request.apply(&tree).unwrap();

    assert_eq!(tree.len(), 20);
    assert_eq!(stored_points(&tree), 20);
}

#[test]
fn test_decoded_payloads_round_trip_through_queries() {
    let buf = encode_record(3, 3, b"museum");

    let mut request = IncomingRequest::new();
    request.parse(buf).unwrap();

    let tree = QuadTree::new(8, 8, 8, 8).unwrap();
    request.apply(&tree).unwrap();

    let mut cursor = tree.cursor();
    tree.query(&mut cursor, 3, 3).unwrap();
    assert!(cursor.good());

    let result = cursor.next().unwrap();
    assert_eq!((result.lat, result.lng), (3, 3));
    assert_eq!(result.payload, Bytes::from("museum"));
    assert!(cursor.next().is_none());
}

#[test]
fn test_request_reuse_after_reset() {
    let mut request = IncomingRequest::new();
    request.parse(encode_record(1, 1, b"first")).unwrap();

    let tree = QuadTree::new(8, 8, 8, 8).unwrap();
    request.apply(&tree).unwrap();

    request.reset();
    request.parse(encode_record(2, 2, b"second")).unwrap();
    request.apply(&tree).unwrap();

    // The second apply only inserts the freshly decoded record.
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_truncated_buffer_keeps_tree_consistent() {
    let mut buf = encode_record(1, 1, b"ok");
    buf.extend_from_slice(&[1, 2, 3, 4]); // trailing garbage

    let mut request = IncomingRequest::new();
    assert!(request.parse(buf).is_err());

    // The complete record before the truncation is still applicable.
    let tree = QuadTree::new(8, 8, 8, 8).unwrap();
    request.apply(&tree).unwrap();
    assert_eq!(tree.len(), 1);
}

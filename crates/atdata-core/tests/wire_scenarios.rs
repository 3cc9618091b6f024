//! Fixed wire-format scenarios for both scalar kinds.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use atdata_core::{
    bytes, link, ByteString, Cid, Codec, CodecConfig, DataError, Identifier, Link, LinkEncoding,
    CBOR_NULL,
};
use serde_json::json;

const TEST_CID: &str = "bafyreibfd77vb2setujncomtz3j6xswrmiuxlykora6nogxbr4arhqu2ye";

#[test]
fn bytes_text_matches_fixture() {
    let payload = ByteString::new("test data");
    assert_eq!(payload.len(), 9);

    let text = bytes::encode_text(Some(&payload)).unwrap();
    assert_eq!(text, r#"{"$bytes":"dGVzdCBkYXRh"}"#);

    let decoded = bytes::decode_text(r#"{"$bytes":"dGVzdCBkYXRh"}"#).unwrap();
    assert_eq!(decoded.as_bytes(), b"test data");
}

#[test]
fn bytes_text_is_valid_json_object() {
    let payload = ByteString::new(vec![0xde, 0xad, 0xbe, 0xef]);
    let text = bytes::encode_text(Some(&payload)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({ "$bytes": "3q2+7w" }));
}

#[test]
fn link_text_matches_fixture() {
    let link: Link = TEST_CID.parse().unwrap();
    let text = link::encode_text(Some(&link)).unwrap();
    assert_eq!(text, format!(r#"{{"$link":"{TEST_CID}"}}"#));
}

#[test]
fn link_text_roundtrip_preserves_canonical_string() {
    let parsed = <Cid as Identifier>::parse(TEST_CID).unwrap();
    let text = link::encode_text(Some(&Link::new(parsed))).unwrap();
    let decoded: Link = link::decode_text(&text).unwrap();
    assert_eq!(
        decoded.canonical_string().as_deref(),
        Some(parsed.canonical_string().as_str())
    );
}

#[test]
fn absent_values_write_single_null_byte() {
    let mut buf = Vec::new();
    bytes::encode_binary(None, &mut buf).unwrap();
    assert_eq!(buf, [CBOR_NULL]);

    let mut buf = Vec::new();
    link::encode_binary::<Cid, _>(None, &mut buf).unwrap();
    assert_eq!(buf, [CBOR_NULL]);
}

#[test]
fn absent_values_have_no_text_form() {
    assert!(matches!(
        bytes::encode_text(None),
        Err(DataError::NilValue { kind: "$bytes" })
    ));
    assert!(matches!(
        link::encode_text::<Cid>(None),
        Err(DataError::NilValue { kind: "$link" })
    ));
}

#[test]
fn undefined_link_cannot_be_encoded() {
    let undefined = Link::<Cid>::undefined();
    assert_eq!(
        link::encode_text(Some(&undefined)),
        Err(DataError::UndefinedLink)
    );

    let mut buf = Vec::new();
    assert_eq!(
        link::encode_binary(Some(&undefined), &mut buf),
        Err(DataError::UndefinedLink)
    );
    assert!(buf.is_empty());
}

#[test]
fn envelopes_without_string_marker_are_decode_errors() {
    let bad_bytes = [
        json!({}),
        json!({ "$link": "dGVzdCBkYXRh" }),
        json!({ "$bytes": 12 }),
        json!({ "$bytes": ["dGVzdCBkYXRh"] }),
    ];
    for value in bad_bytes {
        let err = bytes::decode_text(&value.to_string()).unwrap_err();
        assert!(matches!(err, DataError::Decode { .. }), "{value}");
    }

    let bad_links = [
        json!({}),
        json!({ "$bytes": TEST_CID }),
        json!({ "$link": 1 }),
        json!({ "$link": null }),
        json!({ "$link": { "$link": TEST_CID } }),
    ];
    for value in bad_links {
        let err = link::decode_text::<Cid>(&value.to_string()).unwrap_err();
        assert!(matches!(err, DataError::Decode { .. }), "{value}");
    }
}

#[test]
fn shortened_identifier_is_invalid() {
    let short = &TEST_CID[..TEST_CID.len() - 1];
    let err = link::decode_text::<Cid>(&json!({ "$link": short }).to_string()).unwrap_err();
    assert!(matches!(err, DataError::InvalidIdentifier { .. }));

    let err = Link::<Cid>::parse(short).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn binary_decode_of_link_is_always_defined() {
    let link: Link = TEST_CID.parse().unwrap();
    let mut buf = Vec::new();
    link::encode_binary(Some(&link), &mut buf).unwrap();

    let decoded: Link = link::decode_binary(buf.as_slice()).unwrap();
    assert!(decoded.is_defined());
    assert_eq!(decoded.to_string(), TEST_CID);
}

#[test]
fn nullable_decode_distinguishes_absent_from_empty() {
    let mut absent = Vec::new();
    bytes::encode_binary(None, &mut absent).unwrap();
    let mut empty = Vec::new();
    bytes::encode_binary(Some(&ByteString::default()), &mut empty).unwrap();

    assert_ne!(absent, empty);
    assert_eq!(bytes::decode_binary_nullable(absent.as_slice()).unwrap(), None);
    assert_eq!(
        bytes::decode_binary_nullable(empty.as_slice()).unwrap(),
        Some(ByteString::default())
    );
    assert!(bytes::decode_binary(absent.as_slice()).is_err());
}

#[test]
fn link_binary_is_plain_byte_string() {
    let cid = Cid::try_from(TEST_CID).unwrap();
    let mut wire = vec![0x58, 0x24];
    wire.extend_from_slice(&cid.to_bytes());
    assert_eq!(&wire[2..4], &[0x01, 0x71]);

    let decoded: Link = Codec::default().decode_binary(wire.as_slice()).unwrap();
    assert_eq!(decoded.identifier(), Some(&cid));

    let mut buf = Vec::new();
    link::encode_binary(Some(&decoded), &mut buf).unwrap();
    assert_eq!(buf, wire);
}

#[test]
fn consecutive_values_share_one_stream() {
    let link: Link = TEST_CID.parse().unwrap();
    let mut buf = Vec::new();
    link::encode_binary(Some(&link), &mut buf).unwrap();
    link::encode_binary::<Cid, _>(None, &mut buf).unwrap();
    bytes::encode_binary(Some(&ByteString::new("test data")), &mut buf).unwrap();

    let mut reader = buf.as_slice();
    assert_eq!(link::decode_binary::<Cid, _>(&mut reader).unwrap(), link);
    assert_eq!(link::decode_binary_nullable::<Cid, _>(&mut reader).unwrap(), None);
    assert_eq!(bytes::decode_binary(&mut reader).unwrap(), ByteString::new("test data"));
    assert!(reader.is_empty());
}

#[test]
fn cross_kind_binary_input_is_rejected() {
    let tagged =
        Codec::new(CodecConfig::default().with_link_encoding(LinkEncoding::Tagged)).unwrap();
    let link: Link = TEST_CID.parse().unwrap();
    let mut link_buf = Vec::new();
    tagged.encode_binary(Some(&link), &mut link_buf).unwrap();
    assert!(matches!(
        bytes::decode_binary(link_buf.as_slice()),
        Err(DataError::Decode { .. })
    ));

    let mut bytes_buf = Vec::new();
    bytes::encode_binary(Some(&ByteString::new("test data")), &mut bytes_buf).unwrap();
    assert!(matches!(
        link::decode_binary::<Cid, _>(bytes_buf.as_slice()),
        Err(DataError::Decode { .. })
    ));
}

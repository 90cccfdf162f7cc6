//! Cross-language vector shared with the Node.js, Python and Go SDKs.
//!
//! Ed25519 is deterministic: same key + message = same signature. If any of
//! these fail, signatures from this crate will not verify elsewhere.

use ioproof_common::conformance::CROSS_LANGUAGE_VECTOR as VECTOR;
use ioproof_common::hasher::sha256_hex;
use ioproof_common::message::canonicalize;
use ioproof_common::response_signing::{
    build_well_known, sign_with_timestamp, verify_signature, KeyEntry, KeyPair, ResponseSigner,
    SignatureHeaders, WellKnownDirectory,
};

#[test]
fn produces_the_expected_hashes() {
    assert_eq!(sha256_hex(VECTOR.request_body), VECTOR.request_hash);
    assert_eq!(sha256_hex(VECTOR.response_body), VECTOR.response_hash);
}

#[test]
fn builds_the_expected_message() {
    let message = canonicalize(VECTOR.request_hash, VECTOR.response_hash, VECTOR.timestamp);
    assert_eq!(message.as_str(), VECTOR.message);
}

#[test]
fn derives_the_expected_public_key() {
    let kp = KeyPair::from_private_key_hex(VECTOR.private_key, VECTOR.key_id)
        .expect("vector private key should decode");
    assert_eq!(kp.public_key, VECTOR.public_key);
}

#[test]
fn produces_the_expected_signature() {
    let result = sign_with_timestamp(
        VECTOR.private_key,
        VECTOR.key_id,
        VECTOR.request_body,
        VECTOR.response_body,
        VECTOR.timestamp,
    )
    .expect("should sign with the vector key");

    assert_eq!(result.request_hash, VECTOR.request_hash);
    assert_eq!(result.response_hash, VECTOR.response_hash);
    assert_eq!(result.message.as_str(), VECTOR.message);
    assert_eq!(result.signature, VECTOR.signature);
    assert_eq!(result.timestamp, VECTOR.timestamp);
    assert_eq!(result.key_id, VECTOR.key_id);
}

#[test]
fn verifies_the_expected_signature() {
    assert!(verify_signature(
        VECTOR.public_key,
        VECTOR.message,
        VECTOR.signature
    ));
    VECTOR.check().expect("vector should conform");
}

#[test]
fn generated_keys_sign_and_verify() {
    for message_body in ["", "x", VECTOR.response_body] {
        let kp = KeyPair::generate().expect("should generate a key pair");
        let signer =
            ResponseSigner::from_private_key_hex(&kp.private_key, &kp.key_id).expect("valid key");
        let result = signer.sign(VECTOR.request_body, message_body);

        assert!(verify_signature(
            &kp.public_key,
            result.message.as_str(),
            &result.signature
        ));
        assert!(!verify_signature(
            VECTOR.public_key,
            result.message.as_str(),
            &result.signature
        ));
    }
}

#[test]
fn auditor_verifies_captured_headers_via_directory() {
    let signer =
        ResponseSigner::from_private_key_hex(VECTOR.private_key, VECTOR.key_id).expect("valid key");
    let result = signer.sign_with_timestamp(
        VECTOR.request_body,
        VECTOR.response_body,
        VECTOR.timestamp,
    );
    let headers = result.header_map().expect("should build headers");

    let published = build_well_known(&[KeyEntry::new(VECTOR.key_id, VECTOR.public_key)])
        .to_json()
        .expect("should serialize directory");
    let directory = WellKnownDirectory::from_json(&published).expect("should parse directory");
    let captured = SignatureHeaders::from_headers(&headers).expect("all headers present");

    assert_eq!(captured.signature, VECTOR.signature);
    assert_eq!(
        directory.verify_headers(VECTOR.request_hash, VECTOR.response_hash, &captured),
        Some(true)
    );
}

//! RFC 8032 §7.1 end-to-end test vectors and the malleability / low-order
//! / non-canonical-key rejection vectors from the same family of test
//! suites.

use ed25519_pure::edwards::EdwardsPoint;
use ed25519_pure::{generate_public_key, sign, verify};

fn from_hex32(hex_str: &str) -> [u8; 32] {
    let bytes = hex::decode(hex_str).expect("valid hex");
    bytes.try_into().expect("32 bytes")
}

fn from_hex64(hex_str: &str) -> [u8; 64] {
    let bytes = hex::decode(hex_str).expect("valid hex");
    bytes.try_into().expect("64 bytes")
}

#[test]
fn rfc8032_test_1_empty_message() {
    let sk = from_hex32("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let expected_pk =
        from_hex32("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
    let expected_sig = from_hex64(
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    );

    let pk = generate_public_key(&sk);
    assert_eq!(pk, expected_pk);

    let sig = sign(&sk, &[]);
    assert_eq!(sig, expected_sig);
    assert!(verify(&sig, &pk, &[]));
}

#[test]
fn rfc8032_test_2_one_byte_message() {
    let sk = from_hex32("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
    let msg = hex::decode("72").unwrap();

    let pk = generate_public_key(&sk);
    let sig = sign(&sk, &msg);

    assert_eq!(&hex::encode(sig)[..16], "92a009a9f0d4cab8");
    assert!(verify(&sig, &pk, &msg));
}

#[test]
fn rfc8032_test_3_two_byte_message() {
    let sk = from_hex32("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7");
    let msg = hex::decode("af82").unwrap();

    let pk = generate_public_key(&sk);
    let sig = sign(&sk, &msg);

    assert_eq!(&hex::encode(sig)[..16], "6291d657deec2402");
    assert!(verify(&sig, &pk, &msg));
}

#[test]
fn malleability_vector_s_plus_l_is_rejected() {
    let sk = from_hex32("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let pk = generate_public_key(&sk);
    let msg = b"malleability vector";
    let mut sig = sign(&sk, msg);
    assert!(verify(&sig, &pk, msg));

    let l_bytes = ed25519_pure::scalar::L_BYTES;
    let mut carry = 0u16;
    for i in 0..32 {
        let sum = u16::from(sig[32 + i]) + u16::from(l_bytes[i]) + carry;
        sig[32 + i] = sum as u8;
        carry = sum >> 8;
    }
    assert_eq!(carry, 0);

    assert!(!verify(&sig, &pk, msg));
}

#[test]
fn low_order_public_key_is_rejected() {
    let sk = from_hex32("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let msg = b"low order key vector";
    let sig = sign(&sk, msg);

    let low_order_pk = [0u8; 32];
    assert!(!verify(&sig, &low_order_pk, msg));
}

#[test]
fn non_canonical_y_public_key_is_rejected() {
    let sk = from_hex32("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let msg = b"non canonical y vector";
    let sig = sign(&sk, msg);

    let mut bad_pk = [0xffu8; 32];
    bad_pk[31] &= 0x7f;
    assert!(!verify(&sig, &bad_pk, msg));
}

#[test]
fn bit_flip_tamper_vectors_are_all_rejected() {
    let sk = from_hex32("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let pk = generate_public_key(&sk);
    let msg = b"tamper detection";
    let sig = sign(&sk, msg);
    assert!(verify(&sig, &pk, msg));

    for (byte_index, flip_mask) in [(0usize, 0x01u8), (31, 0x80u8), (20, 0xffu8)] {
        let mut tampered = sig;
        tampered[byte_index] ^= flip_mask;
        assert!(
            !verify(&tampered, &pk, msg),
            "sig byte {byte_index} flip {flip_mask:#x} should fail"
        );

        let mut tampered_pk = pk;
        tampered_pk[byte_index] ^= flip_mask;
        assert!(
            !verify(&sig, &tampered_pk, msg),
            "pk byte {byte_index} flip {flip_mask:#x} should fail"
        );
    }

    let mut tampered_msg = msg.to_vec();
    tampered_msg[0] ^= 0x01;
    assert!(!verify(&sig, &pk, &tampered_msg));
}

#[test]
fn wrong_key_rejection() {
    let sk1 = from_hex32("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let sk2 = from_hex32("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
    let pk2 = generate_public_key(&sk2);
    let msg = b"cross key message";

    let sig = sign(&sk1, msg);
    assert!(!verify(&sig, &pk2, msg));
}

#[test]
fn small_order_points_round_trip_through_encode_decode() {
    // The torsion subgroup of edwards25519 (the eight points whose order
    // divides the curve's cofactor 8) is cyclic, generated by any of its
    // four order-8 elements. The encoding below is one such generator —
    // one of the standard "low order point" test vectors shared across
    // Ed25519 implementations' small-subgroup rejection tests — and its
    // per-multiple orders were independently verified with
    // arbitrary-precision modular arithmetic against the curve equation
    // `-x^2 + y^2 = 1 + d*x^2*y^2` and the group law.
    let generator_bytes = from_hex32(
        "26e8958fc2b227b045c3f489f2ef98f0d5dfac05d3c63339b13802886d53fc05",
    );
    let generator =
        EdwardsPoint::decode(&generator_bytes, false).expect("order-8 generator decodes");

    // Expected order of `i * generator` for i in 1..=8: four order-8
    // points (i coprime to 8), two order-4 points (i = 2, 6), one
    // order-2 point (i = 4), and the identity at i = 8.
    let expected_orders = [8u32, 4, 8, 2, 8, 4, 8, 1];

    let mut multiple = generator;
    for (i, &expected_order) in expected_orders.iter().enumerate() {
        let encoded = multiple.encode();
        let decoded = EdwardsPoint::decode(&encoded, false).expect("small-order point decodes");
        assert_eq!(decoded.encode(), encoded, "round-trip failed at {}*G", i + 1);

        let order = point_order(&multiple);
        assert_eq!(order, expected_order, "unexpected order for {}*G", i + 1);

        multiple = multiple.add(&generator);
    }
    // 8*generator must land back on the identity.
    assert_eq!(multiple.encode(), EdwardsPoint::neutral().encode());
}

/// Smallest `n >= 1` with `n * p == identity`, searched up to the
/// torsion subgroup's maximum possible order (8).
fn point_order(p: &EdwardsPoint) -> u32 {
    let neutral = EdwardsPoint::neutral().encode();
    let mut acc = *p;
    for n in 1..=8u32 {
        if acc.encode() == neutral {
            return n;
        }
        acc = acc.add(p);
    }
    panic!("point did not return to the identity within 8 additions");
}

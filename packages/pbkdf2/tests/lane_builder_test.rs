//! Async batch derivation through the fluent builder

use sha2::Sha256;
use timelock_pbkdf2::{Kdf, KdfError, KdfPasses, ScheduleConfig};

fn reference(password: &[u8], salt: &[u8], lane: u32, iterations: u32) -> [u8; 32] {
    let mut salt = salt.to_vec();
    salt.extend_from_slice(&lane.to_be_bytes());
    let mut out = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, &salt, iterations, &mut out);
    out
}

#[tokio::test]
async fn fast_preset_matches_reference() {
    let passwords: [&[u8]; 3] = [b"correct horse", b"battery staple", b""];
    let keys = Kdf::pbkdf2_lanes()
        .with_salt(b"builder salt".to_vec())
        .with_passes(KdfPasses::Fast)
        .with_schedule(ScheduleConfig {
            legs_per_stride: 333,
            segment_iterations: None,
        })
        .derive(&passwords)
        .await
        .expect("derivation should succeed");

    assert_eq!(keys.len(), 3);
    for (lane, password) in passwords.iter().enumerate() {
        let expected = reference(password, b"builder salt", lane as u32, 1_000);
        assert!(keys.verify(lane, &expected), "lane {lane}");
        assert_eq!(keys.to_hex(lane), Some(hex::encode(expected)));
    }
}

#[tokio::test]
async fn single_iteration_is_u1() {
    let keys = Kdf::pbkdf2_lanes()
        .with_iterations(1)
        .with_salt(vec![0u8; 12])
        .derive(&[b"p"])
        .await
        .expect("derivation should succeed");
    assert_eq!(keys.get(0), Some(reference(b"p", &[0u8; 12], 0, 1).as_slice()));
}

#[tokio::test]
async fn segments_chain_harvested_keys() {
    let salt = b"segmented".to_vec();
    let keys = Kdf::pbkdf2_lanes()
        .with_salt(salt.clone())
        .with_iterations(7)
        .with_schedule(ScheduleConfig {
            legs_per_stride: 4,
            segment_iterations: Some(3),
        })
        .derive(&[b"seed0", b"seed1"])
        .await
        .expect("derivation should succeed");

    for (lane, seed) in [b"seed0", b"seed1"].iter().enumerate() {
        let lane_id = lane as u32;
        let first = reference(*seed, &salt, lane_id, 3);
        let second = reference(&first, &salt, lane_id, 3);
        let third = reference(&second, &salt, lane_id, 1);
        assert!(keys.verify(lane, &third), "lane {lane}");
    }
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let err = Kdf::pbkdf2_lanes()
        .with_salt(vec![1u8; 12])
        .with_iterations(0)
        .derive(&[b"p"])
        .await
        .expect_err("zero iterations must fail");
    assert!(matches!(err, KdfError::InvalidParameters(_)));

    let none: [&[u8]; 0] = [];
    let err = Kdf::pbkdf2_lanes()
        .with_salt(vec![1u8; 12])
        .with_passes(KdfPasses::Fast)
        .derive(&none)
        .await
        .expect_err("empty batch must fail");
    assert_eq!(err, KdfError::EmptyBatch);

    let err = Kdf::pbkdf2_lanes()
        .with_salt(vec![1u8; 12])
        .with_iterations(2)
        .derive(&[[0u8; 65]])
        .await
        .expect_err("oversized password must fail");
    assert_eq!(err, KdfError::PasswordTooLong { len: 65, max: 64 });

    let err = Kdf::pbkdf2_lanes()
        .with_salt(vec![1u8; 12])
        .with_iterations(2)
        .with_schedule(ScheduleConfig {
            legs_per_stride: 0,
            segment_iterations: None,
        })
        .derive(&[b"p"])
        .await
        .expect_err("zero stride must fail");
    assert!(matches!(err, KdfError::InvalidConfig(_)));
}

#[test]
fn builder_is_plain_data() {
    let builder = Kdf::pbkdf2_lanes().with_salt(b"s".to_vec());
    let copy = builder.clone();
    assert!(format!("{copy:?}").contains("HasSalt"));
    assert!(KdfPasses::default().is_password_safe());
}

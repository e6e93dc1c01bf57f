use c256_math::{active_engine, row_add_scaled, row_scale, row_xor, scalar, tables};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_buf(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let mut v = vec![0u8; len];
    rng.fill(v.as_mut_slice());
    v
}

#[test]
fn test_dispatch_matches_scalar() {
    let t = tables();
    let mut rng = StdRng::seed_from_u64(0xC256);
    // Lengths straddle the 16/32-byte vector steps and the 8-byte word step.
    for len in [1usize, 7, 8, 15, 16, 17, 31, 32, 33, 63, 64, 100, 1400] {
        let src = random_buf(&mut rng, len);
        let base = random_buf(&mut rng, len);
        for factor in [0u8, 1, 2, 3, 0x1B, 0x80, 0xFF] {
            let mut fast = base.clone();
            row_add_scaled(t, &mut fast, &src, factor);

            let mut slow = base.clone();
            scalar::row_add_scaled(t, &mut slow, &src, factor);

            assert_eq!(fast, slow, "engine {} len {} factor {}", active_engine(), len, factor);
        }
    }
}

#[test]
fn test_add_scaled_is_per_byte_product() {
    let t = tables();
    let src: Vec<u8> = (0..=255u8).collect();
    let mut dest = vec![0xA5u8; 256];
    row_add_scaled(t, &mut dest, &src, 0x53);
    for (i, d) in dest.iter().enumerate() {
        assert_eq!(*d, 0xA5 ^ t.mul(i as u8, 0x53));
    }
}

#[test]
fn test_add_scaled_twice_cancels() {
    let t = tables();
    let mut rng = StdRng::seed_from_u64(7);
    let src = random_buf(&mut rng, 257);
    let orig = random_buf(&mut rng, 257);
    let mut dest = orig.clone();
    row_add_scaled(t, &mut dest, &src, 0x9C);
    assert_ne!(dest, orig);
    row_add_scaled(t, &mut dest, &src, 0x9C);
    assert_eq!(dest, orig);
}

#[test]
fn test_xor_handles_tail() {
    let mut dest = vec![0xFFu8; 13];
    let src: Vec<u8> = (0..13).collect();
    row_xor(&mut dest, &src);
    let expected: Vec<u8> = (0..13u8).map(|b| b ^ 0xFF).collect();
    assert_eq!(dest, expected);
}

#[test]
fn test_common_length_only() {
    let t = tables();
    let mut dest = vec![0u8; 4];
    row_add_scaled(t, &mut dest, &[1, 1], 2);
    assert_eq!(dest, vec![2, 2, 0, 0]);
    row_xor(&mut dest, &[1, 1, 1, 1, 1, 1]);
    assert_eq!(dest, vec![3, 3, 1, 1]);
}

#[test]
fn test_scale_then_inverse_restores() {
    let t = tables();
    let mut rng = StdRng::seed_from_u64(99);
    let orig = random_buf(&mut rng, 500);
    for factor in [2u8, 0x47, 0xFE] {
        let mut buf = orig.clone();
        row_scale(t, &mut buf, factor);
        row_scale(t, &mut buf, t.inv(factor));
        assert_eq!(buf, orig);
    }

    let mut buf = orig.clone();
    row_scale(t, &mut buf, 1);
    assert_eq!(buf, orig);
    row_scale(t, &mut buf, 0);
    assert!(buf.iter().all(|&b| b == 0));
}

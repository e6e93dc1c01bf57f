use c256_codec::{decode, encode, initialize, Block, Codec, CodecParams, GfTables};
use c256_math::GfSymbol;
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

fn random_blocks(rng: &mut StdRng, count: usize, block_bytes: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| {
            let mut v = vec![0u8; block_bytes];
            rng.fill(v.as_mut_slice());
            v
        })
        .collect()
}

/// Encode, drop `erasures` random originals, fill the gaps with random
/// recovery blocks in random order, decode and verify.
fn run_trial(rng: &mut StdRng, k: usize, m: usize, block_bytes: usize, erasures: usize) {
    let originals = random_blocks(rng, k, block_bytes);
    let refs: Vec<&[u8]> = originals.iter().map(|b| b.as_slice()).collect();
    let recovery = encode(k, m, &refs, block_bytes).unwrap();
    assert_eq!(recovery.len(), m);

    let lost = index::sample(rng, k, erasures);
    let used = index::sample(rng, m, erasures);

    let mut slots: Vec<(u8, Vec<u8>)> = (0..k).map(|i| (i as u8, originals[i].clone())).collect();
    for (gap, rec) in lost.iter().zip(used.iter()) {
        slots[gap] = ((k + rec) as u8, recovery[rec].clone());
    }
    slots.shuffle(rng);

    let mut blocks: Vec<Block> = slots
        .iter_mut()
        .map(|(row, data)| Block::new(*row, data.as_mut_slice()))
        .collect();
    decode(k, m, &mut blocks, block_bytes).unwrap();

    let mut seen = vec![false; k];
    for b in &blocks {
        let row = b.row as usize;
        assert!(row < k, "row {} left unrecovered", row);
        assert!(!seen[row], "row {} reported twice", row);
        seen[row] = true;
        assert_eq!(&*b.data, originals[row].as_slice(), "k={} m={} e={} row {}", k, m, erasures, row);
    }
}

#[test]
fn test_random_erasure_patterns() {
    initialize().unwrap();
    let mut rng = StdRng::seed_from_u64(0x1337);
    for &(k, m) in &[(2, 1), (4, 2), (10, 4), (16, 16), (48, 96), (29, 3)] {
        for e in 0..=m.min(k) {
            for _ in 0..3 {
                run_trial(&mut rng, k, m, 64, e);
            }
        }
    }
}

#[test]
fn test_odd_block_sizes() {
    let mut rng = StdRng::seed_from_u64(5);
    for block_bytes in [1usize, 3, 7, 9, 33, 1399] {
        run_trial(&mut rng, 6, 3, block_bytes, 3);
        run_trial(&mut rng, 6, 3, block_bytes, 1);
    }
}

#[test]
fn test_original_harness_shape() {
    // k = 48, m = 96, 1400-byte blocks, as many erasures as originals.
    let mut rng = StdRng::seed_from_u64(48);
    run_trial(&mut rng, 48, 96, 1400, 48);
}

#[test]
fn test_no_erasures_leaves_blocks_untouched() {
    let mut rng = StdRng::seed_from_u64(1);
    let (k, m, bytes) = (8, 4, 40);
    let originals = random_blocks(&mut rng, k, bytes);

    let mut copies: Vec<(u8, Vec<u8>)> = originals.iter().cloned().enumerate().map(|(i, d)| (i as u8, d)).collect();
    copies.reverse();
    let mut blocks: Vec<Block> = copies.iter_mut().map(|(r, d)| Block::new(*r, d.as_mut_slice())).collect();

    decode(k, m, &mut blocks, bytes).unwrap();
    for (i, b) in blocks.iter().enumerate() {
        assert_eq!(b.row as usize, k - 1 - i);
        assert_eq!(&*b.data, originals[k - 1 - i].as_slice());
    }
}

#[test]
fn test_parity_matches_dense_product() {
    let mut rng = StdRng::seed_from_u64(77);
    let (k, m, bytes) = (7, 5, 24);
    let params = CodecParams::new(k, m, bytes).unwrap();
    let codec = Codec::with_default_tables(params);

    let originals = random_blocks(&mut rng, k, bytes);
    let refs: Vec<&[u8]> = originals.iter().map(|b| b.as_slice()).collect();
    let recovery = codec.encode(&refs).unwrap();

    let rows: Vec<u8> = (k as u8..(k + m) as u8).collect();
    let cols: Vec<u8> = (0..k as u8).collect();
    let dense = codec.matrix().submatrix(&rows, &cols);

    for pos in 0..bytes {
        let column: Vec<GfSymbol> = originals.iter().map(|b| GfSymbol(b[pos])).collect();
        for j in 0..m {
            let y = dense
                .row(j)
                .iter()
                .zip(&column)
                .fold(GfSymbol::ZERO, |acc, (&a, &x)| acc + a * x);
            assert_eq!(recovery[j][pos], y.0);
        }
    }

    // First recovery block is plain XOR parity.
    for pos in 0..bytes {
        let xor = originals.iter().fold(0u8, |acc, b| acc ^ b[pos]);
        assert_eq!(recovery[0][pos], xor);
    }
}

#[test]
fn test_encode_forms_agree() {
    let mut rng = StdRng::seed_from_u64(3);
    let (k, m, bytes) = (5, 4, 16);
    let codec = Codec::with_default_tables(CodecParams::new(k, m, bytes).unwrap());
    let originals = random_blocks(&mut rng, k, bytes);
    let refs: Vec<&[u8]> = originals.iter().map(|b| b.as_slice()).collect();

    let separate = codec.encode(&refs).unwrap();

    let mut contiguous = vec![0u8; m * bytes];
    codec.encode_into(&refs, &mut contiguous).unwrap();

    for j in 0..m {
        let mut single = vec![0xAAu8; bytes];
        codec.encode_block(&refs, j, &mut single).unwrap();
        assert_eq!(single, separate[j]);
        assert_eq!(&contiguous[j * bytes..(j + 1) * bytes], separate[j].as_slice());
    }
}

#[test]
fn test_private_tables_handle() {
    let tables = GfTables::generate();
    let codec = Codec::new(&tables, CodecParams::new(3, 3, 8).unwrap());

    let originals = vec![vec![0x11u8; 8], vec![0x22u8; 8], vec![0x33u8; 8]];
    let refs: Vec<&[u8]> = originals.iter().map(|b| b.as_slice()).collect();
    let mut recovery = codec.encode(&refs).unwrap();

    // All three originals lost.
    let (r0, rest) = recovery.split_at_mut(1);
    let (r1, r2) = rest.split_at_mut(1);
    let mut blocks = [
        Block::new(5, &mut r2[0]),
        Block::new(3, &mut r0[0]),
        Block::new(4, &mut r1[0]),
    ];
    codec.decode(&mut blocks).unwrap();

    for b in &blocks {
        assert_eq!(&*b.data, originals[b.row as usize].as_slice());
    }
}

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hybrid_rle::error::Result;
use hybrid_rle::{decode_prefixed, encode_prefixed};

use super::{init_logger, roundtrip};

fn max_value(num_bits: u32) -> u32 {
    if num_bits == 32 {
        u32::MAX
    } else {
        (1u32 << num_bits) - 1
    }
}

/// Values in runs of random lengths, so that both RLE and bitpacked runs show up.
fn runs_of(rng: &mut StdRng, num_bits: u32, length: usize) -> Vec<u32> {
    let values = Uniform::new_inclusive(0, max_value(num_bits));
    let mut result = Vec::with_capacity(length);
    while result.len() < length {
        let run = if rng.gen_bool(0.3) {
            rng.gen_range(1..40)
        } else {
            1
        };
        let value = values.sample(rng);
        result.extend(std::iter::repeat(value).take(run.min(length - result.len())));
    }
    result
}

#[test]
fn random_all_widths() -> Result<()> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(42);
    for num_bits in 1..=32 {
        for length in [1, 7, 8, 9, 63, 64, 1000] {
            let values = runs_of(&mut rng, num_bits, length);
            roundtrip(&values, num_bits)?;
        }
    }
    Ok(())
}

#[test]
fn uniform_noise() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let values = Uniform::new_inclusive(0, 1000)
        .sample_iter(&mut rng)
        .take(10_000)
        .collect::<Vec<_>>();
    roundtrip(&values, 10)?;
    Ok(())
}

#[test]
fn repeats_around_threshold() -> Result<()> {
    for repeats in 1..=20 {
        let values = std::iter::repeat(3)
            .take(repeats)
            .chain([1, 2, 1, 2])
            .chain(std::iter::repeat(3).take(repeats))
            .collect::<Vec<u32>>();
        roundtrip(&values, 2)?;
    }
    Ok(())
}

#[test]
fn long_run_after_partial_group() -> Result<()> {
    // 5 distinct values then a long repeat: the repeat only starts counting after
    // the group holding its first values is committed
    let values = (0..5)
        .chain(std::iter::repeat(5).take(100))
        .collect::<Vec<u32>>();
    roundtrip(&values, 3)?;
    Ok(())
}

#[test]
fn max_values() -> Result<()> {
    let values = vec![u32::MAX, 0, u32::MAX, 1, u32::MAX - 1, 0, 0, 0, 0, 0, 0, 0, 0, 7];
    roundtrip(&values, 32)?;
    Ok(())
}

#[test]
fn zero_width() -> Result<()> {
    let encoded = roundtrip(&[0; 1000], 0)?;
    // one RLE run, no value bytes
    assert_eq!(encoded, vec![0b11010000, 0b1111]);

    let encoded = roundtrip(&[0; 3], 0)?;
    assert_eq!(encoded, vec![3 << 1]);
    Ok(())
}

#[test]
fn empty() -> Result<()> {
    let encoded = roundtrip(&[], 4)?;
    assert!(encoded.is_empty());
    Ok(())
}

#[test]
fn tail_padding() -> Result<()> {
    let values = (0..11).collect::<Vec<u32>>();
    let encoded = roundtrip(&values, 4)?;
    // a single run of two groups, the second one padded
    assert_eq!(encoded[0], (2 << 1) | 1);
    assert_eq!(encoded.len(), 1 + 2 * 4);
    Ok(())
}

#[test]
fn prefixed() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(3);
    let values = runs_of(&mut rng, 5, 500);
    let encoded = encode_prefixed(values.iter().copied(), 5)?;
    assert_eq!(
        u32::from_le_bytes(encoded[..4].try_into().unwrap()) as usize,
        encoded.len() - 4
    );
    assert_eq!(decode_prefixed(&encoded, 5, values.len())?, values);
    Ok(())
}

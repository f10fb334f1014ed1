//! Statistical decode-success-rate property (spec §8 item 6): for each
//! `K` and repair overhead, `K + overhead` received symbols should
//! decode successfully with probability at least `1 - 10^(-2-overhead)`,
//! verified empirically rather than proven per-instance.
use raptorq::{Decoder, Encoder};

fn xorshift64(seed: &mut u64) -> u64 {
    *seed ^= *seed << 13;
    *seed ^= *seed >> 7;
    *seed ^= *seed << 17;
    *seed
}

fn random_data(seed: &mut u64, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    for chunk in data.chunks_mut(8) {
        let word = xorshift64(seed).to_le_bytes();
        chunk.copy_from_slice(&word[..chunk.len()]);
    }
    data
}

/// One trial: encode `k` symbols, drop one source symbol at random, hand
/// the decoder exactly `1 + overhead` repair symbols, and report whether
/// decode reproduced the original object.
fn trial(seed: &mut u64, k: u32, symbol_size: usize, overhead: u32) -> bool {
    let data = random_data(seed, k as usize * symbol_size);
    let enc = Encoder::new(&data, symbol_size).unwrap();
    assert_eq!(enc.params().k, k);

    let dropped = (xorshift64(seed) % k as u64) as u32;
    let mut dec = Decoder::new(k, symbol_size).unwrap();
    for esi in 0..k {
        if esi == dropped {
            continue;
        }
        dec.add_symbol(esi, &enc.encode_symbol(esi).unwrap()).unwrap();
    }
    for r in 0..(1 + overhead) {
        dec.add_symbol(k + r, &enc.encode_symbol(k + r).unwrap()).unwrap();
    }

    match dec.decode() {
        Ok(out) => out[..data.len()] == data[..],
        Err(_) => false,
    }
}

/// Minimum success rate spec §8 item 6 asks for at a given overhead.
fn min_success_rate(overhead: u32) -> f64 {
    1.0 - 10f64.powi(-(2 + overhead as i32))
}

fn run_property(k: u32, symbol_size: usize, overhead: u32, trials: u32, seed_base: u64) {
    let mut seed = seed_base;
    let mut successes = 0u32;
    for _ in 0..trials {
        if trial(&mut seed, k, symbol_size, overhead) {
            successes += 1;
        }
    }
    let rate = successes as f64 / trials as f64;
    let required = min_success_rate(overhead);
    assert!(
        rate >= required,
        "K={k} overhead={overhead}: success rate {rate:.4} over {trials} trials below required {required:.4}"
    );
}

#[test]
fn decode_success_rate_small_k() {
    for &k in &[10u32, 100] {
        for &overhead in &[0u32, 1, 2] {
            run_property(k, 16, overhead, 120, 0x1234_5678_9ABC_DEF0 ^ (k as u64) ^ ((overhead as u64) << 32));
        }
    }
}

/// K in {1000, 10000} with the full ≥100-trial count is O(L^3) per trial
/// through Gaussian elimination and takes minutes; run explicitly with
/// `cargo test -- --ignored` rather than by default.
#[test]
#[ignore]
fn decode_success_rate_large_k() {
    for &k in &[1000u32, 10000] {
        for &overhead in &[0u32, 1, 2] {
            run_property(k, 16, overhead, 100, 0x0FED_CBA9_8765_4321 ^ (k as u64) ^ ((overhead as u64) << 32));
        }
    }
}

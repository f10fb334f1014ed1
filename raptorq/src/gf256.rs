//! GF(256) arithmetic over the RFC 6330 §5.7 primitive polynomial
//! `0x11D` (x^8 + x^4 + x^3 + x^2 + 1).
//!
//! Addition/subtraction are XOR; multiplication and division go through
//! 256-entry log/exp tables built once at first use, the same shape as
//! the teacher's `fec::gf_tables::init_gf_tables`.

use crate::error::{RaptorQCoreError, Result};
use once_cell::sync::Lazy;

const GF_ORDER: usize = 256;
const IRREDUCIBLE_POLY: u16 = 0x11D;

struct Tables {
    log: [u8; GF_ORDER],
    exp: [u8; GF_ORDER * 2],
}

static TABLES: Lazy<Tables> = Lazy::new(|| {
    let mut log = [0u8; GF_ORDER];
    let mut exp = [0u8; GF_ORDER * 2];
    let mut x: u16 = 1;
    for i in 0..255usize {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x >= 256 {
            x ^= IRREDUCIBLE_POLY;
        }
    }
    Tables { log, exp }
});

/// A single octet: an element of GF(256).
pub type Octet = u8;

#[inline(always)]
pub fn add(a: Octet, b: Octet) -> Octet {
    a ^ b
}

#[inline(always)]
pub fn sub(a: Octet, b: Octet) -> Octet {
    a ^ b
}

#[inline(always)]
pub fn mul(a: Octet, b: Octet) -> Octet {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = &*TABLES;
    let la = t.log[a as usize] as u16;
    let lb = t.log[b as usize] as u16;
    t.exp[(la + lb) as usize]
}

/// Zero-dividend short-circuits to 0; dividing BY zero is the one
/// operation in this module that can fail (spec §7 `ArithmeticError`).
#[inline(always)]
pub fn div(a: Octet, b: Octet) -> Result<Octet> {
    if b == 0 {
        return Err(RaptorQCoreError::ArithmeticError);
    }
    if a == 0 {
        return Ok(0);
    }
    let t = &*TABLES;
    let la = t.log[a as usize] as i16;
    let lb = t.log[b as usize] as i16;
    Ok(t.exp[((la - lb + 255) % 255) as usize])
}

#[inline(always)]
pub fn inv(b: Octet) -> Result<Octet> {
    div(1, b)
}

/// `alpha^i`, the generator element raised to `i`, reduced mod the
/// multiplicative group order 255. Used by the HDPC `MT`/`GAMMA`
/// construction (RFC 6330 §5.3.3.3).
#[inline(always)]
pub fn pow_alpha(i: u32) -> Octet {
    TABLES.exp[(i % 255) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_zero_propagates() {
        for b in 0u16..=255 {
            assert_eq!(mul(0, b as u8), 0);
            assert_eq!(mul(b as u8, 0), 0);
        }
    }

    #[test]
    fn add_is_involution() {
        for a in 0u16..=255 {
            assert_eq!(add(a as u8, a as u8), 0);
        }
    }

    #[test]
    fn div_by_zero_errors() {
        assert!(matches!(div(5, 0), Err(RaptorQCoreError::ArithmeticError)));
        assert_eq!(div(0, 5).unwrap(), 0);
    }

    // spec §8 S6: golden vectors for the RFC primitive polynomial.
    #[test]
    fn golden_vectors() {
        assert_eq!(mul(0x53, 0xCA), 0x01);
        assert_eq!(inv(0x53).unwrap(), 0xCA);
    }

    #[test]
    fn pow_alpha_wraps_at_group_order() {
        assert_eq!(pow_alpha(0), 1);
        assert_eq!(pow_alpha(255), pow_alpha(0));
    }

    #[test]
    fn mul_div_roundtrip() {
        for a in 1u16..=255 {
            for b in 1u16..=255 {
                let p = mul(a as u8, b as u8);
                assert_eq!(div(p, b as u8).unwrap(), a as u8);
            }
        }
    }
}

//! 32-bit fingerprints used as bucket selectors when partitioning records.
//!
//! Deterministic and pure, not collision resistant.

/// Fractional resolution kept by float fingerprints.
const FLOAT_SCALE: f64 = 100_000.0;

const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// The unsigned value of the byte.
#[must_use]
pub fn hash_u8(b: u8) -> i32 {
    i32::from(b)
}

#[must_use]
pub const fn hash_i32(i: i32) -> i32 {
    i
}

/// Low 32 bits.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn hash_i64(l: i64) -> i32 {
    l as i32
}

/// Integer part of `d * 100000`.
///
/// The cast saturates at the `i32` bounds and maps NaN to zero, so values
/// closer than ~1e-5 share a fingerprint.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hash_f64(d: f64) -> i32 {
    (d * FLOAT_SCALE) as i32
}

/// Integer part of `f * 100000`, computed in single precision.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hash_f32(f: f32) -> i32 {
    (f * 100_000.0_f32) as i32
}

/// 32-bit FNV-1a over the UTF-8 bytes; stable across processes.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn hash_str(s: &str) -> i32 {
    let mut hash = FNV32_OFFSET;
    for byte in s.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV32_PRIME);
    }
    hash as i32
}

/// Fold `h = 8h + b` over the bytes read as signed octets.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn hash_bytes(bytes: &[u8]) -> i32 {
    bytes.iter().fold(0_i32, |h, &b| {
        h.wrapping_mul(8).wrapping_add(i32::from(b as i8))
    })
}

/// A value with a deterministic 32-bit fingerprint.
pub trait Fingerprint {
    fn fingerprint(&self) -> i32;
}

impl Fingerprint for u8 {
    fn fingerprint(&self) -> i32 {
        hash_u8(*self)
    }
}

impl Fingerprint for i32 {
    fn fingerprint(&self) -> i32 {
        hash_i32(*self)
    }
}

impl Fingerprint for i64 {
    fn fingerprint(&self) -> i32 {
        hash_i64(*self)
    }
}

impl Fingerprint for f32 {
    fn fingerprint(&self) -> i32 {
        hash_f32(*self)
    }
}

impl Fingerprint for f64 {
    fn fingerprint(&self) -> i32 {
        hash_f64(*self)
    }
}

impl Fingerprint for str {
    fn fingerprint(&self) -> i32 {
        hash_str(self)
    }
}

impl Fingerprint for String {
    fn fingerprint(&self) -> i32 {
        hash_str(self)
    }
}

impl Fingerprint for [u8] {
    fn fingerprint(&self) -> i32 {
        hash_bytes(self)
    }
}

impl Fingerprint for Vec<u8> {
    fn fingerprint(&self) -> i32 {
        hash_bytes(self)
    }
}

/// Bucket in `0..buckets` for a fingerprint. `buckets` must be non-zero.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn bucket(fingerprint: i32, buckets: u32) -> u32 {
    debug_assert!(buckets > 0, "bucket count must be non-zero");
    (fingerprint as u32) % buckets.max(1)
}

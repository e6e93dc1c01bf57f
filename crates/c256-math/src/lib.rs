#![no_std]
#![allow(unsafe_code)]

extern crate alloc;

pub mod tables;
pub mod matrix;
pub mod scalar;

pub use matrix::GfMatrix;
pub use tables::{initialize, is_initialized, tables, GfTables};

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
mod avx2;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;

use c256_core::WORD_BYTES;

// --- GfSymbol Implementation ---
/// A GF(2^8) element. Operators go through the process-wide tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct GfSymbol(pub u8);

impl GfSymbol {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    #[inline(always)]
    pub fn add(self, rhs: Self) -> Self { Self(self.0 ^ rhs.0) }
    #[inline(always)]
    pub fn sub(self, rhs: Self) -> Self { self.add(rhs) }

    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        Self(tables().mul(self.0, rhs.0))
    }
}

// --- THE SIMD DISPATCHER ---
/// Multiply-accumulate: `dest[i] ^= src[i] * factor` over the common length.
#[inline]
pub fn row_add_scaled(tables: &GfTables, dest: &mut [u8], src: &[u8], factor: u8) {
    if factor == 0 || dest.is_empty() { return; }

    if factor == 1 {
        row_xor(dest, src);
        return;
    }

    let len = dest.len().min(src.len());
    let (dest, src) = (&mut dest[..len], &src[..len]);
    let done = vector_prefix(tables, dest, src, factor);
    scalar::row_add_scaled(tables, &mut dest[done..], &src[done..], factor);
}

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
#[inline(always)]
fn vector_prefix(tables: &GfTables, dest: &mut [u8], src: &[u8], factor: u8) -> usize {
    let (lo, hi) = tables.nibbles(factor);
    // SAFETY: avx2 is enabled for this compilation target.
    unsafe { avx2::row_add_scaled_avx2(dest, src, lo, hi) }
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[inline(always)]
fn vector_prefix(tables: &GfTables, dest: &mut [u8], src: &[u8], factor: u8) -> usize {
    let (lo, hi) = tables.nibbles(factor);
    // SAFETY: neon is enabled for this compilation target.
    unsafe { neon::row_add_scaled_neon(dest, src, lo, hi) }
}

#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "avx2"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
#[inline(always)]
fn vector_prefix(_tables: &GfTables, _dest: &mut [u8], _src: &[u8], _factor: u8) -> usize {
    0
}

/// `dest[i] ^= src[i]`, a machine word at a time.
#[inline]
pub fn row_xor(dest: &mut [u8], src: &[u8]) {
    let len = dest.len().min(src.len());
    let mut d_words = dest[..len].chunks_exact_mut(WORD_BYTES);
    let mut s_words = src[..len].chunks_exact(WORD_BYTES);

    for (d, s) in (&mut d_words).zip(&mut s_words) {
        let mut a = [0u8; WORD_BYTES];
        let mut b = [0u8; WORD_BYTES];
        a.copy_from_slice(d);
        b.copy_from_slice(s);
        let x = u64::from_ne_bytes(a) ^ u64::from_ne_bytes(b);
        d.copy_from_slice(&x.to_ne_bytes());
    }

    for (d, s) in d_words.into_remainder().iter_mut().zip(s_words.remainder()) {
        *d ^= *s;
    }
}

/// In-place `buf[i] *= factor`.
#[inline]
pub fn row_scale(tables: &GfTables, buf: &mut [u8], factor: u8) {
    match factor {
        0 => buf.fill(0),
        1 => {}
        _ => scalar::row_scale(tables, buf, factor),
    }
}

/// Name of the multiply-accumulate back end compiled into this build.
pub fn active_engine() -> &'static str {
    if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
        "AVX2 [32B/STEP]"
    } else if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
        "NEON [16B/STEP]"
    } else {
        "SCALAR [1B/STEP]"
    }
}

// Operator Overloads
impl core::ops::Add for GfSymbol { type Output = Self; fn add(self, rhs: Self) -> Self { GfSymbol::add(self, rhs) } }
impl core::ops::Sub for GfSymbol { type Output = Self; fn sub(self, rhs: Self) -> Self { GfSymbol::sub(self, rhs) } }
impl core::ops::Mul for GfSymbol { type Output = Self; fn mul(self, rhs: Self) -> Self { GfSymbol::mul(self, rhs) } }

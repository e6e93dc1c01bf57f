//! Systematic Cauchy Reed-Solomon erasure codec over GF(256).
//!
//! `k` original blocks produce `m` recovery blocks; any `k` of the `k + m`
//! blocks rebuild the originals. Rows `0..k` name originals, rows `k..k+m`
//! name recovery blocks, so `k + m <= 256`.
//!
//! ```
//! use c256_codec::{decode, encode, Block};
//!
//! let mut data = vec![vec![1u8; 16], vec![2u8; 16], vec![3u8; 16]];
//! let refs: Vec<&[u8]> = data.iter().map(|d| d.as_slice()).collect();
//! let mut recovery = encode(3, 2, &refs, 16).unwrap();
//!
//! // Lose original 1, substitute the first recovery block (row 3).
//! let (first, rest) = data.split_at_mut(1);
//! let mut blocks = [
//!     Block::new(0, &mut first[0]),
//!     Block::new(3, &mut recovery[0]),
//!     Block::new(2, &mut rest[1]),
//! ];
//! decode(3, 2, &mut blocks, 16).unwrap();
//! assert_eq!(blocks[1].row, 1);
//! assert_eq!(blocks[1].data, &[2u8; 16][..]);
//! ```
#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
use alloc::vec::Vec;

pub mod cauchy;
mod decoder;
mod encoder;

pub use c256_core::{
    Block, CodecParams, ConfigError, ConfigResult, DecodeError, DecodeResult, C256_VERSION,
    MAX_TOTAL_ROWS,
};
pub use c256_math::{active_engine, GfTables};
pub use cauchy::CauchyMatrix;

/// Encoder/decoder bound to one set of field tables and one configuration.
///
/// Holds no mutable state; copies may be used from any number of threads.
#[derive(Clone, Copy)]
pub struct Codec<'t> {
    tables: &'t GfTables,
    params: CodecParams,
}

impl<'t> Codec<'t> {
    pub fn new(tables: &'t GfTables, params: CodecParams) -> Self {
        Self { tables, params }
    }

    #[inline]
    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    #[inline]
    pub fn tables(&self) -> &'t GfTables {
        self.tables
    }

    #[inline]
    pub fn matrix(&self) -> CauchyMatrix<'t> {
        CauchyMatrix::new(self.tables, &self.params)
    }
}

impl Codec<'static> {
    /// Codec over the process-wide tables, building them if needed.
    pub fn with_default_tables(params: CodecParams) -> Self {
        Self::new(c256_math::initialize(), params)
    }
}

impl core::fmt::Debug for Codec<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Codec").field("params", &self.params).finish()
    }
}

/// Build the process-wide field tables. Safe to call any number of times,
/// from any thread.
pub fn initialize() -> ConfigResult<()> {
    initialize_versioned(C256_VERSION)
}

/// As [`initialize`], but fails if the caller was written against a
/// different interface version.
pub fn initialize_versioned(expected_version: u32) -> ConfigResult<()> {
    if expected_version != C256_VERSION {
        return Err(ConfigError::VersionMismatch { expected: expected_version, actual: C256_VERSION });
    }
    c256_math::initialize();
    Ok(())
}

/// Encode `k` originals into `m` freshly allocated recovery blocks.
pub fn encode(k: usize, m: usize, data: &[&[u8]], block_bytes: usize) -> ConfigResult<Vec<Vec<u8>>> {
    let params = CodecParams::new(k, m, block_bytes)?;
    Codec::with_default_tables(params).encode(data)
}

/// Encode `k` originals into a caller buffer of `m * block_bytes` bytes.
pub fn encode_into(k: usize, m: usize, data: &[&[u8]], recovery: &mut [u8], block_bytes: usize) -> ConfigResult<()> {
    let params = CodecParams::new(k, m, block_bytes)?;
    Codec::with_default_tables(params).encode_into(data, recovery)
}

/// Recover erased originals in place. See [`Codec::decode`].
pub fn decode(k: usize, m: usize, blocks: &mut [Block<'_>], block_bytes: usize) -> DecodeResult<()> {
    let params = CodecParams::new(k, m, block_bytes)?;
    Codec::with_default_tables(params).decode(blocks)
}

#![no_std]
#[cfg(feature = "std")]
extern crate std;

/// Interface version. Callers pass the version they were built against to
/// `initialize_versioned`.
pub const C256_VERSION: u32 = 2;

/// Row indices are single bytes, so original + recovery rows cap at 256.
pub const MAX_TOTAL_ROWS: usize = 256;

/// Wide-word granularity of the XOR kernels. Block sizes that are a multiple
/// of this avoid the byte-wise tail loop.
pub const WORD_BYTES: usize = 8;

/// Validated codec configuration: `k` originals, `m` recovery blocks,
/// `block_bytes` per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecParams {
    original_count: usize,
    recovery_count: usize,
    block_bytes: usize,
}

impl CodecParams {
    pub fn new(original_count: usize, recovery_count: usize, block_bytes: usize) -> ConfigResult<Self> {
        if original_count == 0 { return Err(ConfigError::ZeroOriginals); }
        if recovery_count == 0 { return Err(ConfigError::ZeroRecovery); }
        if block_bytes == 0 { return Err(ConfigError::ZeroBlockBytes); }

        let total = original_count.saturating_add(recovery_count);
        if total > MAX_TOTAL_ROWS {
            return Err(ConfigError::TooManyRows { total });
        }

        Ok(Self { original_count, recovery_count, block_bytes })
    }

    #[inline]
    pub fn original_count(&self) -> usize { self.original_count }

    #[inline]
    pub fn recovery_count(&self) -> usize { self.recovery_count }

    #[inline]
    pub fn block_bytes(&self) -> usize { self.block_bytes }

    #[inline]
    pub fn total_rows(&self) -> usize { self.original_count + self.recovery_count }

    /// Row index carried by recovery block `recovery_index`.
    pub fn recovery_row(&self, recovery_index: usize) -> ConfigResult<u8> {
        if recovery_index >= self.recovery_count {
            return Err(ConfigError::RecoveryIndexOutOfRange {
                index: recovery_index,
                recovery_count: self.recovery_count,
            });
        }
        // total_rows <= 256, so the largest row is 255.
        Ok((self.original_count + recovery_index) as u8)
    }

    #[inline]
    pub fn is_original_row(&self, row: u8) -> bool {
        (row as usize) < self.original_count
    }

    #[inline]
    pub fn is_word_aligned(&self) -> bool {
        self.block_bytes % WORD_BYTES == 0
    }

    /// Shape check for a single caller buffer.
    pub fn check_block(&self, index: usize, len: usize) -> ConfigResult<()> {
        if len != self.block_bytes {
            return Err(ConfigError::BlockSizeMismatch { index, expected: self.block_bytes, actual: len });
        }
        Ok(())
    }
}

/// A caller-owned block buffer tagged with its generator-matrix row.
///
/// Rows `0..k` are originals, rows `k..k+m` are recovery blocks. After a
/// successful decode every block carries an original row.
#[derive(Debug)]
pub struct Block<'a> {
    pub data: &'a mut [u8],
    pub row: u8,
}

impl<'a> Block<'a> {
    #[inline]
    pub fn new(row: u8, data: &'a mut [u8]) -> Self {
        Self { data, row }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Invalid `k` / `m` / size combinations. Always raised before any output
/// byte is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroOriginals,
    ZeroRecovery,
    ZeroBlockBytes,
    TooManyRows { total: usize },
    BlockCountMismatch { expected: usize, actual: usize },
    BlockSizeMismatch { index: usize, expected: usize, actual: usize },
    OutputSizeMismatch { expected: usize, actual: usize },
    RecoveryIndexOutOfRange { index: usize, recovery_count: usize },
    VersionMismatch { expected: u32, actual: u32 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroOriginals => write!(f, "original block count must be at least 1"),
            ConfigError::ZeroRecovery => write!(f, "recovery block count must be at least 1"),
            ConfigError::ZeroBlockBytes => write!(f, "block size must be at least 1 byte"),
            ConfigError::TooManyRows { total } => {
                write!(f, "original + recovery = {} exceeds {} rows", total, MAX_TOTAL_ROWS)
            }
            ConfigError::BlockCountMismatch { expected, actual } => {
                write!(f, "expected {} blocks, got {}", expected, actual)
            }
            ConfigError::BlockSizeMismatch { index, expected, actual } => {
                write!(f, "block {} is {} bytes, expected {}", index, actual, expected)
            }
            ConfigError::OutputSizeMismatch { expected, actual } => {
                write!(f, "output buffer is {} bytes, expected {}", actual, expected)
            }
            ConfigError::RecoveryIndexOutOfRange { index, recovery_count } => {
                write!(f, "recovery index {} out of range (m = {})", index, recovery_count)
            }
            ConfigError::VersionMismatch { expected, actual } => {
                write!(f, "caller expects interface version {}, library is {}", expected, actual)
            }
        }
    }
}

/// The supplied row set cannot be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    Config(ConfigError),
    RowOutOfRange { row: u8, total_rows: usize },
    DuplicateRow { row: u8 },
    Singular { column: usize },
}

impl From<ConfigError> for DecodeError {
    fn from(e: ConfigError) -> Self { DecodeError::Config(e) }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Config(e) => write!(f, "invalid decode configuration: {}", e),
            DecodeError::RowOutOfRange { row, total_rows } => {
                write!(f, "row {} is outside the {} generator rows", row, total_rows)
            }
            DecodeError::DuplicateRow { row } => write!(f, "row {} supplied more than once", row),
            DecodeError::Singular { column } => {
                write!(f, "recovery matrix is singular at column {}", column)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Config(e) => Some(e),
            _ => None,
        }
    }
}

use alloc::vec::Vec;
use c256_core::{ConfigError, ConfigResult, MAX_TOTAL_ROWS};
use c256_math::row_add_scaled;

use crate::Codec;

impl<'t> Codec<'t> {
    /// Produce recovery block `recovery_index` (generator row `k + recovery_index`).
    ///
    /// Rows are independent, so callers may spread them across threads.
    pub fn encode_block(&self, data: &[&[u8]], recovery_index: usize, out: &mut [u8]) -> ConfigResult<()> {
        self.check_originals(data)?;
        let row = self.params.recovery_row(recovery_index)?;
        if out.len() != self.params.block_bytes() {
            return Err(ConfigError::OutputSizeMismatch {
                expected: self.params.block_bytes(),
                actual: out.len(),
            });
        }

        self.write_recovery_row(data, row, out);
        Ok(())
    }

    /// Produce all `m` recovery blocks back to back in `recovery`
    /// (`m * block_bytes` bytes). Nothing is written unless every input checks out.
    pub fn encode_into(&self, data: &[&[u8]], recovery: &mut [u8]) -> ConfigResult<()> {
        self.check_originals(data)?;

        let block_bytes = self.params.block_bytes();
        let expected = self.params.recovery_count() * block_bytes;
        if recovery.len() != expected {
            return Err(ConfigError::OutputSizeMismatch { expected, actual: recovery.len() });
        }

        for (idx, out) in recovery.chunks_exact_mut(block_bytes).enumerate() {
            let row = self.params.recovery_row(idx)?;
            self.write_recovery_row(data, row, out);
        }
        Ok(())
    }

    /// Allocating form of [`Codec::encode_into`]: one buffer per recovery block.
    pub fn encode(&self, data: &[&[u8]]) -> ConfigResult<Vec<Vec<u8>>> {
        self.check_originals(data)?;

        let mut blocks = Vec::with_capacity(self.params.recovery_count());
        for idx in 0..self.params.recovery_count() {
            let row = self.params.recovery_row(idx)?;
            let mut out = alloc::vec![0u8; self.params.block_bytes()];
            self.write_recovery_row(data, row, &mut out);
            blocks.push(out);
        }
        Ok(blocks)
    }

    fn check_originals(&self, data: &[&[u8]]) -> ConfigResult<()> {
        if data.len() != self.params.original_count() {
            return Err(ConfigError::BlockCountMismatch {
                expected: self.params.original_count(),
                actual: data.len(),
            });
        }
        for (i, block) in data.iter().enumerate() {
            self.params.check_block(i, block.len())?;
        }
        Ok(())
    }

    // out = sum over columns of a[row][col] * data[col]
    fn write_recovery_row(&self, data: &[&[u8]], row: u8, out: &mut [u8]) {
        let mut coefficients = [0u8; MAX_TOTAL_ROWS];
        self.matrix().fill_row(row, &mut coefficients);

        out.fill(0);
        for (block, &coefficient) in data.iter().zip(&coefficients) {
            // The first recovery row is all ones and takes the XOR path.
            row_add_scaled(self.tables, out, block, coefficient);
        }
    }
}

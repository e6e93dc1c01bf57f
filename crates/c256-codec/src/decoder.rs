use alloc::vec::Vec;
use c256_core::{Block, ConfigError, DecodeError, DecodeResult, MAX_TOTAL_ROWS};
use c256_math::{row_add_scaled, row_scale, GfMatrix, GfSymbol, GfTables};
use log::trace;

use crate::Codec;

/// A recovery block standing in for an erased original.
struct Substitute<'b> {
    slot: usize,
    row: u8,
    data: &'b mut [u8],
}

impl AsMut<[u8]> for Substitute<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }
}

impl<'t> Codec<'t> {
    /// Recover erased originals in place.
    ///
    /// `blocks` holds exactly `k` entries, one per original slot: rows below
    /// `k` are present originals and are only read; rows at or above `k` are
    /// recovery blocks substituted for whichever originals are missing. On
    /// success each substitute's buffer holds the recovered original and its
    /// `row` is rewritten to that original's index. On error the contents of
    /// substitute buffers are unspecified.
    pub fn decode(&self, blocks: &mut [Block<'_>]) -> DecodeResult<()> {
        let erased = self.check_row_set(blocks)?;
        if erased.is_empty() {
            // Nothing lost: the identity rows are already solved.
            return Ok(());
        }

        trace!(
            "decode: k={} m={} recovering {} erasures",
            self.params.original_count(),
            self.params.recovery_count(),
            erased.len()
        );

        let rewrites = self.recover(blocks, &erased)?;
        for (slot, row) in rewrites {
            blocks[slot].row = row;
        }
        Ok(())
    }

    /// Validates shape and rows, returning the erased original rows in
    /// ascending order.
    fn check_row_set(&self, blocks: &[Block<'_>]) -> DecodeResult<Vec<u8>> {
        let k = self.params.original_count();
        let total_rows = self.params.total_rows();

        if blocks.len() != k {
            return Err(ConfigError::BlockCountMismatch { expected: k, actual: blocks.len() }.into());
        }

        let mut seen = [false; MAX_TOTAL_ROWS];
        for (i, block) in blocks.iter().enumerate() {
            self.params.check_block(i, block.data.len())?;
            let row = block.row as usize;
            if row >= total_rows {
                return Err(DecodeError::RowOutOfRange { row: block.row, total_rows });
            }
            if seen[row] {
                return Err(DecodeError::DuplicateRow { row: block.row });
            }
            seen[row] = true;
        }

        // k distinct rows: the number of substitutes equals the number of gaps.
        Ok((0..k).filter(|&r| !seen[r]).map(|r| r as u8).collect())
    }

    fn recover(&self, blocks: &mut [Block<'_>], erased: &[u8]) -> DecodeResult<Vec<(usize, u8)>> {
        let k = self.params.original_count();
        let matrix = self.matrix();

        let mut originals: Vec<(u8, &[u8])> = Vec::with_capacity(k - erased.len());
        let mut substitutes: Vec<Substitute<'_>> = Vec::with_capacity(erased.len());
        for (slot, block) in blocks.iter_mut().enumerate() {
            let row = block.row;
            if self.params.is_original_row(row) {
                originals.push((row, &*block.data));
            } else {
                substitutes.push(Substitute { slot, row, data: &mut *block.data });
            }
        }

        // 1. Strip the known originals out of every substitute, leaving
        //    combinations of the erased columns only.
        for sub in substitutes.iter_mut() {
            for &(col, data) in &originals {
                row_add_scaled(self.tables, &mut *sub.data, data, matrix.coefficient(sub.row, col));
            }
        }

        // 2. Square system: substitute rows x erased columns.
        let rows: Vec<u8> = substitutes.iter().map(|s| s.row).collect();
        let mut system = matrix.submatrix(&rows, erased);

        // 3. Solve, mirroring every row operation onto the block buffers.
        solve_in_place(self.tables, &mut system, &mut substitutes)?;

        Ok(substitutes.iter().zip(erased).map(|(s, &row)| (s.slot, row)).collect())
    }
}

/// Gauss-Jordan elimination of `system` (n x n), applying the same row
/// operations to `buffers`. On success `buffers[i]` holds unknown `i`.
fn solve_in_place<T: AsMut<[u8]>>(tables: &GfTables, system: &mut GfMatrix, buffers: &mut [T]) -> DecodeResult<()> {
    let n = system.rows;
    debug_assert_eq!(system.cols, n);
    debug_assert_eq!(buffers.len(), n);

    // Forward elimination: any non-zero entry is a usable pivot.
    for col in 0..n {
        let pivot = (col..n)
            .find(|&r| system.data[r * n + col] != GfSymbol::ZERO)
            .ok_or(DecodeError::Singular { column: col })?;
        if pivot != col {
            system.swap_rows(pivot, col);
            buffers.swap(pivot, col);
        }

        let p = system.data[col * n + col].0;
        if p != 1 {
            let p_inv = tables.inv(p);
            system.scale_row(tables, col, GfSymbol(p_inv));
            row_scale(tables, buffers[col].as_mut(), p_inv);
        }

        for r in col + 1..n {
            eliminate(tables, system, buffers, r, col);
        }
    }

    // Back substitution clears the residual upper triangle.
    for col in (1..n).rev() {
        for r in 0..col {
            eliminate(tables, system, buffers, r, col);
        }
    }

    Ok(())
}

// Row r -= a[r][col] * row col, matrix and buffers alike.
#[inline]
fn eliminate<T: AsMut<[u8]>>(tables: &GfTables, system: &mut GfMatrix, buffers: &mut [T], r: usize, col: usize) {
    let factor = system.data[r * system.cols + col];
    if factor == GfSymbol::ZERO {
        return;
    }
    system.add_scaled_row(tables, r, col, factor);
    let (dst, src) = pair_mut(buffers, r, col);
    row_add_scaled(tables, dst.as_mut(), src.as_mut(), factor.0);
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

use c256_core::CodecParams;
use c256_math::{GfMatrix, GfSymbol, GfTables};

/// The `(k + m) x k` systematic generator matrix, evaluated on demand.
///
/// Rows `0..k` are the identity. Recovery row `r`, column `c` is
///
/// ```text
/// a[r][c] = (c + k) / (r + c)
/// ```
///
/// i.e. a Cauchy matrix over the disjoint sets `X = {k..k+m}` and
/// `Y = {0..k}`, with each column scaled so the first recovery row is all
/// ones. Column scaling keeps every square submatrix non-singular, so any
/// `k` distinct rows form an invertible system.
///
/// With a single original every recovery row is all ones, so each recovery
/// block is a plain copy of the original.
#[derive(Clone, Copy)]
pub struct CauchyMatrix<'t> {
    tables: &'t GfTables,
    original_count: usize,
    total_rows: usize,
}

impl<'t> CauchyMatrix<'t> {
    pub fn new(tables: &'t GfTables, params: &CodecParams) -> Self {
        Self {
            tables,
            original_count: params.original_count(),
            total_rows: params.total_rows(),
        }
    }

    #[inline]
    pub fn coefficient(&self, row: u8, col: u8) -> u8 {
        debug_assert!((row as usize) < self.total_rows);
        debug_assert!((col as usize) < self.original_count);

        if (row as usize) < self.original_count {
            return (row == col) as u8;
        }

        if self.original_count == 1 {
            return 1;
        }

        // k <= 255 whenever a recovery row exists.
        let x0 = self.original_count as u8;
        // Both operands are non-zero: c < k <= r.
        self.tables.div(col ^ x0, row ^ col)
    }

    /// Writes the `k` coefficients of `row` into `out[..k]`.
    pub fn fill_row(&self, row: u8, out: &mut [u8]) {
        for (col, slot) in out.iter_mut().take(self.original_count).enumerate() {
            *slot = self.coefficient(row, col as u8);
        }
    }

    /// Square system for the given generator rows (one per output row)
    /// restricted to the given columns.
    pub fn submatrix(&self, rows: &[u8], cols: &[u8]) -> GfMatrix {
        let mut m = GfMatrix::new(rows.len(), cols.len());
        for (i, &row) in rows.iter().enumerate() {
            for (j, &col) in cols.iter().enumerate() {
                m.set(i, j, GfSymbol(self.coefficient(row, col)));
            }
        }
        m
    }
}

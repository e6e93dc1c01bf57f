use crate::{GfSymbol, GfTables};

use alloc::vec::Vec;

/// Small dense row-major matrix over GF(2^8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GfMatrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<GfSymbol>,
}

impl GfMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: alloc::vec![GfSymbol::ZERO; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = GfSymbol::ONE;
        }
        m
    }

    pub fn get(&self, r: usize, c: usize) -> Option<GfSymbol> {
        if r >= self.rows || c >= self.cols { return None; }
        Some(self.data[r * self.cols + c])
    }

    pub fn set(&mut self, r: usize, c: usize, val: GfSymbol) {
        if r < self.rows && c < self.cols {
            self.data[r * self.cols + c] = val;
        }
    }

    pub fn row(&self, r: usize) -> &[GfSymbol] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b || a >= self.rows || b >= self.rows { return; }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    /// Row `r` *= `factor`.
    pub fn scale_row(&mut self, tables: &GfTables, r: usize, factor: GfSymbol) {
        let cols = self.cols;
        for v in &mut self.data[r * cols..(r + 1) * cols] {
            *v = GfSymbol(tables.mul(v.0, factor.0));
        }
    }

    /// Row `dst` += `factor` * row `src`.
    pub fn add_scaled_row(&mut self, tables: &GfTables, dst: usize, src: usize, factor: GfSymbol) {
        if dst == src || factor == GfSymbol::ZERO { return; }
        let cols = self.cols;
        for c in 0..cols {
            let s = self.data[src * cols + c];
            let d = &mut self.data[dst * cols + c];
            *d = *d + GfSymbol(tables.mul(s.0, factor.0));
        }
    }
}

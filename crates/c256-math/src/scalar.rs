use crate::GfTables;

/// Standard Scalar Row Addition.
/// Uses the flat product row for `factor` (one lookup per byte).
#[inline(always)]
pub fn row_add_scaled(tables: &GfTables, dest: &mut [u8], src: &[u8], factor: u8) {
    let row = tables.mul_row(factor);
    for (d, s) in dest.iter_mut().zip(src.iter()) {
        *d ^= row[*s as usize];
    }
}

/// In-place scaling, `buf[i] = buf[i] * factor`.
#[inline(always)]
pub fn row_scale(tables: &GfTables, buf: &mut [u8], factor: u8) {
    let row = tables.mul_row(factor);
    for b in buf.iter_mut() {
        *b = row[*b as usize];
    }
}

/// Raw Rijndael polynomial multiplication (0x11B), independent of any table.
pub fn mul_gf8(a: u8, b: u8) -> u8 {
    let mut p = 0;
    let mut a = a;
    let mut b = b;
    for _ in 0..8 {
        if (b & 1) != 0 { p ^= a; }
        let carry = (a & 0x80) != 0;
        a <<= 1;
        if carry { a ^= 0x1B; }
        b >>= 1;
    }
    p
}

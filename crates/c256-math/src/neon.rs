use core::arch::aarch64::*;

/// Split-nibble table lookup, 16 bytes per step.
/// Returns how many leading bytes were processed.
#[target_feature(enable = "neon")]
pub unsafe fn row_add_scaled_neon(dest: &mut [u8], src: &[u8], low: &[u8; 16], high: &[u8; 16]) -> usize {
    let len = dest.len().min(src.len());
    let mut i = 0;

    let tbl_lo = vld1q_u8(low.as_ptr());
    let tbl_hi = vld1q_u8(high.as_ptr());
    let mask = vdupq_n_u8(0x0F);

    while i + 16 <= len {
        let s_ptr = src.as_ptr().add(i);
        let d_ptr = dest.as_mut_ptr().add(i);

        let v_src = vld1q_u8(s_ptr);
        let v_dest = vld1q_u8(d_ptr);

        let lo = vandq_u8(v_src, mask);
        let hi = vshrq_n_u8(v_src, 4);

        let res_lo = vqtbl1q_u8(tbl_lo, lo);
        let res_hi = vqtbl1q_u8(tbl_hi, hi);

        let product = veorq_u8(res_lo, res_hi);
        vst1q_u8(d_ptr, veorq_u8(v_dest, product));
        i += 16;
    }

    i
}

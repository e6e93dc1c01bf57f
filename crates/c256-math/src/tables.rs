use alloc::vec::Vec;
use log::debug;
use spin::Once;

/// The Rijndael Polynomial: x^8 + x^4 + x^3 + x + 1 (0x11B)
const POLY: u16 = 0x11B;

/// Precomputed GF(2^8) state shared by every encode/decode call.
///
/// Built once, read-only afterwards. Callers either hold their own handle
/// from [`GfTables::generate`] or borrow the process-wide one via
/// [`initialize`].
pub struct GfTables {
    pub exp: [u8; 512], // Doubled to avoid modulo in inner loops
    pub log: [u8; 256],
    pub inv: [u8; 256],
    // mul[f * 256 + x] = x * f
    mul: Vec<u8>,
    // Split-nibble products for the shuffle kernels.
    nibble_lo: Vec<[u8; 16]>,
    nibble_hi: Vec<[u8; 16]>,
}

/// Log/antilog pair using Generator 3 (0x03).
/// 3 generates the multiplicative group of GF(2^8) mod 0x11B.
const fn gen_exp_log() -> ([u8; 512], [u8; 256]) {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x = 1u16; // 3^0
    let mut i = 0;

    while i < 255 {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        log[x as usize] = i as u8;

        // x * 3 = xtime(x) ^ x
        let double_x = x << 1;
        let reduced = if double_x & 0x100 != 0 { double_x ^ POLY } else { double_x };
        x = reduced ^ x;
        i += 1;
    }

    exp[510] = exp[0];
    exp[511] = exp[1];

    (exp, log)
}

impl GfTables {
    /// Builds a fresh, independent set of tables.
    pub fn generate() -> Self {
        let (exp, log) = gen_exp_log();

        let mut inv = [0u8; 256];
        for a in 1..256usize {
            inv[a] = exp[255 - log[a] as usize];
        }

        let mut t = Self {
            exp,
            log,
            inv,
            mul: alloc::vec![0u8; 256 * 256],
            nibble_lo: alloc::vec![[0u8; 16]; 256],
            nibble_hi: alloc::vec![[0u8; 16]; 256],
        };

        // Flat products from the log/antilog pair.
        for f in 0..256usize {
            for x in 0..256usize {
                let product = t.mul_log(x as u8, f as u8);
                t.mul[(f << 8) | x] = product;
            }
        }

        for f in 0..256usize {
            for j in 0..16usize {
                t.nibble_lo[f][j] = t.mul[(f << 8) | j];
                t.nibble_hi[f][j] = t.mul[(f << 8) | (j << 4)];
            }
        }

        t
    }

    #[inline(always)]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        self.mul[((b as usize) << 8) | a as usize]
    }

    /// All 256 products `x * factor`, indexed by `x`.
    #[inline(always)]
    pub fn mul_row(&self, factor: u8) -> &[u8] {
        let start = (factor as usize) << 8;
        &self.mul[start..start + 256]
    }

    /// Multiplicative inverse. Zero has none; asking for it is a caller bug.
    #[inline]
    pub fn inv(&self, a: u8) -> u8 {
        debug_assert!(a != 0, "GF(256) inverse of zero requested");
        self.inv[a as usize]
    }

    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        self.mul(a, self.inv(b))
    }

    /// Log/antilog product. Source of the flat table.
    pub fn mul_log(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 { return 0; }
        let idx = self.log[a as usize] as usize + self.log[b as usize] as usize;
        self.exp[idx]
    }

    #[inline(always)]
    pub fn nibbles(&self, factor: u8) -> (&[u8; 16], &[u8; 16]) {
        (&self.nibble_lo[factor as usize], &self.nibble_hi[factor as usize])
    }
}

static TABLES: Once<GfTables> = Once::new();

/// Builds the process-wide tables on first call. Later calls, including
/// racing ones, wait for the first build and return the same tables.
pub fn initialize() -> &'static GfTables {
    TABLES.call_once(|| {
        let t = GfTables::generate();
        debug!("GF(256) tables ready, engine: {}", crate::active_engine());
        t
    })
}

/// The process-wide tables, built on demand.
#[inline]
pub fn tables() -> &'static GfTables {
    initialize()
}

pub fn is_initialized() -> bool {
    TABLES.is_completed()
}

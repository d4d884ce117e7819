const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;
/// xorshift32 has a fixed point at zero; a seed that folds to zero starts here.
const ZERO_STATE_REPLACEMENT: u32 = 0x9e37_79b9;

/// Polynomial rolling hash `h = h * 31 + c` over UTF-16 code units, wrapping
/// at 32 bits.
pub fn hash32(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(u32::from(c)))
}

/// Deterministic xorshift32 generator seeded from a string.
///
/// The state is an FNV-1a fold of the seed; each draw advances it by one
/// xorshift step. Two generators built from the same seed produce the same
/// sequence on every platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        let folded = seed
            .encode_utf16()
            .fold(FNV_OFFSET, |h, c| (h ^ u32::from(c)).wrapping_mul(FNV_PRIME));
        let state = if folded == 0 {
            ZERO_STATE_REPLACEMENT
        } else {
            folded
        };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in `[lo, hi]`; returns `lo` when the range is empty.
    pub fn next_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = f64::from(hi - lo) + 1.0;
        let offset = (self.next_f64() * span).floor() as u32;
        (lo + offset).min(hi)
    }
}

impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Closure form of [`SeededRng`]: every call yields the next value in `[0, 1)`.
pub fn seeded_rng(seed: &str) -> impl FnMut() -> f64 {
    let mut rng = SeededRng::new(seed);
    move || rng.next_f64()
}

// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It only picks which catalog video a watch session plays.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    /// Seed from a float in `[0, 1)`, e.g. `Math.random()` on the web side.
    pub fn from_unit_f64(x: f64) -> Self {
        let x = if x.is_finite() { x.abs().fract() } else { 0.0 };
        Self::new((x * u64::MAX as f64) as u64)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as u32;
        let v = self.next_u32() % span;
        low + v as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_does_not_stick() {
        let mut p = Prng::new(0);
        assert_ne!(p.next_u64(), 0);
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut p = Prng::new(7);
        for _ in 0..1000 {
            let v = p.gen_range_usize(2, 5);
            assert!((2..5).contains(&v));
        }
        assert_eq!(p.gen_range_usize(3, 3), 3);
    }

    #[test]
    fn unit_seed_handles_nan() {
        let mut p = Prng::from_unit_f64(f64::NAN);
        let _ = p.next_u32();
    }
}

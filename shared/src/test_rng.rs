use rand::RngCore;
use std::collections::VecDeque;

/// Replays fixed unit draws through `Rng::gen::<f64>()`.
///
/// `gen::<f64>()` keeps the top 53 bits of one `next_u64`, so each fraction is
/// encoded back into those bits. Dyadic fractions such as 0.5 come out exact.
pub struct ScriptedRng {
    draws: VecDeque<u64>,
}

impl ScriptedRng {
    pub fn new(fractions: &[f64]) -> Self {
        let scale = (1u64 << 53) as f64;
        let draws = fractions
            .iter()
            .map(|f| {
                assert!((0.0..1.0).contains(f), "draw {} outside [0, 1)", f);
                ((f * scale) as u64) << 11
            })
            .collect();
        Self { draws }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.draws.pop_front().expect("scripted draws exhausted")
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

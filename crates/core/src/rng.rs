use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

/// Seeded source for deck shuffles and shop restocks. Scoring never reads it.
#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn below(&mut self, bound: usize) -> Option<usize> {
        if bound == 0 {
            return None;
        }
        Some((self.next_u64() % bound as u64) as usize)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

use rand::{Rng, RngCore};

/// The only source of randomness the simulation consults.
pub trait RandomSource {
    /// A uniformly chosen index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed sequence of choices, wrapping around when exhausted. Each
/// value is reduced modulo the requested length.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    choices: Vec<usize>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(choices: Vec<usize>) -> Self {
        Self { choices, next: 0 }
    }

    /// Always picks the first option.
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.choices.is_empty() {
            return 0;
        }

        let choice = self.choices[self.next % self.choices.len()];
        self.next += 1;
        choice % len
    }
}

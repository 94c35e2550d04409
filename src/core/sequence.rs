use crate::domain::ports::SequenceSource;
use rand::rngs::ThreadRng;
use rand::Rng;

pub const MAX_SEQUENCE: u16 = 9999;

/// 以 `rand::Rng` 均勻抽取 0..=9999 的序號
#[derive(Debug, Clone)]
pub struct RandomSequence<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomSequence<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomSequence<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSequence<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SequenceSource for RandomSequence<R> {
    fn next_sequence(&mut self) -> u16 {
        self.rng.gen_range(0..=MAX_SEQUENCE)
    }
}

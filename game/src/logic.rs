use engine::GameLogic;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::Direction;
use crate::session::Session;

pub type SeededSession = Session<ChaCha8Rng>;

/// Headless rules: one `Direction` per step, deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct TwentyFortyEight {
    seed: u64,
}

impl TwentyFortyEight {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// A started session seeded like this game's initial state.
    pub fn session(&self) -> SeededSession {
        let mut session = Session::new(ChaCha8Rng::seed_from_u64(self.seed));
        session.start();
        session
    }
}

impl GameLogic for TwentyFortyEight {
    type State = SeededSession;
    type Input = Direction;

    fn initial_state(&self) -> Self::State {
        self.session()
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        next.apply(input);
        next
    }
}

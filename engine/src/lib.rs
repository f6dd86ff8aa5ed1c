pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod regression;
pub mod surface;
pub mod ui;

/// Pure game rules: a state plus a transition function over inputs.
///
/// Implementations must be deterministic for a given initial state so headless runs can be
/// replayed and compared.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` without a window: one input per frame.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn into_state(self) -> G::State {
        self.state
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        for input in inputs {
            self.step(input);
        }
        self.frame
    }

    /// Steps until `done` reports true for the current state or `max_frames` inputs were fed.
    pub fn run_until<I, F>(&mut self, inputs: I, max_frames: usize, mut done: F) -> usize
    where
        I: IntoIterator<Item = G::Input>,
        F: FnMut(&G::State) -> bool,
    {
        for input in inputs {
            if self.frame >= max_frames || done(&self.state) {
                break;
            }
            self.step(input);
        }
        self.frame
    }
}

//! The simulator boundary: a side receives its [`BattleView`] and submits a [`Choice`].

use crate::battle::{BattleView, Choice};
use crate::fallback;
use crate::state::summarize;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub trait Player {
    fn name(&self) -> &str;

    /// Called once per request. The returned choice should be one of `view.legal_choices()`;
    /// the driver substitutes the fallback action otherwise.
    fn choose(&mut self, view: &BattleView) -> Choice;
}

/// Uniform over every legal order, the baseline the agent is measured against.
pub struct RandomPlayer {
    name: String,
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, view: &BattleView) -> Choice {
        let choices = view.legal_choices();
        *choices.choose(&mut self.rng).unwrap_or(&Choice::Move(0))
    }
}

/// Always plays the highest-expected-damage option.
pub struct MaxDamagePlayer {
    name: String,
}

impl MaxDamagePlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for MaxDamagePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, view: &BattleView) -> Choice {
        fallback::select(&summarize(view)).to_choice()
    }
}

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::event;

use crate::core::{
    Board, CardBitSet, CardIter, DefaultEvaluator, Evaluator, Hand, HoldemEquityError, Rank,
};
use crate::holdem::range::{HandGroup, Range};

/// The default number of simulated trials.
pub const DEFAULT_SAMPLE_SIZE: usize = 25_000;

/// Exhaustive enumeration is used instead of sampling when the
/// number of board run outs stays at or below this.
const MAX_ENUMERATED_BOARDS: u64 = 25_000;

/// How many times one range draw is retried when the sampled
/// hand collides with cards already dealt in the trial.
const MAX_SAMPLE_ATTEMPTS: usize = 100;

/// Trials per work unit when the `parallel` feature splits a
/// calculation across threads.
#[cfg(feature = "parallel")]
const TRIALS_PER_CHUNK: usize = 1024;

/// A participant's share of outcomes over the trial population.
/// The three fractions always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equity {
    win: f64,
    tie: f64,
    lose: f64,
}

impl Equity {
    /// Fraction of trials this participant won outright.
    pub fn win(&self) -> f64 {
        self.win
    }

    /// Fraction of trials this participant split with at least
    /// one other participant holding an identical hand value.
    pub fn tie(&self) -> f64 {
        self.tie
    }

    /// Fraction of trials this participant lost.
    pub fn lose(&self) -> f64 {
        self.lose
    }
}

/// Raw win/tie/lose counts while trials run. Tallies combine by
/// plain summation so partial results from any trial partition
/// fold together in any order.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    win: f64,
    tie: f64,
    lose: f64,
}

impl Tally {
    #[cfg(feature = "parallel")]
    fn merge(self, other: Tally) -> Tally {
        Tally {
            win: self.win + other.win,
            tie: self.tie + other.tie,
            lose: self.lose + other.lose,
        }
    }

    fn normalized(&self, trials: f64) -> Equity {
        Equity {
            win: self.win / trials,
            tie: self.tie / trials,
            lose: self.lose / trials,
        }
    }
}

#[cfg(feature = "parallel")]
fn merge_tallies(
    left: Vec<Tally>,
    right: Vec<Tally>,
) -> Result<Vec<Tally>, HoldemEquityError> {
    Ok(left
        .into_iter()
        .zip(right)
        .map(|(a, b)| a.merge(b))
        .collect())
}

/// One seat in a calculation: either exact hole cards or a
/// weighted range standing in for an unknown hand.
#[derive(Debug, Clone, Copy)]
enum Participant<'a> {
    Hole(Hand),
    Ranged(&'a Range),
}

/// Calculates win/tie/loss equity for two or more hands or
/// ranges, optionally against a partially dealt board.
///
/// Fixed hands on an incomplete board are enumerated exhaustively
/// when the number of run outs is small enough; ranges and large
/// enumerations fall back to seeded monte carlo sampling. Either
/// way the same inputs always produce the same output.
///
/// ```
/// use holdem_equity::core::Hand;
/// use holdem_equity::holdem::EquityCalculationBuilder;
///
/// let aces = Hand::new_from_str("AcAh").unwrap();
/// let kings = Hand::new_from_str("KcKh").unwrap();
///
/// let calc = EquityCalculationBuilder::new().use_sample_size(10_000);
/// let equities = calc.calculate(&[aces, kings]).unwrap();
/// assert!(equities[0].win() > equities[1].win());
/// ```
#[derive(Debug, Clone)]
pub struct EquityCalculationBuilder<E = DefaultEvaluator> {
    board: Board,
    sample_size: usize,
    evaluator: E,
}

impl EquityCalculationBuilder<DefaultEvaluator> {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            evaluator: DefaultEvaluator,
        }
    }
}

impl Default for EquityCalculationBuilder<DefaultEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator + Sync> EquityCalculationBuilder<E> {
    /// Hold this board fixed while completing it each trial.
    pub fn use_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Set the number of simulated trials for sampled
    /// calculations.
    pub fn use_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Swap in a different hand strength evaluator.
    pub fn use_evaluator<E2: Evaluator + Sync>(
        self,
        evaluator: E2,
    ) -> EquityCalculationBuilder<E2> {
        EquityCalculationBuilder {
            board: self.board,
            sample_size: self.sample_size,
            evaluator,
        }
    }

    /// Calculate equity for two or more exact hole card hands.
    /// Results line up with the input order.
    pub fn calculate(&self, hands: &[Hand]) -> Result<Vec<Equity>, HoldemEquityError> {
        let participants: Vec<Participant> =
            hands.iter().map(|h| Participant::Hole(*h)).collect();
        self.run(&participants)
    }

    /// Calculate equity for two or more weighted ranges.
    /// Results line up with the input order.
    pub fn calculate_ranges(
        &self,
        ranges: &[&Range],
    ) -> Result<Vec<Equity>, HoldemEquityError> {
        let participants: Vec<Participant> =
            ranges.iter().copied().map(Participant::Ranged).collect();
        self.run(&participants)
    }

    fn run(&self, participants: &[Participant]) -> Result<Vec<Equity>, HoldemEquityError> {
        if participants.len() < 2 {
            return Err(HoldemEquityError::NotEnoughParticipants);
        }

        // Every fixed card may be dealt only once.
        let mut taken = self.board.bits();
        let mut all_fixed = true;
        for participant in participants {
            match participant {
                Participant::Hole(hand) => {
                    if hand.count() != 2 {
                        return Err(HoldemEquityError::InvalidHandSize(hand.count()));
                    }
                    for card in hand.cards() {
                        if taken.contains(card) {
                            return Err(HoldemEquityError::CardCollision(card));
                        }
                        taken.insert(card);
                    }
                }
                Participant::Ranged(range) => {
                    if range.is_empty() {
                        return Err(HoldemEquityError::EmptyRange);
                    }
                    all_fixed = false;
                }
            }
        }

        let needed = 5 - self.board.len();
        if all_fixed {
            let undealt = !taken;
            let run_outs = binomial(undealt.count() as u64, needed as u64);
            if run_outs <= MAX_ENUMERATED_BOARDS {
                event!(
                    tracing::Level::DEBUG,
                    run_outs,
                    "enumerating all board run outs"
                );
                return self.enumerate(participants, undealt, needed);
            }
        }

        event!(
            tracing::Level::DEBUG,
            trials = self.sample_size,
            "sampling board run outs"
        );
        let seed = self.seed(participants);
        let tallies = self.run_monte_carlo(participants, seed)?;
        let trials = self.sample_size as f64;
        Ok(tallies.iter().map(|t| t.normalized(trials)).collect())
    }

    /// Walk every possible run out once. Exact, and the
    /// resulting fractions sum to one with no sampling noise.
    fn enumerate(
        &self,
        participants: &[Participant],
        undealt: CardBitSet,
        needed: usize,
    ) -> Result<Vec<Equity>, HoldemEquityError> {
        let mut tallies = vec![Tally::default(); participants.len()];
        let mut trials = 0u64;
        for run_out in CardIter::new(undealt.into_iter().collect(), needed) {
            let full_board = self.board.with_run_out(&run_out);
            self.score_trial(participants, None, &full_board, &mut tallies)?;
            trials += 1;
        }
        Ok(tallies
            .iter()
            .map(|t| t.normalized(trials as f64))
            .collect())
    }

    #[cfg(not(feature = "parallel"))]
    fn run_monte_carlo(
        &self,
        participants: &[Participant],
        seed: u64,
    ) -> Result<Vec<Tally>, HoldemEquityError> {
        self.sample_chunk(participants, seed, self.sample_size)
    }

    /// Trials split into fixed size chunks, each chunk seeded
    /// from the base seed plus its index and summed afterwards,
    /// so the result does not depend on scheduling order.
    #[cfg(feature = "parallel")]
    fn run_monte_carlo(
        &self,
        participants: &[Participant],
        seed: u64,
    ) -> Result<Vec<Tally>, HoldemEquityError> {
        let full_chunks = self.sample_size / TRIALS_PER_CHUNK;
        let remainder = self.sample_size % TRIALS_PER_CHUNK;
        let mut chunks: Vec<(u64, usize)> = (0..full_chunks)
            .map(|i| (seed.wrapping_add(i as u64), TRIALS_PER_CHUNK))
            .collect();
        if remainder > 0 {
            chunks.push((seed.wrapping_add(full_chunks as u64), remainder));
        }
        chunks
            .into_par_iter()
            .map(|(chunk_seed, trials)| self.sample_chunk(participants, chunk_seed, trials))
            .try_reduce(
                || vec![Tally::default(); participants.len()],
                merge_tallies,
            )
    }

    fn sample_chunk(
        &self,
        participants: &[Participant],
        seed: u64,
        trials: usize,
    ) -> Result<Vec<Tally>, HoldemEquityError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tallies = vec![Tally::default(); participants.len()];
        for _ in 0..trials {
            self.sample_trial(participants, &mut rng, &mut tallies)?;
        }
        Ok(tallies)
    }

    /// One sampled trial: draw range hands, run the board out,
    /// score. A colliding range draw is retried, never surfaced,
    /// until repeated failures prove the range unsatisfiable.
    fn sample_trial<R: Rng>(
        &self,
        participants: &[Participant],
        rng: &mut R,
        tallies: &mut [Tally],
    ) -> Result<(), HoldemEquityError> {
        let mut taken = self.board.bits();
        for participant in participants {
            if let Participant::Hole(hand) = participant {
                taken |= CardBitSet::from(*hand);
            }
        }

        let mut sampled: Vec<Option<Hand>> = Vec::with_capacity(participants.len());
        for participant in participants {
            match participant {
                Participant::Hole(_) => sampled.push(None),
                Participant::Ranged(range) => {
                    let mut drawn = None;
                    for _ in 0..MAX_SAMPLE_ATTEMPTS {
                        let hand = range.sample(rng)?;
                        if hand.count() == 2 && hand.is_disjoint(taken) {
                            drawn = Some(hand);
                            break;
                        }
                    }
                    let hand = drawn.ok_or(HoldemEquityError::UnsampleableRange)?;
                    taken |= CardBitSet::from(hand);
                    sampled.push(Some(hand));
                }
            }
        }

        let needed = 5 - self.board.len();
        let mut undealt = !taken;
        let mut run_out = Vec::with_capacity(needed);
        for _ in 0..needed {
            // The deck can always cover the run out: at most ten
            // participants fit and they leave over five cards.
            let card = undealt
                .sample_one(rng)
                .ok_or(HoldemEquityError::UnsampleableRange)?;
            undealt.remove(card);
            run_out.push(card);
        }

        let full_board = self.board.with_run_out(&run_out);
        self.score_trial(participants, Some(&sampled), &full_board, tallies)
    }

    /// Credit one completed trial. The best hand value wins
    /// outright; every holder of a shared best value is scored
    /// as a tie instead.
    fn score_trial(
        &self,
        participants: &[Participant],
        sampled: Option<&[Option<Hand>]>,
        board: &Board,
        tallies: &mut [Tally],
    ) -> Result<(), HoldemEquityError> {
        let mut ranks: Vec<Rank> = Vec::with_capacity(participants.len());
        for (idx, participant) in participants.iter().enumerate() {
            let hand = match (participant, sampled) {
                (Participant::Hole(hand), _) => *hand,
                (Participant::Ranged(_), Some(draws)) => {
                    draws[idx].ok_or(HoldemEquityError::UnsampleableRange)?
                }
                (Participant::Ranged(_), None) => {
                    return Err(HoldemEquityError::UnsampleableRange);
                }
            };
            ranks.push(self.evaluator.value(&hand, board)?);
        }

        let best = ranks
            .iter()
            .max()
            .copied()
            .ok_or(HoldemEquityError::NotEnoughParticipants)?;
        let winners = ranks.iter().filter(|r| **r == best).count();
        for (tally, rank) in tallies.iter_mut().zip(&ranks) {
            if *rank == best {
                if winners == 1 {
                    tally.win += 1.0;
                } else {
                    tally.tie += 1.0;
                }
            } else {
                tally.lose += 1.0;
            }
        }
        Ok(())
    }

    /// Stable seed over the whole input configuration, so
    /// repeating a calculation reproduces its output exactly.
    fn seed(&self, participants: &[Participant]) -> u64 {
        let mut hasher = DefaultHasher::new();
        for participant in participants {
            match participant {
                Participant::Hole(hand) => {
                    0u8.hash(&mut hasher);
                    hand.hash(&mut hasher);
                }
                Participant::Ranged(range) => {
                    1u8.hash(&mut hasher);
                    range.hash(&mut hasher);
                }
            }
        }
        self.board.cards().hash(&mut hasher);
        hasher.finish()
    }
}

/// n choose k, exact for the small k used for board run outs.
fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

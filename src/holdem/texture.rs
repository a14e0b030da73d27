use std::collections::HashMap;

use tracing::event;

use crate::core::{
    Board, DefaultEvaluator, Evaluator, HoldemEquityError, RankCategory, Street,
};
use crate::holdem::equity::DEFAULT_SAMPLE_SIZE;
use crate::holdem::range::{HandGroup, Range};

/// Analyzes how a range connects with a fixed board: for each
/// hand value category, the weight of range hands that make it.
///
/// The walk over the range is exhaustive, not sampled. Hands
/// colliding with the board are skipped, so their weight is
/// dropped rather than redistributed.
///
/// ```
/// use holdem_equity::core::{Board, RankCategory};
/// use holdem_equity::holdem::{Range, StartingHand, TextureAnalysisBuilder};
///
/// let mut range = Range::new();
/// range
///     .define_group(&StartingHand::new_from_str("AA").unwrap())
///     .unwrap();
///
/// let analysis = TextureAnalysisBuilder::new()
///     .use_board(Board::new_from_str("Ah7h6d").unwrap());
/// let frequencies = analysis.frequencies(&range).unwrap();
/// assert!(frequencies[&RankCategory::ThreeOfAKind] > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TextureAnalysisBuilder<E = DefaultEvaluator> {
    board: Board,
    sample_size: usize,
    evaluator: E,
}

impl TextureAnalysisBuilder<DefaultEvaluator> {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            evaluator: DefaultEvaluator,
        }
    }
}

impl Default for TextureAnalysisBuilder<DefaultEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator> TextureAnalysisBuilder<E> {
    /// Analyze against this board. It must be at least a flop.
    pub fn use_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Set the sample size the accumulated weights are divided
    /// by. Accumulated weight is divided by this constant, not
    /// by the number of hands actually evaluated, keeping output
    /// comparable across ranges of different sizes.
    pub fn use_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Swap in a different hand strength evaluator.
    pub fn use_evaluator<E2: Evaluator>(self, evaluator: E2) -> TextureAnalysisBuilder<E2> {
        TextureAnalysisBuilder {
            board: self.board,
            sample_size: self.sample_size,
            evaluator,
        }
    }

    /// Compute the per category weight the range lands on the
    /// configured board. Every category appears in the map, at
    /// zero when the range never makes it.
    pub fn frequencies(
        &self,
        range: &Range,
    ) -> Result<HashMap<RankCategory, f64>, HoldemEquityError> {
        if self.board.street() == Street::Preflop {
            return Err(HoldemEquityError::BoardNotSet);
        }

        let board_bits = self.board.bits();
        let hands = range.all_hands();
        if !hands.iter().any(|h| h.is_disjoint(board_bits)) {
            return Err(HoldemEquityError::NoViableHands);
        }

        event!(
            tracing::Level::DEBUG,
            hands = hands.len(),
            board = %self.board,
            "analyzing board texture"
        );

        let mut results: HashMap<RankCategory, f64> = RankCategory::ALL
            .iter()
            .map(|category| (*category, 0.0))
            .collect();
        for hand in hands {
            if !hand.is_disjoint(board_bits) {
                continue;
            }
            let rank = self.evaluator.value(&hand, &self.board)?;
            if let Some(total) = results.get_mut(&rank.category()) {
                *total += range.weight(&hand);
            }
        }

        for total in results.values_mut() {
            *total /= self.sample_size as f64;
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::Hand;
    use crate::holdem::StartingHand;

    fn pocket_pairs() -> Range {
        let mut range = Range::new();
        for pattern in ["AA", "KK", "QQ"] {
            range
                .define_group(&StartingHand::new_from_str(pattern).unwrap())
                .unwrap();
        }
        range
    }

    #[test]
    fn test_preflop_board_rejected() {
        let analysis = TextureAnalysisBuilder::new();
        assert_eq!(
            Err(HoldemEquityError::BoardNotSet),
            analysis.frequencies(&pocket_pairs())
        );
    }

    #[test]
    fn test_no_viable_hands() {
        let mut range = Range::new();
        range
            .define_hand(Hand::new_from_str("AcAh").unwrap())
            .unwrap();
        let analysis = TextureAnalysisBuilder::new()
            .use_board(Board::new_from_str("Ac7h6d").unwrap());
        assert_eq!(
            Err(HoldemEquityError::NoViableHands),
            analysis.frequencies(&range)
        );
    }

    #[test]
    fn test_every_category_present() {
        let analysis = TextureAnalysisBuilder::new()
            .use_board(Board::new_from_str("Ks7h6d").unwrap());
        let frequencies = analysis.frequencies(&pocket_pairs()).unwrap();
        assert_eq!(RankCategory::ALL.len(), frequencies.len());
    }

    #[test]
    fn test_pairs_on_dry_board() {
        // On K 7 6 rainbow, kings make a set and the other pairs
        // stay pairs. Each pattern has six combos, kings lose
        // three to the board king.
        let analysis = TextureAnalysisBuilder::new()
            .use_board(Board::new_from_str("Ks7h6d").unwrap())
            .use_sample_size(15);
        let frequencies = analysis.frequencies(&pocket_pairs()).unwrap();

        assert_relative_eq!(3.0 / 15.0, frequencies[&RankCategory::ThreeOfAKind]);
        assert_relative_eq!(12.0 / 15.0, frequencies[&RankCategory::OnePair]);
        assert_relative_eq!(0.0, frequencies[&RankCategory::Flush]);
    }

    #[test]
    fn test_weights_scale_frequencies() {
        let mut range = Range::new();
        range
            .define_hand_weighted(Hand::new_from_str("AcAh").unwrap(), 0.5)
            .unwrap();
        range
            .define_hand(Hand::new_from_str("KcQc").unwrap())
            .unwrap();

        let analysis = TextureAnalysisBuilder::new()
            .use_board(Board::new_from_str("2s7h6d").unwrap())
            .use_sample_size(1);
        let frequencies = analysis.frequencies(&range).unwrap();

        assert_relative_eq!(0.5, frequencies[&RankCategory::OnePair]);
        assert_relative_eq!(1.0, frequencies[&RankCategory::HighCard]);
    }
}

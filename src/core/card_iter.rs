use crate::core::card::Card;

/// Iterator over every `num_cards` sized combination of
/// a set of possible cards.
///
/// This drives finding the best five card hand inside a
/// larger hand, and exhaustively enumerating the ways an
/// incomplete board can run out.
#[derive(Debug)]
pub struct CardIter {
    /// All the possible cards that combinations are drawn from.
    possible_cards: Vec<Card>,
    /// Current combination, as indexes into `possible_cards`.
    idx: Vec<usize>,
    /// Size of card sets requested.
    num_cards: usize,
    started: bool,
}

impl CardIter {
    pub fn new(possible_cards: Vec<Card>, num_cards: usize) -> Self {
        let idx: Vec<usize> = (0..num_cards).collect();
        Self {
            possible_cards,
            idx,
            num_cards,
            started: false,
        }
    }

    fn current(&self) -> Vec<Card> {
        self.idx.iter().map(|i| self.possible_cards[*i]).collect()
    }
}

impl Iterator for CardIter {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.num_cards > self.possible_cards.len() {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        // Advance the right-most index that can still move,
        // then restack everything after it.
        let n = self.possible_cards.len();
        let k = self.num_cards;
        let mut level = k;
        while level > 0 {
            level -= 1;
            if self.idx[level] < n - k + level {
                self.idx[level] += 1;
                for next in level + 1..k {
                    self.idx[next] = self.idx[next - 1] + 1;
                }
                return Some(self.current());
            }
        }
        None
    }
}

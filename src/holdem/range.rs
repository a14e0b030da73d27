use std::hash::{Hash, Hasher};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::core::{Hand, HoldemEquityError};

/// How many bucket draws a weighted sample will try before
/// giving up. Only matters when a range has no constant hands
/// and the weighted bucket weights leave fall-through mass.
const MAX_BUCKET_DRAWS: usize = 1000;

/// The capability set shared by every kind of hand collection:
/// a plain pattern like `StartingHand` and the weighted `Range`.
/// The operation set is fixed, so this stays a closed seam
/// rather than an open hierarchy.
pub trait HandGroup {
    /// Every concrete hand in the group, order irrelevant.
    fn all_hands(&self) -> Vec<Hand>;

    /// Deterministic membership.
    fn contains_hand(&self, hand: &Hand) -> bool {
        self.all_hands().contains(hand)
    }

    /// Draw one hand according to the group's distribution.
    fn sample<R: Rng>(&self, rng: &mut R) -> Result<Hand, HoldemEquityError>;

    /// Probabilistic membership: a weighted hand passes this
    /// test with its bucket weight as the success probability.
    /// This is a sampling-time construct and not the same as
    /// `contains_hand`.
    fn matches<R: Rng>(&self, hand: &Hand, rng: &mut R) -> bool;
}

/// A hand group that can represent a range of hands where
/// hands appear at different frequencies. Useful for running
/// equity calculations against weighted opponent ranges.
///
/// A range is built up with `define` calls and then treated as
/// read-only while a calculation runs.
///
/// ```
/// use holdem_equity::holdem::{HandGroup, Range, StartingHand};
///
/// let mut range = Range::new();
/// range.define_group(&StartingHand::new_from_str("AA").unwrap()).unwrap();
/// range
///     .define_group_weighted(&StartingHand::new_from_str("KK").unwrap(), 0.5)
///     .unwrap();
///
/// assert_eq!(12, range.all_hands().len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Range {
    /// Hands that always appear within this range, weight 1.0.
    constant: Vec<Hand>,
    /// Buckets of hands sharing one exact weight, in the order
    /// the weights were first defined. A list of pairs instead
    /// of a float-keyed map keeps float equality out of lookups.
    weighted: Vec<(f64, Vec<Hand>)>,
}

impl Range {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hand that always appears in this range.
    ///
    /// Fails when the hand is already present, constant or
    /// weighted.
    pub fn define_hand(&mut self, hand: Hand) -> Result<(), HoldemEquityError> {
        if self.contains_hand(&hand) {
            return Err(HoldemEquityError::DuplicateDefinition);
        }
        self.constant.push(hand);
        Ok(())
    }

    /// Add every hand of a group to the constant set.
    ///
    /// All-or-nothing: if some but not all of the group's hands
    /// are already present this fails without changing anything.
    /// If every hand is already present this is a no-op.
    pub fn define_group<G: HandGroup>(&mut self, group: &G) -> Result<(), HoldemEquityError> {
        let hands = group.all_hands();
        let present = hands.iter().filter(|h| self.contains_hand(h)).count();
        if present == hands.len() {
            return Ok(());
        }
        if present > 0 {
            return Err(HoldemEquityError::PartialOverlap);
        }
        self.constant.extend(hands);
        Ok(())
    }

    /// Put a hand in the bucket for `weight`, moving it out of
    /// the constant set or any other bucket first. The last
    /// definition wins.
    pub fn define_hand_weighted(
        &mut self,
        hand: Hand,
        weight: f64,
    ) -> Result<(), HoldemEquityError> {
        if weight <= 0.0 || weight > 1.0 {
            return Err(HoldemEquityError::WeightOutOfBounds(weight));
        }
        self.forget(&hand);
        match self.weighted.iter_mut().find(|(w, _)| *w == weight) {
            Some((_, hands)) => hands.push(hand),
            None => self.weighted.push((weight, vec![hand])),
        }
        Ok(())
    }

    /// Apply `define_hand_weighted` to every hand of a group,
    /// with the same all-or-nothing overlap check as
    /// `define_group`.
    pub fn define_group_weighted<G: HandGroup>(
        &mut self,
        group: &G,
        weight: f64,
    ) -> Result<(), HoldemEquityError> {
        if weight <= 0.0 || weight > 1.0 {
            return Err(HoldemEquityError::WeightOutOfBounds(weight));
        }
        let hands = group.all_hands();
        let present = hands.iter().filter(|h| self.contains_hand(h)).count();
        if present > 0 && present < hands.len() {
            return Err(HoldemEquityError::PartialOverlap);
        }
        for hand in hands {
            self.define_hand_weighted(hand, weight)?;
        }
        Ok(())
    }

    /// The weight a hand appears in this range with: its bucket
    /// weight, 1.0 for constant hands, 0 when absent.
    pub fn weight(&self, hand: &Hand) -> f64 {
        for (w, hands) in &self.weighted {
            if hands.contains(hand) {
                return *w;
            }
        }
        if self.constant.contains(hand) { 1.0 } else { 0.0 }
    }

    /// Is there nothing defined in the range at all?
    pub fn is_empty(&self) -> bool {
        self.constant.is_empty() && self.weighted.iter().all(|(_, hands)| hands.is_empty())
    }

    /// Drop a hand from the constant set and every bucket.
    fn forget(&mut self, hand: &Hand) {
        self.constant.retain(|h| h != hand);
        for (_, hands) in self.weighted.iter_mut() {
            hands.retain(|h| h != hand);
        }
        // Buckets left empty stop competing for selection.
        self.weighted.retain(|(_, hands)| !hands.is_empty());
    }

    /// One draw of the two-stage selection: pick a weight
    /// bucket, falling through to the constant pool.
    fn draw_pool<R: Rng>(&self, rng: &mut R) -> Option<&Vec<Hand>> {
        let p: f64 = rng.random();
        let mut cumulative = 0.0;
        for (w, hands) in &self.weighted {
            cumulative += w;
            if p <= cumulative {
                return Some(hands);
            }
        }
        if self.constant.is_empty() {
            None
        } else {
            Some(&self.constant)
        }
    }
}

impl HandGroup for Range {
    fn all_hands(&self) -> Vec<Hand> {
        let mut hands = self.constant.clone();
        for (_, bucket) in &self.weighted {
            hands.extend_from_slice(bucket);
        }
        hands
    }

    fn contains_hand(&self, hand: &Hand) -> bool {
        self.constant.contains(hand)
            || self.weighted.iter().any(|(_, hands)| hands.contains(hand))
    }

    /// Two-stage weighted draw. First a weight bucket is chosen
    /// with probability equal to its own weight value, with the
    /// constant pool taking whatever probability mass is left.
    /// Then a hand is drawn uniformly within the chosen pool.
    ///
    /// Note that each distinct *weight value* competes at the
    /// top level, not each hand: ten hands sharing weight 0.3
    /// are collectively as likely to be the source pool as one
    /// hand alone at 0.3. That grouping behavior is intentional
    /// and kept as defined.
    fn sample<R: Rng>(&self, rng: &mut R) -> Result<Hand, HoldemEquityError> {
        if self.is_empty() {
            return Err(HoldemEquityError::EmptyRange);
        }
        for _ in 0..MAX_BUCKET_DRAWS {
            if let Some(pool) = self.draw_pool(rng) {
                return pool
                    .choose(rng)
                    .copied()
                    .ok_or(HoldemEquityError::EmptyRange);
            }
        }
        // No constant pool and the weighted buckets never won
        // the draw.
        Err(HoldemEquityError::EmptyRange)
    }

    fn matches<R: Rng>(&self, hand: &Hand, rng: &mut R) -> bool {
        if self.constant.contains(hand) {
            return true;
        }
        for (w, hands) in &self.weighted {
            if hands.contains(hand) {
                return rng.random::<f64>() <= *w;
            }
        }
        false
    }
}

/// Ranges hash by their exact contents, weights included, so a
/// calculation seeded from its inputs reproduces bit-identical
/// results for identical ranges.
impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.constant.hash(state);
        for (w, hands) in &self.weighted {
            w.to_bits().hash(state);
            hands.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::holdem::StartingHand;

    fn hand(s: &str) -> Hand {
        Hand::new_from_str(s).unwrap()
    }

    #[test]
    fn test_define_duplicate() {
        let mut range = Range::new();
        range.define_hand(hand("AcAh")).unwrap();
        assert_eq!(
            Err(HoldemEquityError::DuplicateDefinition),
            range.define_hand(hand("AhAc"))
        );
    }

    #[test]
    fn test_define_group_partial_overlap() {
        let mut range = Range::new();
        range.define_hand(hand("AcAh")).unwrap();
        let aces = StartingHand::new_from_str("AA").unwrap();
        assert_eq!(
            Err(HoldemEquityError::PartialOverlap),
            range.define_group(&aces)
        );
        // Nothing was half-added.
        assert_eq!(1, range.all_hands().len());
    }

    #[test]
    fn test_define_group_twice_is_noop() {
        let mut range = Range::new();
        let aces = StartingHand::new_from_str("AA").unwrap();
        range.define_group(&aces).unwrap();
        range.define_group(&aces).unwrap();
        assert_eq!(6, range.all_hands().len());
    }

    #[test]
    fn test_weight_bounds() {
        let mut range = Range::new();
        assert_eq!(
            Err(HoldemEquityError::WeightOutOfBounds(0.0)),
            range.define_hand_weighted(hand("AcAh"), 0.0)
        );
        assert_eq!(
            Err(HoldemEquityError::WeightOutOfBounds(1.5)),
            range.define_hand_weighted(hand("AcAh"), 1.5)
        );
        range.define_hand_weighted(hand("AcAh"), 1.0).unwrap();
    }

    #[test]
    fn test_weight_lookup() {
        let mut range = Range::new();
        range.define_hand(hand("AcAh")).unwrap();
        range.define_hand_weighted(hand("KcKh"), 0.25).unwrap();

        assert_eq!(1.0, range.weight(&hand("AcAh")));
        assert_eq!(0.25, range.weight(&hand("KcKh")));
        assert_eq!(0.0, range.weight(&hand("QcQh")));
    }

    #[test]
    fn test_redefine_moves_bucket() {
        // Redefining a hand at a new weight moves it, leaving
        // no duplicate membership behind.
        let mut range = Range::new();
        range.define_hand_weighted(hand("KcKh"), 0.25).unwrap();
        range.define_hand_weighted(hand("KcKh"), 0.75).unwrap();

        assert_eq!(0.75, range.weight(&hand("KcKh")));
        assert_eq!(1, range.all_hands().len());
    }

    #[test]
    fn test_redefine_from_constant() {
        let mut range = Range::new();
        range.define_hand(hand("KcKh")).unwrap();
        range.define_hand_weighted(hand("KcKh"), 0.5).unwrap();

        assert_eq!(0.5, range.weight(&hand("KcKh")));
        assert_eq!(1, range.all_hands().len());
    }

    #[test]
    fn test_sample_empty() {
        let range = Range::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            Err(HoldemEquityError::EmptyRange),
            range.sample(&mut rng)
        );
    }

    #[test]
    fn test_sample_constant_only() {
        let mut range = Range::new();
        range.define_hand(hand("AcAh")).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(hand("AcAh"), range.sample(&mut rng).unwrap());
    }

    #[test]
    fn test_sample_full_weight_bucket_always_wins() {
        // A bucket at weight 1.0 absorbs the whole draw, so the
        // constant hand never comes out.
        let mut range = Range::new();
        range.define_hand(hand("AcAh")).unwrap();
        range.define_hand_weighted(hand("KcKh"), 1.0).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(hand("KcKh"), range.sample(&mut rng).unwrap());
        }
    }

    #[test]
    fn test_sample_bucket_weight_is_per_value_not_per_hand() {
        // Six kings at 0.5 share one bucket; the bucket as a
        // whole is selected about half the time regardless of
        // how many hands it holds.
        let mut range = Range::new();
        range.define_hand(hand("AcAh")).unwrap();
        let kings = StartingHand::new_from_str("KK").unwrap();
        range.define_group_weighted(&kings, 0.5).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let kings_drawn = (0..10_000)
            .filter(|_| {
                let h = range.sample(&mut rng).unwrap();
                kings.contains_hand(&h)
            })
            .count();
        assert!((4_500..5_500).contains(&kings_drawn), "{kings_drawn}");
    }

    #[test]
    fn test_matches_constant_is_deterministic() {
        let mut range = Range::new();
        range.define_hand(hand("AcAh")).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(range.matches(&hand("AcAh"), &mut rng));
        }
        assert!(!range.matches(&hand("QcQh"), &mut rng));
    }

    #[test]
    fn test_matches_weighted_is_bernoulli() {
        let mut range = Range::new();
        range.define_hand_weighted(hand("KcKh"), 0.3).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let matched = (0..10_000)
            .filter(|_| range.matches(&hand("KcKh"), &mut rng))
            .count();
        assert!((2_500..3_500).contains(&matched), "{matched}");
    }

    #[test]
    fn test_hash_stable_for_same_contents() {
        use std::hash::{DefaultHasher, Hasher};

        let mut one = Range::new();
        let mut two = Range::new();
        for r in [&mut one, &mut two] {
            r.define_hand(hand("AcAh")).unwrap();
            r.define_hand_weighted(hand("KcKh"), 0.5).unwrap();
        }

        let mut h1 = DefaultHasher::new();
        one.hash(&mut h1);
        let mut h2 = DefaultHasher::new();
        two.hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }
}

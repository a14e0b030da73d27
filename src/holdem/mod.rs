//! Texas Hold'em specific code: starting hand patterns, weighted
//! ranges, equity calculation, and board texture analysis.

/// Starting hand patterns like pocket pairs or suited connectors.
mod starting_hand;
pub use self::starting_hand::{StartingHand, Suitedness};

/// Weighted collections of hole card hands.
mod range;
pub use self::range::{HandGroup, Range};

/// Win/tie/loss simulation between hands and ranges.
mod equity;
pub use self::equity::{DEFAULT_SAMPLE_SIZE, Equity, EquityCalculationBuilder};

/// Hand value distributions of a range on a fixed board.
mod texture;
pub use self::texture::TextureAnalysisBuilder;

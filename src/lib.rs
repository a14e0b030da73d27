//! A library for Texas Hold'em hand evaluation and equity
//! calculation. It ranks hands, models weighted ranges of
//! starting hands, and runs enumerated or sampled showdowns
//! to estimate win, tie, and loss probabilities.
//!
//! ```
//! use holdem_equity::core::Hand;
//! use holdem_equity::holdem::EquityCalculationBuilder;
//!
//! let hands = [
//!     Hand::new_from_str("AcAh").unwrap(),
//!     Hand::new_from_str("8s9s").unwrap(),
//! ];
//! let equities = EquityCalculationBuilder::new()
//!     .calculate(&hands)
//!     .unwrap();
//! assert!(equities[0].win() > 0.5);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;

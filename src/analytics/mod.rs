//! Derived analytics over the snapshot, independent of the table pipeline:
//! risk tiers, nearest-neighbor similarity, age/gender histograms, monthly
//! visit series and revisit-rate averages.

mod histogram;
mod panel;
mod risk;
mod similarity;
mod visits;

pub use histogram::*;
pub use panel::*;
pub use risk::*;
pub use similarity::*;
pub use visits::*;

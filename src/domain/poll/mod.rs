//! Poll aggregate - the voting phase over a frozen option set.

mod aggregate;
mod resolver;

pub use aggregate::{Followup, OptionTally, Poll, Tally, Vote};
pub use resolver::{resolve, WinnerSet};

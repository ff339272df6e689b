//! The guessing game: one round's rules and the suggestion filter.
//!
//! Everything here is plain state with transition methods; the terminal
//! front-end owns the current `GuessRound` and draws from it.

mod filter;
mod round;

pub use filter::filter;
pub use round::*;

#[cfg(test)]
mod tests;

//! Batch play for Tetros strategies.
//!
//! [`run`] plays many seeded games of one roster across worker threads and
//! sums the final score tables per color. [`league`] does the same for every
//! four-player line-up drawn from a larger field of named entrants.
//!
//! Workers never share mutable state: each one clones the roster for every
//! game it plays and returns its own [`ScoreTotals`], which are merged once
//! all workers have joined. Results depend only on the roster and the master
//! seed, not on thread scheduling.

pub use self::{league::*, simulation::*, totals::*};

mod league;
mod simulation;
mod totals;

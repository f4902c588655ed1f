//! Shared run machinery.
//!
//! Holds the deterministic random source every stochastic decision of a run
//! draws from.

pub mod rng;

pub use rng::SimRng;

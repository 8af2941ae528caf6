//! # Random Number Generation Infrastructure
//!
//! Seeded pseudo-random number generation for path simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Every generator is created from a 64-bit seed and
//!   replays the same sequence when re-seeded
//! - **Independence**: Each simulated path owns its generator, seeded from a
//!   sub-seed drawn by the engine's generator
//! - **Efficiency**: Batch fills write into caller-provided slices
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut master = PricerRng::from_seed(12345);
//!
//! // Derive an independent per-path generator
//! let mut path_rng = PricerRng::from_seed(master.next_seed());
//! let z = path_rng.gen_normal();
//! assert!(z.is_finite());
//! ```

pub mod prng;

pub use prng::PricerRng;

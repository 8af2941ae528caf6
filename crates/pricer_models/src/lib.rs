//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic models and payoff definitions.
//!
//! This crate provides:
//! - The simulation [`State`](models::State) (spot plus optional variance)
//! - The [`DiffusionModel`](models::DiffusionModel) contract for one-factor
//!   SDEs `dX = a(t, X) dt + b(t, X) dW`
//! - Models: Black–Scholes, Heston, local volatility (Dupire) and Vasicek
//! - Instruments: option contracts with vanilla and barrier payoffs
//!   evaluated on simulated paths
//!
//! ## Design Principles
//!
//! - **Validated value objects**: every model checks its parameters once at
//!   construction and is immutable afterwards
//! - **Enum-based dispatch** over the closed set of one-factor models
//! - **Thread-safe sharing**: models are `Send + Sync` and are read from
//!   many simulation workers at once

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;

//! Option instruments evaluated on simulated paths.
//!
//! # Instrument Types
//!
//! - [`OptionContract`]: Strike and maturity of a European-style contract
//! - [`PayoffType`]: Vanilla payoffs on the terminal value (call, put, digitals)
//! - [`BarrierPayoff`]: Knock-in / knock-out wrapper monitored along the path
//! - [`Payoff`]: Either of the above
//! - [`Instrument`]: A contract paired with a payoff
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{Instrument, OptionContract, PayoffType};
//!
//! let contract = OptionContract::new(100.0, 1.0).unwrap();
//! let call = Instrument::new(contract, PayoffType::Call.into());
//!
//! // Path recorded at t = 0, T/2, T
//! let path = [100.0, 104.0, 110.0];
//! assert!((call.payoff_on_path(&path) - 10.0).abs() < 1e-12);
//! ```

mod barrier;
mod instrument;
mod params;
mod payoff;

pub use barrier::{BarrierDirection, BarrierKnock, BarrierPayoff};
pub use instrument::Instrument;
pub use params::OptionContract;
pub use payoff::{Payoff, PayoffType};

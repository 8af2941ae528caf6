//! Static dispatch enum for one-factor diffusion models.
//!
//! `DiffusionModelEnum` lets the generic Euler scheme be instantiated once
//! for every one-factor model, with dispatch through `match` rather than a
//! vtable.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{DiffusionModel, DiffusionModelEnum, VasicekModel};
//!
//! let model: DiffusionModelEnum = VasicekModel::new(0.5, 0.04, 0.01).unwrap().into();
//! assert_eq!(model.model_name(), "Vasicek");
//! ```

use super::{BlackScholesModel, DiffusionModel, LocalVolModel, State, VasicekModel};

/// Closed set of one-factor models driven by the generic Euler scheme.
#[derive(Clone, Debug)]
pub enum DiffusionModelEnum {
    /// Geometric Brownian motion
    BlackScholes(BlackScholesModel),
    /// Dupire local volatility
    LocalVol(LocalVolModel),
    /// Vasicek short rate
    Vasicek(VasicekModel),
}

impl DiffusionModel for DiffusionModelEnum {
    #[inline]
    fn drift(&self, t: f64, state: &State) -> f64 {
        match self {
            DiffusionModelEnum::BlackScholes(m) => m.drift(t, state),
            DiffusionModelEnum::LocalVol(m) => m.drift(t, state),
            DiffusionModelEnum::Vasicek(m) => m.drift(t, state),
        }
    }

    #[inline]
    fn diffusion(&self, t: f64, state: &State) -> f64 {
        match self {
            DiffusionModelEnum::BlackScholes(m) => m.diffusion(t, state),
            DiffusionModelEnum::LocalVol(m) => m.diffusion(t, state),
            DiffusionModelEnum::Vasicek(m) => m.diffusion(t, state),
        }
    }

    fn instantaneous_variance(&self, t: f64, state: &State) -> Option<f64> {
        match self {
            DiffusionModelEnum::BlackScholes(m) => m.instantaneous_variance(t, state),
            DiffusionModelEnum::LocalVol(m) => m.instantaneous_variance(t, state),
            DiffusionModelEnum::Vasicek(m) => m.instantaneous_variance(t, state),
        }
    }

    fn has_instantaneous_variance(&self) -> bool {
        match self {
            DiffusionModelEnum::BlackScholes(m) => m.has_instantaneous_variance(),
            DiffusionModelEnum::LocalVol(m) => m.has_instantaneous_variance(),
            DiffusionModelEnum::Vasicek(m) => m.has_instantaneous_variance(),
        }
    }

    fn model_name(&self) -> &'static str {
        match self {
            DiffusionModelEnum::BlackScholes(m) => m.model_name(),
            DiffusionModelEnum::LocalVol(m) => m.model_name(),
            DiffusionModelEnum::Vasicek(m) => m.model_name(),
        }
    }
}

impl From<BlackScholesModel> for DiffusionModelEnum {
    fn from(model: BlackScholesModel) -> Self {
        DiffusionModelEnum::BlackScholes(model)
    }
}

impl From<LocalVolModel> for DiffusionModelEnum {
    fn from(model: LocalVolModel) -> Self {
        DiffusionModelEnum::LocalVol(model)
    }
}

impl From<VasicekModel> for DiffusionModelEnum {
    fn from(model: VasicekModel) -> Self {
        DiffusionModelEnum::Vasicek(model)
    }
}

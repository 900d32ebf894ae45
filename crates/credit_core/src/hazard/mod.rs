//! Default-time models.
//!
//! - [`HazardFunction`]: Survival probabilities and discounted default integrals
//! - [`ConstantHazardFunction`]: Poisson default with a single intensity

mod constant;
mod traits;

pub use constant::ConstantHazardFunction;
pub use traits::HazardFunction;

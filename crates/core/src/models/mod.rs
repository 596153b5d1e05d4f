//! Data models mirrored from the portfolio backend

mod common;
mod equity;
mod fixed_income;
mod portfolio;
mod private_fund;
mod real_estate;
mod user;

pub use common::*;
pub use equity::*;
pub use fixed_income::*;
pub use portfolio::*;
pub use private_fund::*;
pub use real_estate::*;
pub use user::*;

//! Core types used across the InTouch Kit.

mod amount;
mod common;
mod phone;

pub use amount::*;
pub use common::*;
pub use phone::*;

// Storage module for data kept between passes
pub mod action_ledger;

pub use action_ledger::*;

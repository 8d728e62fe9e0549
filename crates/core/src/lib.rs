//! Domain layer for the Barter exchange service.
//!
//! Pure logic only: enumerated choices, form validation, listing filters,
//! pagination, and the ad ownership guard. Nothing in this crate touches the
//! database or the network.

pub mod account;
pub mod ad;
pub mod error;
pub mod form;
pub mod listing;
pub mod ownership;
pub mod pagination;
pub mod proposal;
pub mod types;

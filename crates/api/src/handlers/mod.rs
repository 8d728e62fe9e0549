pub mod ads;
pub mod auth;
pub mod proposals;

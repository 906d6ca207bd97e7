//! Command implementations.

pub mod admin;
pub mod capture;
pub mod init;
pub mod link;
pub mod open;

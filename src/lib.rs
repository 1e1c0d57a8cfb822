//! STAYHUB application library
//!
//! Project modules plus the bootstrap that wires them to the framework crates.

pub mod bootstrap;
pub mod modules;

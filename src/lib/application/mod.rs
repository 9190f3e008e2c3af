//! # Application Module
//!
//! ## Submodules
//!
//! - [`conversation`] - The conversation state holder (turns + result set)
//! - [`transport`] - The outbound exchange with the advisor backend
//! - [`exchange`] - Sequencing of one chat round trip
//! - [`stdio`] - Standard input/output interface for command-line interaction

pub mod conversation;
pub mod exchange;
pub mod stdio;
pub mod transport;

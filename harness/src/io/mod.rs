//! Side-effecting operations: manifest loading and child processes.

pub mod manifest;
pub mod process;

/// Outbound adapters - concrete implementations of the driven ports
pub mod console;
pub mod filesystem;
pub mod network;

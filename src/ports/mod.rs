/// Ports layer - Interface definitions
///
/// Contains the outbound (driven) ports implemented by adapters.
pub mod outbound;

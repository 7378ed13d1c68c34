/// Domain services - pure reduction and correlation logic
pub mod release_correlator;
pub mod tier_formatter;

pub use release_correlator::ReleaseCorrelator;
pub use tier_formatter::TierFormatter;

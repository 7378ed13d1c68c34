/// Application use cases - the two aggregation engines
pub mod poll_results;
pub mod resolve_catalog;

pub use poll_results::PollResultsUseCase;
pub use resolve_catalog::ResolveCatalogUseCase;

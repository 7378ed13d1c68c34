/// Data transfer objects for the application layer
pub mod catalog_report;
pub mod catalog_request;
pub mod poll_request;

pub use catalog_report::{CatalogReport, CatalogResults};
pub use catalog_request::CatalogRequest;
pub use poll_request::PollRequest;

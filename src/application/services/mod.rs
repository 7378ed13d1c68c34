/// Application services - engines driving the outbound ports
pub mod paginator;

pub use paginator::{EmptyPagePolicy, FetchLimit, PageQuery, PageStyle, Paginator};

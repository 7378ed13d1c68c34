/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_query_client;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_query_client::{MockQueryClient, RecordedCall};

mod http_query_client;

pub use http_query_client::HttpQueryClient;

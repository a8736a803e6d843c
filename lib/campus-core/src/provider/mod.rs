pub mod http_client;
pub mod query_cache;
pub mod rest_api;

pub mod error;
pub mod fetch_port;
pub mod mutation_port;

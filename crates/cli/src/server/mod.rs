pub mod ingest;
pub mod web;

pub use ingest::start_ingest_server;
pub use web::start_web_server;

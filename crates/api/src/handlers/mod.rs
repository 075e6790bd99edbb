pub mod health;
pub mod index;
pub mod metrics;

pub use health::health_check;
pub use index::index;
pub use metrics::get_metrics;

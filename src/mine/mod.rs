pub mod aggregate;
pub mod engine;

pub use aggregate::{Aggregator, AttributionFold, FrequencyFold};
pub use engine::{Miner, ScanStats};

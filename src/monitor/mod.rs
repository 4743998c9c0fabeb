mod collector;

pub use collector::{MetricsSource, SystemCollector};

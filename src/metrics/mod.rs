pub mod statistics;

pub use statistics::CountStatistics;

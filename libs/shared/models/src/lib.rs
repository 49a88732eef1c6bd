pub mod error;
pub mod scheduling;

pub use scheduling::TimeRange;

pub mod error;
pub mod export;
pub mod models;

pub use error::{ExportError, ParseError, SchedulerError};
pub use models::{Card, LeitnerScheduler, OnFail, Rating, ReviewLog, ReviewSession, SchedulerConfig};

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod report;
pub mod types;

pub use error::{FourTrackError, Result};
pub use types::{Alphabet, Label, Orientation, Polarity, Sequence, Statistic};

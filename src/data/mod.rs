pub mod connectors;
pub mod constants;

pub use connectors::{RawSequence, SequenceKind, SequenceValidator, TextConnector};
pub use constants::{ConstantDigits, ConstantLibrary};

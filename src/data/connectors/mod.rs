mod text;
mod types;
mod validator;

pub use text::{TextConnector, SEQUENCE_EXTENSIONS};
pub use types::{DatasetMetadata, RawSequence, SequenceKind};
pub use validator::SequenceValidator;

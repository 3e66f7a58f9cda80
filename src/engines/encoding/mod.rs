pub mod pair_codec;
pub mod tracks;

pub use pair_codec::{EncodedSequence, PairCodec};
pub use tracks::{attribute, remap, Track, ATTRIBUTE_DIMENSIONS};

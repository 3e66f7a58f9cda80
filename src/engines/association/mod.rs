pub mod scanner;

pub use scanner::{associate, distribution_similarity, longest_common_run, prefix_similarity, AssociationResult};

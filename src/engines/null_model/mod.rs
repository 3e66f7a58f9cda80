pub mod comparator;
pub mod distribution;

pub use comparator::{compare_to_null, NullComparison, NullModelComparator};
pub use distribution::{NullDistribution, Significance};

use crate::types::Label;
use std::collections::HashMap;

/// Shannon entropy in bits of a count distribution; 0 when all counts are zero
pub fn shannon_entropy<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let counts: Vec<usize> = counts.into_iter().filter(|&c| c > 0).collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
        .max(0.0)
}

pub fn label_entropy(labels: &[Label]) -> f64 {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.name).or_insert(0) += 1;
    }
    shannon_entropy(counts.into_values())
}

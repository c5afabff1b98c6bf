use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::errors::GenerationError;

/// Categorical distribution over a fixed set of values.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    values: Vec<T>,
    index: WeightedIndex<u32>,
}

impl<T: Copy> WeightedChoice<T> {
    /// Build from `(value, weight)` pairs. Zero weights are allowed as long as
    /// one entry stays positive.
    pub fn new(entries: &[(T, u32)], label: &str) -> Result<Self, GenerationError> {
        if entries.is_empty() {
            return Err(GenerationError::InvalidOptions(format!(
                "{label}: at least one choice is required"
            )));
        }

        let values: Vec<T> = entries.iter().map(|(value, _)| *value).collect();
        let weights: Vec<u32> = entries.iter().map(|(_, weight)| *weight).collect();
        let index = WeightedIndex::new(&weights).map_err(|err| {
            GenerationError::InvalidOptions(format!("{label}: invalid weights ({err})"))
        })?;

        Ok(Self { values, index })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.values[self.index.sample(rng)]
    }
}

use crate::domain::AppError;
use crate::ports::SecretGenerator;

/// Deterministic generator: repeats `seed` up to the requested length.
pub struct FixedSecretGenerator {
    seed: &'static str,
}

impl FixedSecretGenerator {
    pub fn new(seed: &'static str) -> Self {
        Self { seed }
    }
}

impl Default for FixedSecretGenerator {
    fn default() -> Self {
        Self::new("rconsecret")
    }
}

impl SecretGenerator for FixedSecretGenerator {
    fn generate(&self, length: usize) -> Result<String, AppError> {
        Ok(self.seed.chars().cycle().take(length).collect())
    }
}

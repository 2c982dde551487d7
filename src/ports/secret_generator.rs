use crate::domain::AppError;

/// Port for generating credentials.
pub trait SecretGenerator {
    /// Produce a random string of exactly `length` characters.
    fn generate(&self, length: usize) -> Result<String, AppError>;
}

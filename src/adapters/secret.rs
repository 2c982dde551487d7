use rand::distr::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::AppError;
use crate::ports::SecretGenerator;

/// Characters a generated secret is drawn from (82 symbols).
pub const SECRET_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_-+={}[/?]";

/// Secret generator seeded from the operating system on every call.
///
/// Each character is an independent unbiased draw over the alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecretGenerator;

impl SecretGenerator for OsSecretGenerator {
    fn generate(&self, length: usize) -> Result<String, AppError> {
        if length == 0 {
            return Err(AppError::validation("length", "secret length must be positive"));
        }

        let mut rng = StdRng::try_from_os_rng()
            .map_err(|err| AppError::Entropy(format!("operating system RNG unavailable: {err}")))?;
        let index = Uniform::new(0, SECRET_ALPHABET.len())
            .map_err(|err| AppError::Entropy(err.to_string()))?;

        Ok((0..length).map(|_| char::from(SECRET_ALPHABET[rng.sample(index)])).collect())
    }
}

use crate::error::AppError;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Salted bcrypt hashing for stored credentials.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// bcrypt accepts costs in `4..=31`.
    pub fn with_cost(cost: u32) -> Result<Self, AppError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AppError::ConfigError(format!(
                "bcrypt cost {cost} out of range ({MIN_COST}..={MAX_COST})"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| AppError::PasswordHash(e.to_string()))
    }

    /// Never fails: a malformed digest simply does not match.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!("Rejecting unparseable password digest: {e}");
                false
            }
        }
    }
}

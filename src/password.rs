use rand::distr::{Alphanumeric, SampleString};

pub const PASSWORD_LENGTH: usize = 20;

/// Generates a fresh password drawn uniformly from `[A-Za-z0-9]`.
pub fn generate_password() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), PASSWORD_LENGTH)
}

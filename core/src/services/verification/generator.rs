//! Six-digit code generation

use rand::Rng;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Source of one-time codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a six-character numeric code
    fn generate(&self) -> String;
}

/// Uniform draw from `[CODE_MIN, CODE_MAX]` using the thread-local RNG.
///
/// Not cryptographically strong. The short lifetime, attempt cap and send
/// cooldown are what bound guessing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generate a six-digit code with no leading zero
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_codes_are_six_digits_in_range() {
        for _ in 0..1_000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| RandomCodeGenerator.generate()).collect();
        assert!(codes.len() > 1);
    }
}

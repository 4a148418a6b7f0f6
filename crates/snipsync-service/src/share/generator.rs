//! Share-code candidate generation.

use rand::Rng;

/// Share codes are always exactly this long.
pub const CODE_LENGTH: usize = 6;

/// Lowercase letters and digits: 36^6 ≈ 2.18e9 possible values.
///
/// Not cryptographically secured — guessability is acceptable because codes
/// are time-boxed and point at content the user already chose to share.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Produces candidate code values.
///
/// The production implementation is [`RandomCodeGenerator`]; tests script
/// the sequence to force collisions.
pub trait CandidateSource: Send + Sync {
    /// Returns one candidate code, uniformly random per character.
    fn candidate(&self) -> String;
}

/// Generates candidates with a uniform random choice per character.
#[derive(Debug, Clone, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }
}

impl CandidateSource for RandomCodeGenerator {
    fn candidate(&self) -> String {
        let mut rng = rand::rng();
        (0..CODE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CODE_ALPHABET.len());
                CODE_ALPHABET[idx] as char
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_has_fixed_length() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..100 {
            assert_eq!(generator.candidate().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_candidate_stays_in_alphabet() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..100 {
            let code = generator.candidate();
            assert!(
                code.bytes().all(|b| CODE_ALPHABET.contains(&b)),
                "unexpected character in {code:?}"
            );
        }
    }

    #[test]
    fn test_candidates_vary() {
        let generator = RandomCodeGenerator::new();
        let first = generator.candidate();
        let varied = (0..20).any(|_| generator.candidate() != first);
        assert!(varied, "20 identical candidates from a 36^6 space");
    }
}

use rand::{rng, Rng};

/// Symbols a generated shortcode is drawn from
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_SHORTCODE_LENGTH: usize = 6;

/// Source of candidate shortcodes.
///
/// Generators never touch storage, so a returned code may already be taken.
#[cfg_attr(test, mockall::automock)]
pub trait ShortcodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Draws every character independently and uniformly from [`ALPHABET`]
#[derive(Debug, Clone)]
pub struct RandomShortcodeGenerator {
    length: usize,
}

impl RandomShortcodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomShortcodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTCODE_LENGTH)
    }
}

impl ShortcodeGenerator for RandomShortcodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// True when `code` could have come from a generator of the given length
pub fn is_generated_shape(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn alphabet_has_62_distinct_symbols() {
        let distinct: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(ALPHABET.len(), 62);
        assert_eq!(distinct.len(), 62);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn generates_codes_of_default_length() {
        let generator = RandomShortcodeGenerator::default();
        for _ in 0..1_000 {
            let code = generator.generate();
            assert!(is_generated_shape(&code, DEFAULT_SHORTCODE_LENGTH), "bad code {code}");
        }
    }

    #[test]
    fn honours_configured_length() {
        let generator = RandomShortcodeGenerator::new(11);
        assert_eq!(generator.length(), 11);
        assert_eq!(generator.generate().len(), 11);
    }

    #[test]
    fn codes_vary_between_calls() {
        let generator = RandomShortcodeGenerator::default();
        let codes: HashSet<_> = (0..200).map(|_| generator.generate()).collect();
        // 62^6 possibilities; 200 draws colliding down to a handful would mean a broken RNG
        assert!(codes.len() > 190);
    }

    #[test]
    fn shape_check_rejects_foreign_symbols() {
        assert!(is_generated_shape("abC123", 6));
        assert!(!is_generated_shape("abc-12", 6));
        assert!(!is_generated_shape("abc12", 6));
    }
}

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::PasswordError;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &[u8] = b"1234567890";
const SYMBOLS: &[u8] = b"!@#$%^&*()_[]|-";

pub const MIN_LENGTH: u8 = 8;
pub const MAX_LENGTH: u8 = 100;
pub const DEFAULT_LENGTH: u8 = 13;
pub const MAX_COMPLEXITY: u8 = 5;
pub const DEFAULT_COMPLEXITY: u8 = 5;

/// Validated password length and complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    length: u8,
    complexity: u8,
}

impl PasswordOptions {
    pub fn new(length: u8, complexity: u8) -> Result<Self, PasswordError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(PasswordError::InvalidLength(length));
        }
        if complexity > MAX_COMPLEXITY {
            return Err(PasswordError::InvalidComplexity(complexity));
        }
        Ok(Self { length, complexity })
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn complexity(&self) -> u8 {
        self.complexity
    }

    /// Character classes enabled by the complexity level.
    fn classes(&self) -> &'static [&'static [u8]] {
        match self.complexity {
            0 => &[LOWER],
            1 => &[LOWER, NUMBERS],
            2 => &[LOWER, SYMBOLS],
            3 => &[LOWER, UPPER, NUMBERS],
            4 => &[LOWER, NUMBERS, SYMBOLS],
            _ => &[LOWER, UPPER, NUMBERS, SYMBOLS],
        }
    }
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            complexity: DEFAULT_COMPLEXITY,
        }
    }
}

/// Generates a password containing at least one character of every class the
/// complexity level enables.
pub fn generate_password<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> String {
    let classes = options.classes();
    let pool: Vec<u8> = classes.iter().flat_map(|c| c.iter().copied()).collect();

    let mut chars: Vec<u8> = classes
        .iter()
        .filter_map(|class| class.choose(rng).copied())
        .collect();
    while chars.len() < usize::from(options.length) {
        if let Some(c) = pool.choose(rng) {
            chars.push(*c);
        }
    }
    chars.shuffle(rng);

    chars.into_iter().map(char::from).collect()
}

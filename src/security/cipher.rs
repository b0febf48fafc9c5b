//! Shift cipher for display text
//!
//! ASCII letters rotate within their case (mod 26), digits rotate mod 10,
//! every other character passes through unchanged.

use super::TextCipher;

/// Shift used when none is configured
pub const DEFAULT_SHIFT: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftCipher {
    shift: i32,
}

impl Default for ShiftCipher {
    fn default() -> Self {
        Self::new(DEFAULT_SHIFT)
    }
}

impl ShiftCipher {
    pub fn new(shift: i32) -> Self {
        Self { shift }
    }

    fn convert(text: &str, shift: i32) -> String {
        text.chars()
            .map(|ch| {
                if ch.is_ascii_uppercase() {
                    rotate(ch, b'A', 26, shift)
                } else if ch.is_ascii_lowercase() {
                    rotate(ch, b'a', 26, shift)
                } else if ch.is_ascii_digit() {
                    rotate(ch, b'0', 10, shift)
                } else {
                    ch
                }
            })
            .collect()
    }
}

fn rotate(ch: char, base: u8, modulus: i32, shift: i32) -> char {
    let offset = (ch as i32 - base as i32 + shift).rem_euclid(modulus);
    (base + offset as u8) as char
}

impl TextCipher for ShiftCipher {
    fn encrypt(&self, text: &str) -> String {
        Self::convert(text, self.shift)
    }

    fn decrypt(&self, text: &str) -> String {
        Self::convert(text, -self.shift)
    }
}

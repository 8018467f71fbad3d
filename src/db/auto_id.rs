// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side document ID generation.
//!
//! IDs use the same shape as Firestore client auto-IDs: 20 characters drawn
//! uniformly from `[A-Za-z0-9]`.

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};

const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const AUTO_ID_LEN: usize = 20;

// Largest multiple of 62 that fits in a byte; bytes at or above it are
// rejected so that every character is equally likely.
const MAX_UNBIASED: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Generate a new random document ID.
pub fn generate(rng: &SystemRandom) -> Result<String, AppError> {
    let mut id = String::with_capacity(AUTO_ID_LEN);
    let mut buf = [0u8; 40];

    while id.len() < AUTO_ID_LEN {
        rng.fill(&mut buf)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;

        for &b in buf.iter().filter(|&&b| b < MAX_UNBIASED) {
            if id.len() == AUTO_ID_LEN {
                break;
            }
            id.push(ALPHABET[b as usize % ALPHABET.len()] as char);
        }
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let rng = SystemRandom::new();
        let id = generate(&rng).unwrap();

        assert_eq!(id.len(), AUTO_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_ids_are_distinct() {
        let rng = SystemRandom::new();
        let ids: HashSet<String> = (0..1000).map(|_| generate(&rng).unwrap()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_rejection_bound() {
        assert_eq!(MAX_UNBIASED, 248);
    }
}

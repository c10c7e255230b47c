// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! NDM challenge-response credential digest

use md5::compute as md5_compute;
use sha2::{Digest, Sha256};

/// Computes the password field for `POST /auth`
///
/// `hex(sha256(challenge ++ hex(md5(login ":" realm ":" password))))`, both
/// hex encodings lowercase. The result is only valid for the challenge it was
/// built from.
pub fn credential_digest(login: &str, password: &str, realm: &str, challenge: &str) -> String {
    let inner = md5_compute(format!("{login}:{realm}:{password}"));
    let inner_hex = hex::encode(inner.0);

    let mut hasher = Sha256::new();
    hasher.update(challenge.as_bytes());
    hasher.update(inner_hex.as_bytes());
    hex::encode(hasher.finalize())
}

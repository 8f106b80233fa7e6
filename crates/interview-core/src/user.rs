//! User accounts. Seeded once at startup; never mutated by the API.

use serde::{Deserialize, Serialize};

/// A stored user with an argon2 PHC password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub username:      String,
  pub password_hash: String,
}

/// A user as it appears in the seed fixture, with a plaintext password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
  pub username: String,
  pub password: String,
}

//! Session-token identity resolution backed by PostgreSQL.
//!
//! Tokens are never stored in clear; the `user_session` table keys on the
//! hex SHA-256 of the bearer token.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{Pool, Postgres};
use tracing::debug;

use notekeep_core::{AuthUser, Error, IdentityResolver, Result};

/// Hex-encoded SHA-256 of a bearer token, as stored in `user_session.token_hash`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Clone)]
pub struct PgSessionResolver {
    pool: Pool<Postgres>,
}

impl PgSessionResolver {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityResolver for PgSessionResolver {
    async fn resolve(&self, token: &str) -> Result<Option<AuthUser>> {
        let user_id: Option<String> = sqlx::query_scalar(
            "SELECT user_id FROM user_session WHERE token_hash = $1 AND expires_at > NOW()",
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        if user_id.is_none() {
            debug!(
                subsystem = "auth",
                component = "session",
                "Unknown or expired session token"
            );
        }

        Ok(user_id.map(AuthUser::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_hex_sha256() {
        let hash = hash_token("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_token_differs_per_token() {
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
        assert_eq!(hash_token("token-a").len(), 64);
    }
}

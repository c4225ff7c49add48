use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::SessionProvider;
use crate::{AuthError, DatabaseError, Session};

const DEFAULT_TTL_HOURS: i64 = 24 * 7;

/// Email + password sign-in backed by the `users` and `sessions` tables.
///
/// The provider holds at most one session token. Hosts that outlive a single
/// process persist [`token`](Self::token) and hand it back through
/// [`with_token`](Self::with_token).
pub struct SqliteSessionProvider {
    pool: SqlitePool,
    token: Option<String>,
    ttl: chrono::Duration,
}

impl SqliteSessionProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            token: None,
            ttl: chrono::Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Creates an admin account. Returns the new user id.
    pub async fn register_user(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = normalize_email(email);
        let existing = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        if existing.is_some() {
            return Err(AuthError::UserExists(email));
        }

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&email)
        .bind(hash_password(password)?)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        tracing::info!("Registered user {email}");
        Ok(id)
    }

    async fn forget_session(&mut self, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        self.token = None;
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for SqliteSessionProvider {
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email);
        let user = sqlx::query_as::<_, (String, String)>(
            "SELECT id, password_hash FROM users WHERE email = ?",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let Some((user_id, password_hash)) = user else {
            tracing::warn!("Sign-in attempt for unknown user {email}");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(&password_hash, password)? {
            tracing::warn!("Wrong password for {email}");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            email,
            expires_at: chrono::Utc::now() + self.ttl,
        };
        sqlx::query("INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)")
            .bind(&session.token)
            .bind(&session.user_id)
            .bind(chrono::Utc::now())
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        tracing::info!("Signed in {}", session.email);
        self.token = Some(session.token.clone());
        Ok(session)
    }

    async fn sign_out(&mut self) -> Result<(), AuthError> {
        match self.token.clone() {
            Some(token) => {
                self.forget_session(&token).await?;
                tracing::info!("Signed out");
            }
            None => tracing::debug!("Sign-out without a session"),
        }
        Ok(())
    }

    async fn current_session(&mut self) -> Result<Option<Session>, AuthError> {
        let Some(token) = self.token.clone() else {
            return Ok(None);
        };

        let session = sqlx::query_as::<_, Session>(
            "SELECT s.token, s.user_id, u.email, s.expires_at \
             FROM sessions s JOIN users u ON u.id = s.user_id WHERE s.token = ?",
        )
        .bind(&token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        match session {
            Some(session) if !session.is_expired() => Ok(Some(session)),
            Some(_) => {
                tracing::info!("Session expired");
                self.forget_session(&token).await?;
                Ok(None)
            }
            None => {
                self.token = None;
                Ok(None)
            }
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Argon2id PHC string with a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

fn verify_password(stored: &str, password: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHash(e.to_string())),
    }
}

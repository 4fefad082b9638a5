//! Authentication
//!
//! Bearer tokens carry the username, role, and the optional lecturer-profile
//! link; a validated token converts into the [`ActorContext`] every workflow
//! call receives. Session state never reaches the domain.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use core_kernel::{ActorContext, Role};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username, stamped into audit fields)
    pub sub: String,
    /// User account id
    pub user_id: Uuid,
    /// Workflow role
    pub role: String,
    /// Linked lecturer profile, for Lecturer accounts
    pub lecturer_id: Option<Uuid>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Creates a new JWT token
pub fn create_token(
    username: &str,
    user_id: Uuid,
    role: Role,
    lecturer_id: Option<Uuid>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: username.to_string(),
        user_id,
        role: role.as_str().to_string(),
        lecturer_id,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

impl Claims {
    /// Converts the validated token into the actor context passed to the
    /// workflow services
    pub fn to_actor_context(&self) -> Result<ActorContext, AuthError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| AuthError::UnknownRole(self.role.clone()))?;

        Ok(ActorContext {
            actor: self.sub.clone(),
            user_id: self.user_id.into(),
            role,
            lecturer_id: self.lecturer_id.map(Into::into),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_mints_actor_context() {
        let lecturer_id = Uuid::new_v4();
        let token = create_token(
            "tnkosi",
            Uuid::new_v4(),
            Role::Lecturer,
            Some(lecturer_id),
            "test-secret",
            3600,
        )
        .unwrap();

        let claims = validate_token(&token, "test-secret").unwrap();
        let actor = claims.to_actor_context().unwrap();

        assert_eq!(actor.actor, "tnkosi");
        assert_eq!(actor.role, Role::Lecturer);
        assert_eq!(actor.lecturer_id.map(|l| *l.as_uuid()), Some(lecturer_id));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token("x", Uuid::new_v4(), Role::Hr, None, "secret-a", 3600).unwrap();
        assert!(validate_token(&token, "secret-b").is_err());
    }

    #[test]
    fn test_tampered_role_is_rejected_at_context_conversion() {
        let claims = Claims {
            sub: "x".to_string(),
            user_id: Uuid::new_v4(),
            role: "Superuser".to_string(),
            lecturer_id: None,
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            claims.to_actor_context(),
            Err(AuthError::UnknownRole(_))
        ));
    }
}

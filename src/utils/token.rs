use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;

/// Signs a bearer token for the given user. The subject carries the user id.
pub fn issue_token(
    user_id: Uuid,
    name: &str,
    secret: &str,
    expiration_secs: u64,
) -> Result<String> {
    let exp = Utc::now().timestamp() as usize + expiration_secs as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

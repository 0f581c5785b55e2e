//! Bearer token minting for the Z:in service

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use crate::error::ZinError;

/// Shared secret expected by the vendor service. Not a real credential.
const TOKEN_SECRET: &str = "secret";

#[derive(Debug, Serialize)]
struct TokenClaims<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
}

/// Sign `{"userId": <user_id>}` with HS256. Called for every request, never cached.
pub fn mint_token(user_id: &str) -> Result<String, ZinError> {
    let token = encode(
        &Header::default(),
        &TokenClaims { user_id },
        &EncodingKey::from_secret(TOKEN_SECRET.as_bytes()),
    )?;
    Ok(token)
}

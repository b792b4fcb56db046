/*!
 * # Token and Role Handling
 *
 * Tokens are issued by the farm auth service. The client reads the `roles`
 * claim to decide which view set a session is dispatched to:
 *
 * - parse (and, when a secret is configured, verify) the token
 * - take the first role claim and map it to [`Role`]
 * - map the role to a [`ViewSet`]; anything invalid falls back to unauthenticated
 */

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::errors::{ClientError, ClientResult};
use crate::session::SessionStore;

mod types;

pub use types::*;

/// Minimum length for a phone-like claim to be usable as an order-history key.
const MIN_PHONE_LEN: usize = 3;

/// Claims the client cares about. Everything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, deserialize_with = "string_or_number")]
    pub sub: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    #[serde(default, rename = "phoneNumber", deserialize_with = "string_or_number")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Identity claims show up as strings or bare numbers depending on the issuer.
/// Anything else reads as absent.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl Claims {
    /// Role from the first entry of the `roles` claim.
    pub fn role(&self) -> Option<Role> {
        self.roles.first().and_then(|raw| raw.parse().ok())
    }

    pub fn view_set(&self) -> ViewSet {
        ViewSet::for_role(self.role())
    }

    /// First usable phone-like claim: phone, phoneNumber, mobile, username, then sub.
    pub fn contact_phone(&self) -> Option<&str> {
        [
            &self.phone,
            &self.phone_number,
            &self.mobile,
            &self.username,
            &self.sub,
        ]
        .into_iter()
        .filter_map(|claim| claim.as_deref())
        .map(str::trim)
        .find(|value| value.len() >= MIN_PHONE_LEN)
    }
}

/// Parses a bearer token.
///
/// With a secret the HMAC signature is verified; without one the payload is read as-is.
/// `exp` is checked whenever the token carries it.
pub fn parse_token(token: &str, secret: Option<&str>) -> ClientResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.required_spec_claims = HashSet::new();

    let key = match secret {
        Some(secret) => DecodingKey::from_secret(secret.as_bytes()),
        None => {
            validation.insecure_disable_signature_validation();
            DecodingKey::from_secret(&[])
        }
    };

    decode::<Claims>(token.trim(), &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                ClientError::Token("token has expired".to_string())
            }
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                ClientError::Token("signature mismatch".to_string())
            }
            _ => ClientError::Token(e.to_string()),
        })
}

/// View set for a raw token; any parsing failure means unauthenticated.
pub fn view_set_for_token(token: &str, secret: Option<&str>) -> ViewSet {
    match parse_token(token, secret) {
        Ok(claims) => claims.view_set(),
        Err(err) => {
            debug!(error = %err, "token rejected; falling back to login");
            ViewSet::Unauthenticated
        }
    }
}

/// Resolves the view set for whatever session the store holds.
pub async fn resolve_view_set(store: &dyn SessionStore, secret: Option<&str>) -> ViewSet {
    match store.token().await {
        Ok(Some(token)) => view_set_for_token(&token, secret),
        Ok(None) => ViewSet::Unauthenticated,
        Err(err) => {
            debug!(error = %err, "session unreadable; falling back to login");
            ViewSet::Unauthenticated
        }
    }
}

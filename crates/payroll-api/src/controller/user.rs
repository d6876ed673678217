use crate::controller::SharedStore;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mem_db::{ColumnDef, ColumnType, Condition, InsertOutcome, StoreResult, Value};
use serde::{Deserialize, Serialize};

pub const USERS_TABLE: &str = "users";

/// Decoded payload of a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
}

/// Credential storage and token issuance.
///
/// Passwords are stored as plaintext in the users table by explicit
/// design for this in-memory store; the matching logic is isolated
/// here so hashing can be added without touching the store contract.
pub struct UserController {
    store: SharedStore,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl UserController {
    /// Creates the users table before any query is legal.
    pub async fn new(store: SharedStore, jwt_secret: &str) -> Self {
        store.write().await.create_table(
            USERS_TABLE,
            vec![
                ColumnDef::required("email", ColumnType::Text),
                ColumnDef::required("password", ColumnType::Text),
            ],
        );
        // Tokens carry only the email claim; no expiry is issued, so
        // the verifier must not demand one.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            store,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    pub async fn add_user(&self, email: &str, password: &str) -> StoreResult<InsertOutcome> {
        let mut fields = mem_db::Row::new();
        fields.insert("email".into(), Value::from(email));
        fields.insert("password".into(), Value::from(password));
        self.store.write().await.insert(USERS_TABLE, &fields)
    }

    /// Issue a signed token on a credential match; `None` on mismatch.
    /// A failed login is an ordinary outcome, not an error.
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<Option<String>> {
        let user = self.store.read().await.select_one(
            USERS_TABLE,
            &["email", "password"],
            &[
                Condition::equals("email", email),
                Condition::equals("password", password),
            ],
        )?;
        if user.is_none() {
            return Ok(None);
        }
        let claims = Claims {
            email: email.to_owned(),
        };
        match jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key) {
            Ok(token) => Ok(Some(token)),
            Err(err) => {
                tracing::warn!(%err, "token signing failed");
                Ok(None)
            }
        }
    }

    /// Verify a bearer token, stripping an optional `Bearer ` prefix.
    /// Returns the decoded claims, or `None` on any verification
    /// failure; a bad token is never an error.
    pub fn validate_token(&self, token: &str) -> Option<Claims> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .ok()
    }
}

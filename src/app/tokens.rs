use anyhow::Result;
use pasetors::claims::{Claims, ClaimsValidationRules};
use pasetors::keys::SymmetricKey;
use pasetors::token::UntrustedToken;
use pasetors::{local, version4::V4, Local};
use uuid::Uuid;

const ISSUER: &str = "quill";

/// Issues and verifies the stateless identity tokens handed out at login.
/// Validity is cryptographic; nothing is persisted.
#[derive(Clone)]
pub struct TokenService {
    secret: [u8; 32],
    ttl_hours: u64,
}

impl TokenService {
    pub fn new(secret: [u8; 32], ttl_hours: u64) -> Self {
        Self { secret, ttl_hours }
    }

    /// Produce a signed token embedding the user id, issued-at and expiry.
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let duration = std::time::Duration::from_secs(self.ttl_hours * 60 * 60);
        let mut claims = Claims::new_expires_in(&duration)?;
        claims.issuer(ISSUER)?;
        claims.audience(ISSUER)?;
        claims.subject(&user_id.to_string())?;

        let key = SymmetricKey::<V4>::from(&self.secret)?;
        Ok(local::encrypt(&key, &claims, None, None)?)
    }

    /// Decode a token back to its user id. Returns `None` for anything
    /// invalid: bad signature, malformed or expired token, or a payload
    /// whose subject is missing or not a user id.
    pub fn verify(&self, token: &str) -> Result<Option<Uuid>> {
        let key = SymmetricKey::<V4>::from(&self.secret)?;
        let mut rules = ClaimsValidationRules::new();
        rules.validate_issuer_with(ISSUER);
        rules.validate_audience_with(ISSUER);

        let untrusted = match UntrustedToken::<Local, V4>::try_from(token) {
            Ok(token) => token,
            Err(_) => return Ok(None),
        };
        let trusted = match local::decrypt(&key, &untrusted, &rules, None, None) {
            Ok(token) => token,
            Err(_) => return Ok(None),
        };

        let user_id = trusted
            .payload_claims()
            .and_then(|claims| claims.get_claim("sub"))
            .and_then(|value| value.as_str())
            .and_then(|value| Uuid::parse_str(value).ok());

        Ok(user_id)
    }
}

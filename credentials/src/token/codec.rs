use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::role::Role;

/// Signs and verifies compact, time-bounded identity assertions.
///
/// Tokens are JWTs signed with a process-wide symmetric secret using HS256.
/// Verification only accepts HS256, so a token re-signed under a different
/// algorithm (including `none`) is rejected outright.
///
/// The codec never reads the system clock: both `sign` and `verify` take the
/// current instant from the caller, so verification is pure given
/// `(token, secret, now)`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a token codec over a symmetric secret.
    ///
    /// # Arguments
    /// * `secret` - Signing secret, shared by all sign/verify calls
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty; the codec is unusable
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Sign an identity assertion valid for 24 hours from `now`.
    ///
    /// # Arguments
    /// * `subject` - User identifier to assert
    /// * `role` - Role to assert
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn sign(
        &self,
        subject: impl ToString,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::issued(subject, role, now);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and validity window, returning its claims.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    /// * `now` - Instant to check expiry against
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch, or signed with a different algorithm
    /// * `Expired` - Signature is valid but `now` is at or past `exp`
    /// * `Malformed` - Not a structurally valid token
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller-supplied clock
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;
    use crate::token::claims::VALIDITY_HOURS;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET).expect("Failed to build codec")
    }

    fn issue_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let codec = codec();
        let now = issue_time();

        let token = codec
            .sign("user123", Role::Admin, now)
            .expect("Failed to sign token");
        assert!(!token.is_empty());

        let claims = codec.verify(&token, now).expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iat, now.timestamp());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = TokenCodec::new(b"");
        assert_eq!(result.err(), Some(TokenError::EmptySecret));
    }

    #[test]
    fn test_verify_within_validity_window() {
        let codec = codec();
        let issued = issue_time();
        let token = codec.sign("user123", Role::User, issued).unwrap();

        assert!(codec.verify(&token, issued).is_ok());
        assert!(codec
            .verify(
                &token,
                issued + Duration::hours(VALIDITY_HOURS) - Duration::seconds(1)
            )
            .is_ok());
    }

    #[test]
    fn test_verify_expired_token() {
        let codec = codec();
        let issued = issue_time();
        let token = codec.sign("user123", Role::User, issued).unwrap();

        let at_expiry = codec.verify(&token, issued + Duration::hours(VALIDITY_HOURS));
        assert_eq!(at_expiry.err(), Some(TokenError::Expired));

        let past_expiry = codec.verify(&token, issued + Duration::days(2));
        assert_eq!(past_expiry.err(), Some(TokenError::Expired));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec = codec();
        let other = TokenCodec::new(b"another_secret_at_least_32_bytes!").unwrap();
        let now = issue_time();

        let token = codec.sign("user123", Role::User, now).unwrap();

        let result = other.verify(&token, now);
        assert_eq!(result.err(), Some(TokenError::InvalidSignature));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let codec = codec();
        let now = issue_time();
        let token = codec.sign("user123", Role::User, now).unwrap();

        // Flip a byte inside the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);
        let mut payload = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        let result = codec.verify(&tampered, now);
        assert!(matches!(
            result,
            Err(TokenError::InvalidSignature) | Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_verify_rejects_other_algorithms() {
        let now = issue_time();
        let claims = Claims::issued("user123", Role::Admin, now);

        // Same secret, different HMAC variant: still rejected
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = codec().verify(&token, now);
        assert_eq!(result.err(), Some(TokenError::InvalidSignature));
    }

    #[test]
    fn test_verify_malformed_token() {
        let result = codec().verify("not.a.token", issue_time());
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }
}

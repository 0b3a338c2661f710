//! Bearer token verification
//!
//! Tokens are RS256 JWTs issued by the identity provider. Only the public key
//! is configured here; this service never issues tokens.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::Error as JwtError};
use serde::{Deserialize, Serialize};
use std::env;

use crate::models::ExternalIdentity;

/// Claims this service reads from identity tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Identity-provider subject
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time
    pub exp: u64,
    /// Issued at time
    #[serde(default)]
    pub iat: Option<u64>,
}

impl From<IdentityClaims> for ExternalIdentity {
    fn from(claims: IdentityClaims) -> Self {
        let email = claims.email.unwrap_or_default();
        let name = claims
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| (!email.is_empty()).then(|| email.clone()))
            .unwrap_or_else(|| "Anonymous".to_string());

        ExternalIdentity {
            subject: claims.sub,
            name,
            email,
        }
    }
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// PEM-encoded RSA public key for verifying tokens
    pub public_key: String,
    /// Required `iss` claim, when set
    pub issuer: Option<String>,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    pub fn from_env() -> Result<Self, String> {
        let public_key = env::var("JWT_PUBLIC_KEY")
            .map_err(|_| "JWT_PUBLIC_KEY environment variable not set".to_string())?;

        // If the public key looks like a file path, read from file (try CWD, then crate root)
        let public_key = if public_key.starts_with("-----BEGIN") {
            public_key
        } else {
            std::fs::read_to_string(&public_key)
                .or_else(|_| {
                    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
                    path.push(&public_key);
                    std::fs::read_to_string(path)
                })
                .map_err(|e| format!("Failed to read public key file: {}", e))?
                .trim()
                .to_string()
        };

        let issuer = env::var("JWT_ISSUER").ok().filter(|i| !i.is_empty());

        Ok(JwtConfig { public_key, issuer })
    }
}

/// Verifies bearer tokens against the configured public key
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &JwtConfig) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(config.public_key.as_bytes())?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Validate a token and return the identity it carries
    pub fn verify(&self, token: &str) -> Result<ExternalIdentity, JwtError> {
        let token_data =
            jsonwebtoken::decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
        }

        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;
    use serial_test::serial;
    use std::time::{SystemTime, UNIX_EPOCH};

    const PRIVATE_KEY: &str = include_str!("../tests/fixtures/jwt_private.pem");
    const PUBLIC_KEY: &str = include_str!("../tests/fixtures/jwt_public.pem");

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn sign(claims: serde_json::Value) -> String {
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
        encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap()
    }

    fn verifier(issuer: Option<&str>) -> JwtVerifier {
        JwtVerifier::new(&JwtConfig {
            public_key: PUBLIC_KEY.to_string(),
            issuer: issuer.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let token = sign(json!({
            "sub": "user_123",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "iat": now(),
            "exp": now() + 3600,
        }));

        let identity = verifier(None).verify(&token).unwrap();
        assert_eq!(identity.subject, "user_123");
        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(identity.email, "ada@example.com");
    }

    #[test]
    fn test_name_falls_back_to_email() {
        let token = sign(json!({"sub": "user_1", "email": "bob@example.com", "exp": now() + 60}));
        assert_eq!(verifier(None).verify(&token).unwrap().name, "bob@example.com");

        let token = sign(json!({"sub": "user_2", "exp": now() + 60}));
        assert_eq!(verifier(None).verify(&token).unwrap().name, "Anonymous");
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = sign(json!({"sub": "user_123", "exp": now() - 3600}));
        assert!(verifier(None).verify(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage_and_blank_subject() {
        assert!(verifier(None).verify("not-a-token").is_err());

        let token = sign(json!({"sub": " ", "exp": now() + 60}));
        assert!(verifier(None).verify(&token).is_err());
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let token = sign(json!({"sub": "u", "iss": "https://other.example", "exp": now() + 60}));
        assert!(verifier(Some("https://id.example")).verify(&token).is_err());

        let token = sign(json!({"sub": "u", "iss": "https://id.example", "exp": now() + 60}));
        assert!(verifier(Some("https://id.example")).verify(&token).is_ok());
    }

    #[test]
    #[serial]
    fn test_config_from_env_reads_key_file() {
        unsafe {
            env::set_var("JWT_PUBLIC_KEY", "tests/fixtures/jwt_public.pem");
            env::remove_var("JWT_ISSUER");
        }

        let config = JwtConfig::from_env().unwrap();
        assert!(config.public_key.starts_with("-----BEGIN PUBLIC KEY-----"));
        assert_eq!(config.issuer, None);
        assert!(JwtVerifier::new(&config).is_ok());

        unsafe {
            env::remove_var("JWT_PUBLIC_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_requires_key() {
        unsafe {
            env::remove_var("JWT_PUBLIC_KEY");
        }
        assert!(JwtConfig::from_env().is_err());
    }
}

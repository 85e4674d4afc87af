/*
 * Responsibility
 * - 環境変数や設定の読み込み (TOKEN_SECRET, CORS 許可, DATABASE_URL など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::ownership::MissingTargetPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Upper bound for `TOKEN_TTL_SECONDS` (30 days).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

// RFC 6265 cookie-name token: visible ASCII minus separators.
fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

/// HMAC secret used to sign and verify session credentials.
///
/// Key material is never printed via Debug.
#[derive(Clone)]
pub struct TokenSecret(String);

impl TokenSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid("TOKEN_SECRET"));
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(***)")
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Postgres document store when set, in-memory otherwise
    pub database_url: Option<String>,

    pub token_secret: TokenSecret,
    pub token_issuer: String,
    // Lifetime of both the `exp` claim and the cookie Max-Age (seconds)
    pub token_ttl_seconds: u64,
    pub session_cookie_name: String,

    pub owner_missing_target: MissingTargetPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 5000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let token_secret =
            TokenSecret::new(lookup("TOKEN_SECRET").ok_or(ConfigError::Missing("TOKEN_SECRET"))?)?;

        let token_issuer = lookup("TOKEN_ISSUER").unwrap_or_else(|| "car-doctor-api".to_string());

        let token_ttl_seconds = match lookup("TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ttl| (1..=MAX_TOKEN_TTL_SECONDS).contains(ttl))
                .ok_or(ConfigError::Invalid("TOKEN_TTL_SECONDS"))?,
            None => 7200, // 2h
        };

        let session_cookie_name =
            lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "token".to_string());
        if !is_cookie_name(&session_cookie_name) {
            return Err(ConfigError::Invalid("SESSION_COOKIE_NAME"));
        }

        let owner_missing_target = match lookup("OWNER_MISSING_TARGET") {
            Some(raw) => MissingTargetPolicy::from_str(&raw)
                .map_err(|_| ConfigError::Invalid("OWNER_MISSING_TARGET"))?,
            None => MissingTargetPolicy::SelfScope,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            database_url,
            token_secret,
            token_issuer,
            token_ttl_seconds,
            session_cookie_name,
            owner_missing_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup_from(&[("TOKEN_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.addr.port(), 5000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.token_ttl_seconds, 7200);
        assert_eq!(config.token_issuer, "car-doctor-api");
        assert_eq!(config.session_cookie_name, "token");
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.owner_missing_target, MissingTargetPolicy::SelfScope);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn missing_secret_fails_startup() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("TOKEN_SECRET")));
    }

    #[test]
    fn blank_secret_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("TOKEN_SECRET", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("TOKEN_SECRET")));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("TOKEN_SECRET", "s3cret"),
            ("TOKEN_TTL_SECONDS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("TOKEN_TTL_SECONDS")));
    }

    #[test]
    fn ttl_above_thirty_days_is_rejected() {
        let over = (MAX_TOKEN_TTL_SECONDS + 1).to_string();
        for raw in [over.as_str(), "18446744073709551615"] {
            let err = Config::from_lookup(lookup_from(&[
                ("TOKEN_SECRET", "s3cret"),
                ("TOKEN_TTL_SECONDS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid("TOKEN_TTL_SECONDS")), "ttl {raw}");
        }

        let max = MAX_TOKEN_TTL_SECONDS.to_string();
        let config = Config::from_lookup(lookup_from(&[
            ("TOKEN_SECRET", "s3cret"),
            ("TOKEN_TTL_SECONDS", max.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl_seconds, MAX_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn cookie_name_must_be_a_token() {
        for bad in ["", " ", "tok en", "a;b", "a=b", "a,b", "\"q\"", "sé"] {
            let err = Config::from_lookup(lookup_from(&[
                ("TOKEN_SECRET", "s3cret"),
                ("SESSION_COOKIE_NAME", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid("SESSION_COOKIE_NAME")), "name {bad:?}");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("TOKEN_SECRET", "s3cret"),
            ("SESSION_COOKIE_NAME", "__Host-sid"),
        ]))
        .unwrap();
        assert_eq!(config.session_cookie_name, "__Host-sid");
    }

    #[test]
    fn parses_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TOKEN_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("APP_ENV", "PROD"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("OWNER_MISSING_TARGET", "unscoped"),
            ("DATABASE_URL", "postgres://localhost/cars"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.owner_missing_target, MissingTargetPolicy::Unscoped);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/cars")
        );
    }

    #[test]
    fn secret_is_not_printed() {
        let secret = TokenSecret::new("hunter2").unwrap();
        assert!(!format!("{secret:?}").contains("hunter2"));
    }
}

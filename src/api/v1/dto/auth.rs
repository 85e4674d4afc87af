/*
 * Responsibility
 * - /auth 系の request/response DTO
 */
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/access-token`.
#[derive(Debug, Deserialize)]
pub struct AccessTokenRequest {
    pub email: String,
}

const MAX_EMAIL_LEN: usize = 254;

impl AccessTokenRequest {
    /// Length only. Blank emails are rejected when building the `Principal`.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.len() > MAX_EMAIL_LEN {
            return Err("email must be <= 254 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_length_is_bounded() {
        let req = AccessTokenRequest {
            email: "a".repeat(MAX_EMAIL_LEN + 1),
        };
        assert_eq!(req.validate(), Err("email must be <= 254 chars"));

        let req = AccessTokenRequest {
            email: "a".repeat(MAX_EMAIL_LEN),
        };
        assert!(req.validate().is_ok());
    }
}

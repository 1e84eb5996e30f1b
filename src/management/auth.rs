use chrono::Utc;

use crate::{
    config,
    spotify::{self, ApiError},
    types::{Credentials, Token},
};

// Replace tokens slightly before their real expiry to avoid boundary
// failures on in-flight requests.
const EXPIRY_MARGIN_SECS: u64 = 60;

pub struct TokenProvider {
    credentials: Credentials,
    token: Option<Token>,
}

impl TokenProvider {
    pub fn new(credentials: Credentials) -> Self {
        TokenProvider {
            credentials,
            token: None,
        }
    }

    pub fn from_env() -> Self {
        Self::new(Credentials {
            client_id: config::spotify_client_id(),
            client_secret: config::spotify_client_secret(),
        })
    }

    pub async fn get_valid_token(&mut self) -> Result<String, ApiError> {
        if let Some(token) = &self.token {
            if !Self::is_expired(token) {
                return Ok(token.access_token.clone());
            }
        }

        let token = spotify::auth::request_token(&self.credentials).await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= token.obtained_at + token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS)
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }
}

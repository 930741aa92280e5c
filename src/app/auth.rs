use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::{
    api::{ApiRequest, ApiResult, Dispatcher},
    model::AccessToken,
};

use super::store::TokenStore;

const USER_LOGIN_PATH: &str = "/user/login/user";
const USER_REGISTER_PATH: &str = "/user/register";
const ADMIN_LOGIN_PATH: &str = "/auth/token";
const ADMIN_REGISTER_PATH: &str = "/auth/register/admin";

/// Body of a successful authentication response. `role` shows up only on
/// some backend revisions and is passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// The four authentication endpoints plus session teardown. Every successful
/// grant is written to the token store before it is handed back.
pub struct AuthApi {
    dispatcher: Arc<Dispatcher>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthApi {
    pub fn new(dispatcher: Arc<Dispatcher>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { dispatcher, tokens }
    }

    /// The user login endpoint expects form-encoded credentials.
    pub async fn login_user(&self, username: &str, password: &str) -> ApiResult<TokenGrant> {
        self.authenticate(
            ApiRequest::post(USER_LOGIN_PATH).form(credentials_form(username, password)),
        )
        .await
    }

    pub async fn register_user(&self, username: &str, password: &str) -> ApiResult<TokenGrant> {
        self.authenticate(
            ApiRequest::post(USER_REGISTER_PATH).json(credentials_json(username, password)),
        )
        .await
    }

    /// The admin token endpoint expects form-encoded credentials.
    pub async fn login_admin(&self, username: &str, password: &str) -> ApiResult<TokenGrant> {
        self.authenticate(
            ApiRequest::post(ADMIN_LOGIN_PATH).form(credentials_form(username, password)),
        )
        .await
    }

    pub async fn register_admin(&self, username: &str, password: &str) -> ApiResult<TokenGrant> {
        self.authenticate(
            ApiRequest::post(ADMIN_REGISTER_PATH).json(credentials_json(username, password)),
        )
        .await
    }

    /// Forgets the stored session. The backend keeps no session state, so
    /// this is purely a client-side operation.
    pub async fn logout(&self) -> ApiResult<()> {
        self.tokens.clear().await?;

        Ok(())
    }

    async fn authenticate(&self, request: ApiRequest) -> ApiResult<TokenGrant> {
        let grant: TokenGrant = self.dispatcher.dispatch(request).await?;

        // A 200 carrying a blank token is a malformed grant, not a session.
        let token = AccessToken::from_str(&grant.access_token)
            .ok_or_else(|| anyhow::anyhow!("authentication response carried no access token"))?;

        self.tokens.save(&token).await?;

        Ok(grant)
    }
}

fn credentials_form(username: &str, password: &str) -> Vec<(String, String)> {
    vec![
        ("username".to_string(), username.to_string()),
        ("password".to_string(), password.to_string()),
    ]
}

fn credentials_json(username: &str, password: &str) -> serde_json::Value {
    json!({ "username": username, "password": password })
}

//! Thin client for the remote auth/onboarding API.
//!
//! Stateless apart from the bearer token, which lives in the injected
//! [`TokenStore`]. All calls are single-shot: no retry, no timeout, no
//! cancellation. The `AuthApi` trait is the seam the wizard controller
//! depends on, so tests can script responses without a network.

pub mod model;
mod response;

pub use model::{
    OnboardingStepUpdate, RegisterRequest, SocialProvider, StepStatus, TokenGrant, UserProfile,
};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::store::TokenStore;

/// Operations against the remote auth/onboarding backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account. Never touches the stored token.
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ApiError>;

    /// Exchange credentials for a bearer token. The token is persisted to the
    /// store before returning, but only when the response actually carries one.
    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError>;

    /// Sign in with a provider identity token. Token persistence behaves like
    /// `login`.
    async fn social_sign_in(
        &self,
        provider: SocialProvider,
        id_token: &str,
    ) -> Result<Value, ApiError>;

    /// Fetch the authenticated user's profile.
    async fn current_user(&self) -> Result<UserProfile, ApiError>;

    /// Fetch the onboarding progress map.
    async fn onboarding_progress(&self) -> Result<Value, ApiError>;

    /// Record an onboarding step; returns the server's updated map verbatim.
    /// Step transitions are the controller's decision, never this client's.
    async fn update_onboarding_step(
        &self,
        update: &OnboardingStepUpdate,
    ) -> Result<Value, ApiError>;
}

/// HTTP implementation of [`AuthApi`] over a shared `reqwest::Client`.
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, store: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    /// Bearer header value from the store; `MissingToken` when empty.
    async fn bearer(&self) -> Result<String, ApiError> {
        match self.store.get().await? {
            Some(token) => Ok(format!("Bearer {token}")),
            None => Err(ApiError::MissingToken),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        response::into_result(resp).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ApiError> {
        let value = self
            .send(self.client.post(self.url("/auth/register")).json(request))
            .await?;
        response::typed(value)
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError> {
        let body = json!({ "email": email, "password": password });
        let value = self
            .send(self.client.post(self.url("/auth/login")).json(&body))
            .await?;
        let grant: TokenGrant = response::typed(value)?;
        if let Some(token) = grant.access_token.as_deref() {
            self.store.set(token).await?;
            tracing::debug!("persisted access token from login");
        }
        Ok(grant)
    }

    async fn social_sign_in(
        &self,
        provider: SocialProvider,
        id_token: &str,
    ) -> Result<Value, ApiError> {
        let body = json!({ "provider": provider, "id_token": id_token });
        let value = self
            .send(self.client.post(self.url("/auth/social")).json(&body))
            .await?;
        if let Some(token) = value.get("access_token").and_then(Value::as_str) {
            self.store.set(token).await?;
        }
        Ok(value)
    }

    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let bearer = self.bearer().await?;
        let value = self
            .send(
                self.client
                    .get(self.url("/auth/me"))
                    .header(reqwest::header::AUTHORIZATION, bearer),
            )
            .await?;
        response::typed(value)
    }

    async fn onboarding_progress(&self) -> Result<Value, ApiError> {
        let bearer = self.bearer().await?;
        self.send(
            self.client
                .get(self.url("/onboarding/progress"))
                .header(reqwest::header::AUTHORIZATION, bearer),
        )
        .await
    }

    async fn update_onboarding_step(
        &self,
        update: &OnboardingStepUpdate,
    ) -> Result<Value, ApiError> {
        let bearer = self.bearer().await?;
        self.send(
            self.client
                .post(self.url("/onboarding/step"))
                .header(reqwest::header::AUTHORIZATION, bearer)
                .json(update),
        )
        .await
    }
}

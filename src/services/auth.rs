use serde::Serialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    auth::{self, Claims, ViewSet},
    client::{ApiClient, Service},
    errors::{ClientError, ClientResult},
    models::{LoginCredentials, LoginResponse, VendorSignup},
    session::Session,
};

/// Outcome of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub username: String,
    pub view_set: ViewSet,
}

/// Login, vendor signup and logout against the auth service.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
    jwt_secret: Option<String>,
}

impl AuthService {
    pub fn new(client: ApiClient, jwt_secret: Option<String>) -> Self {
        Self { client, jwt_secret }
    }

    /// Exchanges credentials for a token, stores the session and returns the view set to show.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: LoginCredentials) -> ClientResult<LoginOutcome> {
        credentials.validate()?;

        let url = self.client.url(Service::Auth, &["api", "auth", "login"])?;
        let response: LoginResponse = match self.client.post_anonymous_for(url, &credentials).await {
            Ok(response) => response,
            Err(ClientError::Unauthorized) | Err(ClientError::Forbidden) => {
                return Err(ClientError::InvalidCredentials)
            }
            Err(err) => return Err(err),
        };

        if response.token.trim().is_empty() {
            return Err(ClientError::Token("login response carried an empty token".into()));
        }

        let view_set = auth::view_set_for_token(&response.token, self.jwt_secret.as_deref());
        self.client
            .session()
            .save(&Session::new(credentials.username.trim(), response.token))
            .await?;

        info!(%view_set, "login successful");
        Ok(LoginOutcome {
            username: credentials.username.trim().to_string(),
            view_set,
        })
    }

    /// Registers a vendor account. The vendor still has to log in afterwards.
    #[instrument(skip(self, signup), fields(username = %signup.username))]
    pub async fn signup(&self, signup: VendorSignup) -> ClientResult<()> {
        signup.validate()?;

        let url = self
            .client
            .url(Service::Auth, &["api", "auth", "vendor", "signup"])?;
        self.client.post_anonymous(url, &signup).await?;

        info!("vendor account created");
        Ok(())
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.client.session().clear().await?;
        info!("logged out");
        Ok(())
    }

    pub async fn view_set(&self) -> ViewSet {
        auth::resolve_view_set(self.client.session().as_ref(), self.jwt_secret.as_deref()).await
    }

    /// Claims of the stored token, if any and if readable.
    pub async fn current_claims(&self) -> ClientResult<Option<Claims>> {
        match self.client.session().token().await? {
            Some(token) => auth::parse_token(&token, self.jwt_secret.as_deref()).map(Some),
            None => Ok(None),
        }
    }
}

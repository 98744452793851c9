//! Authentication flow.
//!
//! Login and signup go through the [`RequestGateway`] and always resolve to an
//! [`AuthOutcome`]; transport failures become failure values with a generic
//! message. This is the only code path that writes the [`Session`].

use crate::config::EndpointConfig;
use crate::constants::messages;
use crate::error::Result;
use crate::gateway::RequestGateway;
use crate::models::{
    AuthFailure, AuthOutcome, Credentials, LoginPayload, LoginResponse, Participant,
    SignupFields, SignupPayload, SignupResponse,
};
use crate::navigation::{Navigator, Route};
use crate::session::Session;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct AuthFlow {
    gateway: RequestGateway,
    endpoints: EndpointConfig,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl AuthFlow {
    pub fn new(
        gateway: RequestGateway,
        endpoints: EndpointConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            endpoints,
            session,
            navigator,
        }
    }

    /// Read-only handle to the session this flow writes
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let payload = LoginPayload::from(credentials);
        let response: LoginResponse = match self
            .gateway
            .post_envelope(&self.endpoints.login, &payload, None)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Login error: {}", e);
                return AuthOutcome::Failure(AuthFailure::new(messages::LOGIN_TRANSPORT_FAILURE));
            }
        };

        let message = non_blank(response.message);
        if !response.ok {
            warn!("Login rejected for {}", credentials.codigo_cliente);
            return AuthOutcome::Failure(AuthFailure::new(
                message.unwrap_or_else(|| messages::LOGIN_REJECTED_DEFAULT.to_string()),
            ));
        }

        let (Some(token), Some(participant)) = (non_blank(response.token), response.participant)
        else {
            warn!("Login accepted without token or participant; session not stored");
            return AuthOutcome::Failure(AuthFailure::new(messages::LOGIN_INCOMPLETE));
        };

        if let Err(e) = self.session.store_login(&token, &participant) {
            error!("Could not persist session: {}", e);
            return AuthOutcome::Failure(AuthFailure::new(e.to_string()));
        }

        info!("Logged in as {}", participant.name);
        self.navigator.navigate(Route::Home);
        AuthOutcome::Success {
            message: message.unwrap_or_default(),
            participant: Some(participant),
        }
    }

    pub async fn signup(&self, fields: &SignupFields) -> AuthOutcome {
        let payload = SignupPayload::from(fields);
        let response: SignupResponse = match self
            .gateway
            .post_envelope(&self.endpoints.signup, &payload, None)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Signup error: {}", e);
                return AuthOutcome::Failure(
                    AuthFailure::new(messages::SIGNUP_TRANSPORT_FAILURE).with_field_error(
                        messages::SIGNUP_TRANSPORT_FIELD,
                        messages::SIGNUP_TRANSPORT_FIELD_MESSAGE,
                    ),
                );
            }
        };

        let message = non_blank(response.message);
        if !response.ok {
            warn!("Signup rejected for {}", fields.email);
            return AuthOutcome::Failure(AuthFailure {
                message: message.unwrap_or_else(|| messages::SIGNUP_REJECTED_DEFAULT.to_string()),
                errors: response.errors.unwrap_or_default(),
                code_error: response.code_error,
            });
        }

        info!("Signed up {}", fields.email);
        self.navigator.navigate(Route::Login);
        AuthOutcome::Success {
            message: message.unwrap_or_default(),
            participant: response.participant,
        }
    }

    /// Notify the API, then clear the local session whatever the API answered
    pub async fn logout(&self) -> Result<()> {
        let bearer = self.session.token().unwrap_or_else(|e| {
            warn!("Could not read token before logout: {}", e);
            None
        });

        let notified: Result<Value> = self
            .gateway
            .post(&self.endpoints.logout, &Value::Object(Default::default()), bearer.as_deref())
            .await;
        if let Err(e) = notified {
            error!("Logout error: {}", e);
        }

        clear_local(&self.session, self.navigator.as_ref())
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.session.token()
    }

    pub fn current_user(&self) -> Result<Option<Participant>> {
        self.session.current_user()
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        self.session.is_logged_in()
    }
}

/// Drop the stored session and go to Login without contacting the API
pub fn clear_local(session: &Session, navigator: &dyn Navigator) -> Result<()> {
    session.clear()?;
    info!("Logged out");
    navigator.navigate(Route::Login);
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

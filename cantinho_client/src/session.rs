//! Session store: the bearer token, the phone awaiting verification and the
//! sign-in / sign-up / confirm / sign-out flows.
//!
//! Each flow is split into a synchronous `begin_*` step (format checks, phase
//! change, request payload) and a `finish_*` step that consumes the backend
//! result. The GUI runs the request in between on its runtime; the CLI and
//! tests use the `async` wrappers that chain both.

use thiserror::Error;

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{Credentials, VerifyRequest};
use crate::navigation::Route;
use crate::storage::{read_token, SharedStorage, Storage, TOKEN_KEY};

/// Length of a phone number including the two-digit area code
pub const PHONE_LENGTH: usize = 11;
/// Length of the SMS verification code
pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    SigningIn,
    SigningUp,
    /// Registered or signed in with an unverified phone; waiting for the SMS code
    TokenPending { phone: String },
    Authenticated,
}

// ── Forms ────────────────────────────────────────────────────────────

/// Applies an edit to a phone field: digits only, at most [`PHONE_LENGTH`].
///
/// Returns `false` (leaving the field untouched) when the text is rejected.
pub fn accept_phone_input(field: &mut String, text: &str) -> bool {
    if text.len() > PHONE_LENGTH || !text.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    field.clear();
    field.push_str(text);
    true
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_LENGTH && phone.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInForm {
    pub phone: String,
    pub password: String,
}

impl SignInForm {
    pub fn can_submit(&self) -> bool {
        is_valid_phone(&self.phone) && !self.password.is_empty()
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            phone: self.phone.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn can_submit(&self) -> bool {
        is_valid_phone(&self.phone)
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.password == self.confirm_password
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            phone: self.phone.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmTokenForm {
    pub code: String,
}

impl ConfirmTokenForm {
    pub fn can_submit(&self) -> bool {
        self.code.chars().count() == CODE_LENGTH
    }
}

// ── Flow errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Preencha os dados acima")]
    IncompleteForm,
    #[error("Telefone ou senha incorretos.")]
    WrongCredentials,
    #[error("Telefone não cadastrado.")]
    PhoneNotFound,
    #[error("Telefone não verificado.")]
    PhoneNotVerified,
    #[error("Não foi possível entrar: {0}")]
    Api(ApiError),
}

impl SignInError {
    /// Toast text for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Where the auth stack should go after this failure
    pub fn redirect(&self) -> Option<Route> {
        match self {
            SignInError::PhoneNotVerified => Some(Route::TokenConfirm),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SignUpError {
    #[error("Preencha os dados acima")]
    IncompleteForm,
    #[error("Usuário já cadastrado.")]
    AlreadyRegistered,
    #[error("Não foi possível cadastrar: {0}")]
    Api(ApiError),
}

impl SignUpError {
    /// Toast text for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            SignUpError::AlreadyRegistered => Some(Route::SignIn),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfirmError {
    #[error("Preencha os dados acima")]
    IncompleteForm,
    #[error("Nenhum telefone informado.")]
    NoPendingPhone,
    #[error("Não existe usuário com esse telefone.")]
    PhoneNotFound,
    #[error("Token incorreto.")]
    InvalidCode,
    #[error("Não foi possível confirmar: {0}")]
    Api(ApiError),
}

impl ConfirmError {
    /// Toast text for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            ConfirmError::NoPendingPhone | ConfirmError::PhoneNotFound => Some(Route::SignIn),
            _ => None,
        }
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// Current authentication state, backed by persisted storage.
pub struct Session {
    storage: SharedStorage,
    token: Option<String>,
    pending_phone: Option<String>,
    phase: SessionPhase,
}

impl Session {
    /// Restores the session from storage at start-up.
    pub fn load(storage: SharedStorage) -> Self {
        let token = read_token(storage.as_ref());
        let phase = if token.is_some() {
            log::info!("Restored session token from storage");
            SessionPhase::Authenticated
        } else {
            log::info!("No stored session token");
            SessionPhase::Unauthenticated
        };
        Self {
            storage,
            token,
            pending_phone: None,
            phase,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn pending_phone(&self) -> Option<&str> {
        self.pending_phone.as_deref()
    }

    // ── sign in ──

    pub fn begin_sign_in(&mut self, form: &SignInForm) -> Result<Credentials, SignInError> {
        if !form.can_submit() {
            return Err(SignInError::IncompleteForm);
        }
        self.pending_phone = Some(form.phone.clone());
        self.phase = SessionPhase::SigningIn;
        Ok(form.credentials())
    }

    pub fn finish_sign_in(&mut self, result: ApiResult<String>) -> Result<(), SignInError> {
        match result {
            Ok(token) => {
                self.store_token(token);
                Ok(())
            }
            Err(e) => {
                let err = match e.status_code() {
                    Some(400) => SignInError::WrongCredentials,
                    Some(404) => SignInError::PhoneNotFound,
                    Some(422) => SignInError::PhoneNotVerified,
                    _ => SignInError::Api(e),
                };
                self.phase = match (&err, &self.pending_phone) {
                    (SignInError::PhoneNotVerified, Some(phone)) => SessionPhase::TokenPending {
                        phone: phone.clone(),
                    },
                    _ => SessionPhase::Unauthenticated,
                };
                log::warn!("Sign in failed: {}", err);
                Err(err)
            }
        }
    }

    pub async fn sign_in(&mut self, api: &ApiClient, form: &SignInForm) -> Result<(), SignInError> {
        let credentials = self.begin_sign_in(form)?;
        let result = api.sign_in(&credentials).await;
        self.finish_sign_in(result)
    }

    // ── sign up ──

    pub fn begin_sign_up(&mut self, form: &SignUpForm) -> Result<Credentials, SignUpError> {
        if !form.can_submit() {
            return Err(SignUpError::IncompleteForm);
        }
        self.phase = SessionPhase::SigningUp;
        Ok(form.credentials())
    }

    /// On success the phone becomes pending and the caller routes to
    /// token confirmation.
    pub fn finish_sign_up(&mut self, phone: &str, result: ApiResult<()>) -> Result<(), SignUpError> {
        match result {
            Ok(()) => {
                log::info!("Sign up accepted, waiting for verification code");
                self.pending_phone = Some(phone.to_string());
                self.phase = SessionPhase::TokenPending {
                    phone: phone.to_string(),
                };
                Ok(())
            }
            Err(e) => {
                self.phase = SessionPhase::Unauthenticated;
                let err = match e.status_code() {
                    Some(422) => SignUpError::AlreadyRegistered,
                    _ => SignUpError::Api(e),
                };
                log::warn!("Sign up failed: {}", err);
                Err(err)
            }
        }
    }

    pub async fn sign_up(&mut self, api: &ApiClient, form: &SignUpForm) -> Result<(), SignUpError> {
        let credentials = self.begin_sign_up(form)?;
        let result = api.sign_up(&credentials).await;
        self.finish_sign_up(&credentials.phone, result)
    }

    // ── confirm token ──

    pub fn begin_confirm(&mut self, form: &ConfirmTokenForm) -> Result<VerifyRequest, ConfirmError> {
        let phone = self
            .pending_phone
            .clone()
            .ok_or(ConfirmError::NoPendingPhone)?;
        if !form.can_submit() {
            return Err(ConfirmError::IncompleteForm);
        }
        Ok(VerifyRequest {
            phone,
            verification_token: form.code.clone(),
        })
    }

    pub fn finish_confirm(&mut self, result: ApiResult<String>) -> Result<(), ConfirmError> {
        match result {
            Ok(token) => {
                self.store_token(token);
                Ok(())
            }
            Err(e) => {
                let err = match e.status_code() {
                    Some(404) => ConfirmError::PhoneNotFound,
                    Some(422) => ConfirmError::InvalidCode,
                    _ => ConfirmError::Api(e),
                };
                if matches!(err, ConfirmError::PhoneNotFound) {
                    self.pending_phone = None;
                    self.phase = SessionPhase::Unauthenticated;
                }
                log::warn!("Token confirmation failed: {}", err);
                Err(err)
            }
        }
    }

    pub async fn confirm_token(
        &mut self,
        api: &ApiClient,
        form: &ConfirmTokenForm,
    ) -> Result<(), ConfirmError> {
        let request = self.begin_confirm(form)?;
        let result = api.verify_token(&request).await;
        self.finish_confirm(result)
    }

    /// Marks `phone` as waiting for its SMS code without a preceding
    /// sign-up in this session (e.g. a code received earlier).
    pub fn expect_confirmation(&mut self, phone: &str) {
        self.pending_phone = Some(phone.to_string());
        self.phase = SessionPhase::TokenPending {
            phone: phone.to_string(),
        };
    }

    // ── sign out / token loss ──

    pub fn sign_out(&mut self) {
        log::info!("Signing out");
        self.token = None;
        self.pending_phone = None;
        self.phase = SessionPhase::Unauthenticated;
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            log::error!("Failed to remove stored token: {}", e);
        }
    }

    /// Drops the in-memory token if storage lost it (e.g. after a 401).
    ///
    /// Returns `true` when the session was torn down.
    pub fn sync_with_storage(&mut self) -> bool {
        if self.token.is_some() && read_token(self.storage.as_ref()).is_none() {
            log::warn!("Session token was removed from storage");
            self.token = None;
            self.phase = SessionPhase::Unauthenticated;
            return true;
        }
        false
    }

    fn store_token(&mut self, token: String) {
        if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
            log::error!("Failed to persist session token: {}", e);
        }
        self.token = Some(token);
        self.phase = SessionPhase::Authenticated;
        log::info!("Signed in");
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

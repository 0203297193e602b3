use serde_json::Value;

use crate::auth::session::SessionRepository;
use crate::error::ClientResult;
use crate::models::{LoginRequest, RegisterRequest, Role};
use crate::routes::Route;
use crate::services::api::ApiClient;

/// Sign-in form state.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub form: LoginRequest,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl LoginPage {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            form: LoginRequest {
                email: email.into(),
                password: password.into(),
            },
            ..Self::default()
        }
    }

    /// Signs in and stores the session.
    ///
    /// Returns the landing route for the user's role, or `None` with
    /// `error` set when the attempt failed.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        sessions: &dyn SessionRepository,
    ) -> Option<Route> {
        self.error = None;
        self.is_loading = true;

        let result = self.sign_in(api, sessions).await;
        self.is_loading = false;

        match result {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::warn!("Login failed for {}: {e}", self.form.email);
                self.error = Some(e.to_string());
                None
            }
        }
    }

    async fn sign_in(
        &self,
        api: &ApiClient,
        sessions: &dyn SessionRepository,
    ) -> ClientResult<Route> {
        let data = api.login(&self.form).await?;
        sessions.set_session(&data.token, &data.user)?;
        Ok(Route::for_role(&data.user.role))
    }
}

/// Sign-up form state.
#[derive(Debug)]
pub struct RegisterPage {
    pub form: RegisterRequest,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl RegisterPage {
    /// `role_param` is the `role` query parameter of the page URL.
    pub fn new(role_param: Option<&str>) -> Self {
        let role = match role_param {
            Some("provider") => Role::Provider,
            _ => Role::Customer,
        };

        Self {
            form: RegisterRequest {
                name: String::new(),
                email: String::new(),
                password: String::new(),
                role,
            },
            error: None,
            is_loading: false,
        }
    }

    pub fn select_role(&mut self, role: Role) {
        self.form.role = role;
    }

    pub fn submit_label(&self) -> &'static str {
        match self.form.role {
            Role::Customer => "Sign up as Customer",
            _ => "Sign up as Provider",
        }
    }

    /// Creates the account. Success sends the user to the login page; no
    /// session is stored here.
    pub async fn submit(&mut self, api: &ApiClient) -> Option<Route> {
        self.error = None;
        self.is_loading = true;

        let result: ClientResult<Value> = api.register(&self.form).await;
        self.is_loading = false;

        match result {
            Ok(_) => {
                tracing::info!("Registered {} as {}", self.form.email, self.form.role);
                Some(Route::Login)
            }
            Err(e) => {
                tracing::warn!("Registration failed for {}: {e}", self.form.email);
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

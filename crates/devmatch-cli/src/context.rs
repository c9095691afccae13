//! Shared context, engine construction, and error types for the CLI.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use url::Url;

use devmatch_client::ApiClient;
use devmatch_core::{Credentials, Identity, PageCursor};
use devmatch_engine::{Engine, EngineError};

use crate::output::OutputFormat;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl From<EngineError> for CliError {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::Validation(_) => Self::Validation(error.user_message()),
            EngineError::Remote(_) => Self::Failure(anyhow!(error.user_message())),
        }
    }
}

/// Context handed to command handlers.
pub(crate) struct AppContext {
    pub(crate) api_url: Url,
    pub(crate) timeout: Duration,
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Build an engine starting at the default feed cursor.
    pub(crate) fn engine(&self) -> CliResult<Arc<Engine>> {
        self.engine_with(PageCursor::default())
    }

    /// Build an engine starting at an explicit feed cursor.
    pub(crate) fn engine_with(&self, cursor: PageCursor) -> CliResult<Arc<Engine>> {
        tracing::debug!(url = %self.api_url, "building engine");
        let client = ApiClient::with_timeout(self.api_url.clone(), self.timeout)
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
        Ok(Arc::new(Engine::with_cursor(Arc::new(client), cursor)))
    }

    /// Resolve credentials from flags/environment, prompting for the password
    /// when it was not provided.
    pub(crate) fn credentials(&self) -> CliResult<Credentials> {
        let email = self.email.clone().ok_or_else(|| {
            CliError::validation("email is required (pass --email or set DEVMATCH_EMAIL)")
        })?;
        let password = match self.password.clone() {
            Some(password) => password,
            None => rpassword::prompt_password("Password: ")
                .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?,
        };
        Ok(Credentials { email, password })
    }
}

/// Establish a session for the given engine using the context's credentials.
pub(crate) async fn authenticate(ctx: &AppContext, engine: &Engine) -> CliResult<Identity> {
    let credentials = ctx.credentials()?;
    Ok(engine.login(&credentials).await?)
}

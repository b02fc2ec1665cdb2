use axum::http::StatusCode;
use thiserror::Error;

/// The screen an error is reported on; picks the fallback wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Schedule,
    ClassDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Network,
    Application,
    Validation,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("API URL not set (APP_API_URL)")]
    Config,
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API reported failure: {}", .0.as_deref().unwrap_or("no message"))]
    Application(Option<String>),
    #[error("{0}")]
    Validation(&'static str),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config => ErrorKind::Config,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Application(_) => ErrorKind::Application,
            AppError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Text shown to the user.
    pub fn display_message(&self, view: View) -> String {
        match self {
            AppError::Config => self.to_string(),
            AppError::Network(_) => match view {
                View::Login => "Login failed",
                View::Schedule => "Could not load classes",
                View::ClassDetail => "Failed to load class details",
            }
            .to_string(),
            AppError::Application(Some(message)) if !message.is_empty() => message.clone(),
            AppError::Application(_) => match view {
                View::Login => "Login failed",
                View::Schedule => "Unknown error",
                View::ClassDetail => "Failed to load class",
            }
            .to_string(),
            AppError::Validation(message) => (*message).to_string(),
        }
    }

    pub fn status(&self, view: View) -> StatusCode {
        match (self.kind(), view) {
            (ErrorKind::Config, _) => StatusCode::INTERNAL_SERVER_ERROR,
            (ErrorKind::Validation, _) => StatusCode::UNPROCESSABLE_ENTITY,
            (ErrorKind::Application, View::Login) => StatusCode::UNAUTHORIZED,
            (ErrorKind::Network | ErrorKind::Application, _) => StatusCode::BAD_GATEWAY,
        }
    }
}

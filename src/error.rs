use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("no search result with id {id} for {query:?}")]
    NoMatchingCandidate { id: i32, query: String },

    #[error("{0:?} is already on your list")]
    DuplicateTitle(String),

    #[error("search result {id} cannot be added: {reason}")]
    InvalidCandidate { id: i32, reason: &'static str },

    #[error("movie search failed: {0}")]
    ExternalService(#[from] wreq::Error),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::NoMatchingCandidate { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateTitle(_) => StatusCode::CONFLICT,
            AppError::InvalidCandidate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            if matches!(self, AppError::ExternalService(_)) {
                self.to_string()
            } else {
                "Something went wrong. Please try again.".to_string()
            }
        } else {
            tracing::debug!(error = %self, "request rejected");
            self.to_string()
        };

        let body = crate::templates::error_page(status, &message);
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::{flow::TransitionError, web::page::Notice};

/// Request-level failures that never reach the completion service.
///
/// A failed completion is not an `AppError`: it still renders the full page,
/// see [`crate::web`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("invalid form input: {0}")]
    InvalidForm(#[from] FormRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Transition(TransitionError::Busy)
            | AppError::Transition(TransitionError::NothingToRegenerate) => StatusCode::CONFLICT,
            AppError::Transition(TransitionError::Unexpected { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::Transition(TransitionError::Busy) => {
                "이미 메뉴를 고민하는 중입니다. 잠시 후 다시 시도해주세요."
            }
            AppError::Transition(TransitionError::NothingToRegenerate) => {
                "먼저 위에서 '메뉴 추천 받기'를 눌러주세요."
            }
            AppError::Transition(TransitionError::Unexpected { .. }) => {
                "알 수 없는 오류가 발생했습니다."
            }
            AppError::InvalidForm(_) => "입력값을 확인해주세요.",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::info!(error = %self, %status, "request refused");
        }

        let notice = Notice {
            message: self.message(),
            detail: self.to_string(),
        };
        (status, Html(notice.to_string())).into_response()
    }
}

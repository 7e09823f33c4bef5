use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::ai::AiError;
use crate::core::DurakError;
use crate::session::SessionError;

/// JSON body of every error reply.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub detail: String,
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl HttpError {
    pub fn bad_request(code: &'static str, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HttpError::BadRequest { code, .. } => *code,
            HttpError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            HttpError::BadRequest { detail, .. } | HttpError::Internal { detail } => detail,
        }
    }
}

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        let detail = err.to_string();
        match err {
            SessionError::Rules(DurakError::IllegalAction { .. }) => {
                HttpError::bad_request("ILLEGAL_ACTION", detail)
            }
            SessionError::Rules(DurakError::InvalidCard(_)) => {
                HttpError::bad_request("INVALID_CARD", detail)
            }
            SessionError::UnknownMetaAction(_) => {
                HttpError::bad_request("UNKNOWN_META_ACTION", detail)
            }
            SessionError::NotYourTurn { .. } => HttpError::bad_request("NOT_YOUR_TURN", detail),
            SessionError::Ai(AiError::GameOver) => HttpError::bad_request("GAME_OVER", detail),
            SessionError::Rules(_) | SessionError::Ai(_) => HttpError::internal(detail),
        }
    }
}

impl ResponseError for HttpError {
    fn status_code(&self) -> StatusCode {
        match self {
            HttpError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            HttpError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code().to_string(),
            detail: self.detail().to_string(),
        })
    }
}

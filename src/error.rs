use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

pub const INVALID_URL_MESSAGE: &str =
    "올바른 유튜브 채널 URL을 입력해주세요. (예: https://youtube.com/@channelname)";
pub const LOOKUP_FAILED_MESSAGE: &str = "채널 정보를 가져오는데 실패했습니다.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid channel url: {0}")]
    InvalidChannelUrl(String),
    #[error("channel API returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("channel API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("channel API response could not be decoded: {0}")]
    Decode(String),
    #[error("analysis requested without channel data")]
    MissingAnalysisState,
}

impl AppError {
    /// Message safe to show inline next to the form
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidChannelUrl(_) => INVALID_URL_MESSAGE.to_string(),
            AppError::Upstream { message, .. } if !message.is_empty() => message.clone(),
            _ => LOOKUP_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidChannelUrl(_) | AppError::MissingAnalysisState => {
                StatusCode::BAD_REQUEST
            }
            AppError::Upstream { .. } | AppError::Transport(_) | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (
            status,
            Json(json!({
                "success": false,
                "error": self.user_message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::InvalidChannelUrl("x".into()).user_message(),
            INVALID_URL_MESSAGE
        );
        assert_eq!(
            AppError::Upstream { status: 404, message: "채널을 찾을 수 없습니다".into() }.user_message(),
            "채널을 찾을 수 없습니다"
        );
        assert_eq!(
            AppError::Upstream { status: 500, message: String::new() }.user_message(),
            LOOKUP_FAILED_MESSAGE
        );
        assert_eq!(AppError::Decode("eof".into()).status_code(), StatusCode::BAD_GATEWAY);
    }
}

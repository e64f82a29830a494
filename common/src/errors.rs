use serde::Deserialize;
use std::io;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 服务端错误响应体，形如 `{ "message": "..." }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 客户端错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // ==== 常规业务错误 ====
    #[error("Bad request: {0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized(Option<String>),

    #[error("Api error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    // ==== 系统错误 ====
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 根据非 2xx 响应构建错误，401 单独区分
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        if status == 401 {
            AppError::Unauthorized(message)
        } else {
            AppError::Api { status, message }
        }
    }

    /// 服务端返回的提示信息（若有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Unauthorized(message) | AppError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP 状态码；传输层错误没有状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized(_) => Some(401),
            AppError::Api { status, .. } => Some(*status),
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("参数验证失败: {}", e))
    }
}

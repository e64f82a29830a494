use common::UserId;
use common::util::validate::validate_not_blank;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// 登录 / 注册请求体
#[derive(Clone, Serialize, Validate)]
pub struct Credentials {
    #[validate(custom(function = "validate_not_blank"))]
    pub username: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).field("password", &"***").finish()
    }
}

/// 登录 / 注册响应
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub token: String,
    pub user_id: UserId,
}

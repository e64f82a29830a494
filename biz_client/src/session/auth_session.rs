use common::UserId;
use common::util::date_util;
use std::fmt;

/// 登录态：登录 / 注册成功时创建，登出时丢弃。
/// 所有需要鉴权的接口都显式接收它，而不是读取全局存储。
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
    pub created_at: i64,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, user_id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            username: username.into(),
            created_at: date_util::now(),
        }
    }

    /// `Authorization` 头的取值
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

pub mod http_api;

use crate::entitys::auth_entity::{AuthToken, Credentials};
use crate::entitys::friend_recommendation::FriendRecommendation;
use crate::entitys::friend_request::{FriendRequest, RequestDecision};
use crate::entitys::user_entity::User;
use crate::session::AuthSession;
use async_trait::async_trait;
use common::{AppResult, UserId};

pub use http_api::HttpApiClient;

/// 鉴权接口（无需登录态）
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// POST /api/auth/login
    async fn login(&self, credentials: &Credentials) -> AppResult<AuthToken>;
    /// POST /api/auth/register
    async fn register(&self, credentials: &Credentials) -> AppResult<AuthToken>;
}

/// 好友相关接口，每次调用都携带登录态
#[async_trait]
pub trait FriendApi: Send + Sync {
    /// 按用户名搜索用户
    async fn search_users(&self, session: &AuthSession, query: &str) -> AppResult<Vec<User>>;
    /// 获取好友列表
    async fn list_friends(&self, session: &AuthSession) -> AppResult<Vec<User>>;
    /// 获取收到的好友请求
    async fn list_requests(&self, session: &AuthSession) -> AppResult<Vec<FriendRequest>>;
    /// 获取推荐好友
    async fn list_recommendations(&self, session: &AuthSession) -> AppResult<Vec<FriendRecommendation>>;
    /// 发送好友请求
    async fn send_request(&self, session: &AuthSession, user_id: &UserId) -> AppResult<()>;
    /// 同意 / 拒绝来自 `user_id` 的好友请求
    async fn respond_request(&self, session: &AuthSession, user_id: &UserId, decision: RequestDecision) -> AppResult<()>;
    /// 删除好友
    async fn remove_friend(&self, session: &AuthSession, user_id: &UserId) -> AppResult<()>;
}

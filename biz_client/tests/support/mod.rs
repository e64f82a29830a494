#![allow(dead_code)]

pub mod stub_server;

use async_trait::async_trait;
use biz_client::api::{AuthApi, FriendApi};
use biz_client::entitys::auth_entity::{AuthToken, Credentials};
use biz_client::entitys::friend_recommendation::FriendRecommendation;
use biz_client::entitys::friend_request::{FriendRequest, RequestDecision, RequestStatus};
use biz_client::entitys::user_entity::User;
use biz_client::manager::{ChannelNotifier, FriendHomeController, Notice};
use biz_client::session::AuthSession;
use common::{AppError, AppResult, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    Register(String),
    Search(String),
    ListFriends,
    ListRequests,
    ListRecommendations,
    SendRequest(UserId),
    Respond(UserId, RequestDecision),
    RemoveFriend(UserId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Login,
    Register,
    Search,
    ListFriends,
    ListRequests,
    ListRecommendations,
    SendRequest,
    Respond,
    RemoveFriend,
}

#[derive(Debug, Clone)]
pub enum Failure {
    /// 服务端返回非 2xx
    Status(u16, Option<String>),
    /// 没有状态码的本地 / 传输错误
    Transport,
}

/// 内存版服务端：记录调用，模拟好友关系变化，可按操作注入失败
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    tokens: Mutex<Vec<String>>,
    failures: Mutex<HashMap<Op, Failure>>,
    delays: Mutex<HashMap<Op, Duration>>,
    pub accounts: Mutex<HashMap<String, String>>,
    pub directory: Mutex<Vec<User>>,
    pub friends: Mutex<Vec<User>>,
    pub requests: Mutex<Vec<FriendRequest>>,
    pub recommendations: Mutex<Vec<FriendRecommendation>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, op: Op, failure: Failure) {
        self.failures.lock().unwrap().insert(op, failure);
    }

    pub fn heal(&self, op: Op) {
        self.failures.lock().unwrap().remove(&op);
    }

    pub fn delay(&self, op: Op, delay: Duration) {
        self.delays.lock().unwrap().insert(op, delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn add_account(&self, username: &str, password: &str) {
        self.accounts.lock().unwrap().insert(username.to_string(), password.to_string());
    }

    pub fn add_request(&self, id: &str, from: User) {
        self.requests.lock().unwrap().push(FriendRequest { id: id.to_string(), from, status: RequestStatus::Pending });
    }

    pub fn add_recommendation(&self, user: User, mutual_friends: u32) {
        self.recommendations.lock().unwrap().push(FriendRecommendation { user, mutual_friends });
    }

    async fn enter(&self, op: Op, call: Call, session: Option<&AuthSession>) -> AppResult<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(session) = session {
            self.tokens.lock().unwrap().push(session.token.clone());
        }
        let delay = self.delays.lock().unwrap().get(&op).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failures.lock().unwrap().get(&op).cloned();
        match failure {
            None => Ok(()),
            Some(Failure::Status(401, message)) => Err(AppError::Unauthorized(message)),
            Some(Failure::Status(status, message)) => Err(AppError::Api { status, message }),
            Some(Failure::Transport) => Err(AppError::Internal("connection refused".to_string())),
        }
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> AppResult<AuthToken> {
        self.enter(Op::Login, Call::Login(credentials.username.clone()), None).await?;
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(&credentials.username) {
            Some(password) if *password == credentials.password => Ok(AuthToken {
                token: format!("token-{}", credentials.username),
                user_id: format!("id-{}", credentials.username),
            }),
            _ => Err(AppError::Unauthorized(Some("Invalid credentials".to_string()))),
        }
    }

    async fn register(&self, credentials: &Credentials) -> AppResult<AuthToken> {
        self.enter(Op::Register, Call::Register(credentials.username.clone()), None).await?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&credentials.username) {
            return Err(AppError::Api { status: 400, message: Some("Username already exists".to_string()) });
        }
        accounts.insert(credentials.username.clone(), credentials.password.clone());
        Ok(AuthToken { token: format!("token-{}", credentials.username), user_id: format!("id-{}", credentials.username) })
    }
}

#[async_trait]
impl FriendApi for FakeApi {
    async fn search_users(&self, session: &AuthSession, query: &str) -> AppResult<Vec<User>> {
        self.enter(Op::Search, Call::Search(query.to_string()), Some(session)).await?;
        let directory = self.directory.lock().unwrap();
        Ok(directory.iter().filter(|u| u.username.contains(query)).cloned().collect())
    }

    async fn list_friends(&self, session: &AuthSession) -> AppResult<Vec<User>> {
        self.enter(Op::ListFriends, Call::ListFriends, Some(session)).await?;
        Ok(self.friends.lock().unwrap().clone())
    }

    async fn list_requests(&self, session: &AuthSession) -> AppResult<Vec<FriendRequest>> {
        self.enter(Op::ListRequests, Call::ListRequests, Some(session)).await?;
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn list_recommendations(&self, session: &AuthSession) -> AppResult<Vec<FriendRecommendation>> {
        self.enter(Op::ListRecommendations, Call::ListRecommendations, Some(session)).await?;
        Ok(self.recommendations.lock().unwrap().clone())
    }

    async fn send_request(&self, session: &AuthSession, user_id: &UserId) -> AppResult<()> {
        self.enter(Op::SendRequest, Call::SendRequest(user_id.clone()), Some(session)).await?;
        self.recommendations.lock().unwrap().retain(|r| r.user.id != *user_id);
        Ok(())
    }

    async fn respond_request(&self, session: &AuthSession, user_id: &UserId, decision: RequestDecision) -> AppResult<()> {
        self.enter(Op::Respond, Call::Respond(user_id.clone(), decision), Some(session)).await?;
        let mut requests = self.requests.lock().unwrap();
        let from = requests.iter().find(|r| r.from.id == *user_id).map(|r| r.from.clone());
        requests.retain(|r| r.from.id != *user_id);
        if let (Some(from), RequestDecision::Accepted) = (from, decision) {
            self.recommendations.lock().unwrap().retain(|r| r.user.id != from.id);
            self.friends.lock().unwrap().push(from);
        }
        Ok(())
    }

    async fn remove_friend(&self, session: &AuthSession, user_id: &UserId) -> AppResult<()> {
        self.enter(Op::RemoveFriend, Call::RemoveFriend(user_id.clone()), Some(session)).await?;
        self.friends.lock().unwrap().retain(|u| u.id != *user_id);
        Ok(())
    }
}

pub fn session() -> Arc<AuthSession> {
    Arc::new(AuthSession::new("token-me", "id-me", "me"))
}

pub fn home(api: &Arc<FakeApi>) -> (FriendHomeController, UnboundedReceiver<Notice>) {
    let (notifier, rx) = ChannelNotifier::new();
    let controller = FriendHomeController::new(api.clone(), session(), Arc::new(notifier));
    (controller, rx)
}

pub fn drain(rx: &mut UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut out = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        out.push(notice);
    }
    out
}

pub fn messages(rx: &mut UnboundedReceiver<Notice>) -> Vec<String> {
    drain(rx).into_iter().map(|n| n.message).collect()
}

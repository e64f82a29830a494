use crate::api::FriendApi;
use crate::entitys::friend_request::RequestDecision;
use crate::manager::home_state::{HomeState, Section};
use crate::manager::notifier::{Notice, Notifier};
use crate::session::AuthSession;
use async_trait::async_trait;
use common::{AppError, AppResult, UserId};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// 首页控制器：维护搜索结果、好友、好友请求、推荐四个集合。
///
/// 所有操作内部吞掉远程错误并通过 [`Notifier`] 提示，状态保持最近一次成功的值。
/// 克隆后共享同一份状态，可并发调用。
#[derive(Clone)]
pub struct FriendHomeController {
    api: Arc<dyn FriendApi>,
    session: Arc<AuthSession>,
    notifier: Arc<dyn Notifier>,
    state: Arc<RwLock<HomeState>>,
    cancel: CancellationToken,
}

/// 首页控制器行为抽象
#[async_trait]
pub trait FriendHomeControllerOpt: Send + Sync {
    /// 并发加载好友、好友请求、推荐
    async fn mount(&self);
    /// 搜索用户，空白关键字直接忽略
    async fn search(&self, query: &str);
    /// 发送好友请求（先移除搜索结果，失败回滚）
    async fn send_friend_request(&self, user_id: &UserId);
    /// 同意 / 拒绝好友请求
    async fn respond_to_request(&self, user_id: &UserId, decision: RequestDecision);
    /// 删除好友
    async fn remove_friend(&self, user_id: &UserId);
    /// 当前状态快照
    async fn snapshot(&self) -> HomeState;
    /// 卸载，之后到达的响应不再修改状态
    fn unmount(&self);
}

impl FriendHomeController {
    pub fn new(api: Arc<dyn FriendApi>, session: Arc<AuthSession>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            session,
            notifier,
            state: Arc::new(RwLock::new(HomeState::default())),
            cancel: CancellationToken::new(),
        }
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub async fn refresh_friends(&self) {
        let api = self.api.clone();
        let session = self.session.clone();
        self.load(Section::Friends, async move { api.list_friends(&session).await }, |state, friends| {
            state.friends = friends;
        })
        .await;
    }

    pub async fn refresh_requests(&self) {
        let api = self.api.clone();
        let session = self.session.clone();
        self.load(Section::Requests, async move { api.list_requests(&session).await }, HomeState::replace_requests)
            .await;
    }

    pub async fn refresh_recommendations(&self) {
        let api = self.api.clone();
        let session = self.session.clone();
        self.load(
            Section::Recommendations,
            async move { api.list_recommendations(&session).await },
            |state, recommendations| {
                state.recommendations = recommendations;
            },
        )
        .await;
    }

    /// 加载一个集合：登记进行中的请求，成功替换，失败提示，结束时注销
    async fn load<T, Fut, F>(&self, section: Section, fetch: Fut, store: F)
    where
        Fut: Future<Output = AppResult<T>>,
        F: FnOnce(&mut HomeState, T),
    {
        if !self.is_mounted() {
            return;
        }
        self.state.write().await.loading.begin(section);

        let result = fetch.await;
        if !self.is_mounted() {
            debug!("{:?} response dropped after unmount", section);
            return;
        }

        let mut state = self.state.write().await;
        state.loading.finish(section);
        match result {
            Ok(value) => store(&mut *state, value),
            Err(e) => {
                warn!("load {:?} failed: {}", section, e);
                if e.is_unauthorized() {
                    state.session_expired = true;
                }
                drop(state);
                self.notifier.notify(Notice::error(section.failure_message()));
            }
        }
    }

    /// 失败后统一处理：记录 401，发出提示
    async fn report_failure(&self, e: &AppError, message: String) {
        if !self.is_mounted() {
            return;
        }
        if e.is_unauthorized() {
            self.state.write().await.session_expired = true;
        }
        self.notifier.notify(Notice::error(message));
    }

    /// 服务端给出明确答复（非 401）时，本地状态可能已与服务端不一致
    fn needs_reconcile(e: &AppError) -> bool {
        matches!(e, AppError::Api { .. })
    }
}

#[async_trait]
impl FriendHomeControllerOpt for FriendHomeController {
    async fn mount(&self) {
        info!("mount home for {}", self.session.username);
        tokio::join!(self.refresh_friends(), self.refresh_recommendations(), self.refresh_requests());
    }

    async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let api = self.api.clone();
        let session = self.session.clone();
        let q = query.to_string();
        let ticket = self.state.write().await.begin_search();
        self.load(Section::Search, async move { api.search_users(&session, &q).await }, move |state, users| {
            if state.is_latest_search(ticket) {
                state.replace_search_results(users);
            } else {
                debug!("stale search #{} dropped", ticket);
            }
        })
        .await;
    }

    async fn send_friend_request(&self, user_id: &UserId) {
        if !self.is_mounted() {
            return;
        }
        let tentative = self.state.write().await.remove_search_result(user_id);

        match self.api.send_request(&self.session, user_id).await {
            Ok(()) => {
                if !self.is_mounted() {
                    return;
                }
                self.notifier.notify(Notice::success("Friend request sent successfully"));
                self.refresh_recommendations().await;
            }
            Err(e) => {
                warn!("send friend request to {} failed: {}", user_id, e);
                if let Some(removal) = tentative {
                    if self.is_mounted() && !self.state.write().await.restore_search_result(removal) {
                        debug!("search results replaced meanwhile, {} not restored", user_id);
                    }
                }
                let message = e.server_message().unwrap_or("Failed to send friend request").to_string();
                self.report_failure(&e, message).await;
            }
        }
    }

    async fn respond_to_request(&self, user_id: &UserId, decision: RequestDecision) {
        if !self.is_mounted() {
            return;
        }
        match self.api.respond_request(&self.session, user_id, decision).await {
            Ok(()) => {
                if !self.is_mounted() {
                    return;
                }
                if decision.is_accepted() {
                    self.notifier.notify(Notice::success("Friend request accepted"));
                    tokio::join!(self.refresh_requests(), self.refresh_friends(), self.refresh_recommendations());
                } else {
                    self.notifier.notify(Notice::success("Friend request rejected"));
                    self.refresh_requests().await;
                }
            }
            Err(e) => {
                warn!("respond {:?} to {} failed: {}", decision, user_id, e);
                self.report_failure(&e, "Failed to handle friend request".to_string()).await;
                if Self::needs_reconcile(&e) {
                    self.refresh_requests().await;
                }
            }
        }
    }

    async fn remove_friend(&self, user_id: &UserId) {
        if !self.is_mounted() {
            return;
        }
        match self.api.remove_friend(&self.session, user_id).await {
            Ok(()) => {
                if !self.is_mounted() {
                    return;
                }
                self.notifier.notify(Notice::success("Friend removed successfully"));
                tokio::join!(self.refresh_friends(), self.refresh_recommendations());
            }
            Err(e) => {
                warn!("remove friend {} failed: {}", user_id, e);
                self.report_failure(&e, "Failed to remove friend".to_string()).await;
                if Self::needs_reconcile(&e) {
                    self.refresh_friends().await;
                }
            }
        }
    }

    async fn snapshot(&self) -> HomeState {
        self.state.read().await.clone()
    }

    fn unmount(&self) {
        self.cancel.cancel();
    }
}

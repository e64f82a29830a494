use crate::api::AuthApi;
use crate::entitys::auth_entity::Credentials;
use crate::manager::notifier::{Notice, Notifier};
use crate::session::AuthSession;
use common::AppResult;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthKind {
    Login,
    Register,
}

impl AuthKind {
    fn success_message(self) -> &'static str {
        match self {
            AuthKind::Login => "Login successful!",
            AuthKind::Register => "Registration successful!",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            AuthKind::Login => "Login failed",
            AuthKind::Register => "Registration failed",
        }
    }
}

/// 登录 / 注册表单逻辑，持有当前登录态
pub struct AuthController {
    api: Arc<dyn AuthApi>,
    notifier: Arc<dyn Notifier>,
    session: RwLock<Option<Arc<AuthSession>>>,
}

impl AuthController {
    pub fn new(api: Arc<dyn AuthApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier, session: RwLock::new(None) }
    }

    pub async fn login(&self, username: &str, password: &str) -> Option<Arc<AuthSession>> {
        self.submit(AuthKind::Login, Credentials::new(username.trim(), password)).await
    }

    /// 注册成功即视为已登录
    pub async fn register(&self, username: &str, password: &str) -> Option<Arc<AuthSession>> {
        self.submit(AuthKind::Register, Credentials::new(username.trim(), password)).await
    }

    pub async fn logout(&self) {
        if let Some(session) = self.session.write().await.take() {
            info!("logout {}", session.username);
        }
    }

    pub async fn current_session(&self) -> Option<Arc<AuthSession>> {
        self.session.read().await.clone()
    }

    async fn submit(&self, kind: AuthKind, credentials: Credentials) -> Option<Arc<AuthSession>> {
        if let Err(e) = credentials.validate() {
            warn!("{:?} rejected locally: {}", kind, e);
            self.notifier.notify(Notice::error("Username and password are required"));
            return None;
        }

        match self.call(kind, &credentials).await {
            Ok(session) => {
                info!("{:?} ok for {}", kind, session.username);
                *self.session.write().await = Some(session.clone());
                self.notifier.notify(Notice::success(kind.success_message()));
                Some(session)
            }
            Err(e) => {
                warn!("{:?} failed for {}: {}", kind, credentials.username, e);
                let message = e.server_message().unwrap_or(kind.failure_message());
                self.notifier.notify(Notice::error(message));
                None
            }
        }
    }

    async fn call(&self, kind: AuthKind, credentials: &Credentials) -> AppResult<Arc<AuthSession>> {
        let token = match kind {
            AuthKind::Login => self.api.login(credentials).await?,
            AuthKind::Register => self.api.register(credentials).await?,
        };
        Ok(Arc::new(AuthSession::new(token.token, token.user_id, credentials.username.clone())))
    }
}

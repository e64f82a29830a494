use crate::handlers::{AUTH_HELP, Command, HOME_HELP, auth_handler, home_handler};
use crate::result::{render_home, render_notice};
use biz_client::api::{AuthApi, FriendApi};
use biz_client::manager::{AuthController, ChannelNotifier, FriendHomeController, FriendHomeControllerOpt, Notice, Notifier};
use biz_client::session::AuthSession;
use common::AppError;
use log::info;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 终端会话：未登录时处理登录 / 注册，登录后挂载首页控制器
pub struct Shell {
    auth: AuthController,
    friend_api: Arc<dyn FriendApi>,
    notifier: Arc<dyn Notifier>,
    notices: UnboundedReceiver<Notice>,
    home: Option<FriendHomeController>,
}

impl Shell {
    pub fn new(auth_api: Arc<dyn AuthApi>, friend_api: Arc<dyn FriendApi>) -> Self {
        let (notifier, notices) = ChannelNotifier::new();
        let notifier: Arc<dyn Notifier> = Arc::new(notifier);
        Self { auth: AuthController::new(auth_api, notifier.clone()), friend_api, notifier, notices, home: None }
    }

    pub fn is_logged_in(&self) -> bool {
        self.home.is_some()
    }

    pub fn prompt(&self) -> String {
        match &self.home {
            Some(home) => format!("{}> ", home.session().username),
            None => "> ".to_string(),
        }
    }

    pub fn help(&self) -> &'static str {
        if self.is_logged_in() { HOME_HELP } else { AUTH_HELP }
    }

    /// 执行一条命令，返回需要输出的行
    pub async fn execute(&mut self, command: Command) -> (Flow, Vec<String>) {
        let mut out = Vec::new();
        let mut render = false;

        match command {
            Command::Quit => {
                self.leave_home();
                return (Flow::Quit, out);
            }
            Command::Help => out.push(self.help().to_string()),
            Command::Logout if self.is_logged_in() => {
                self.logout().await;
                out.push("Logged out".to_string());
            }
            command => match self.home.clone() {
                None => match auth_handler::handle(&self.auth, command).await {
                    Ok(Some(session)) => {
                        self.enter_home(session).await;
                        render = true;
                    }
                    Ok(None) => {}
                    Err(e) => out.push(describe(&e)),
                },
                Some(home) => match home_handler::handle(&home, command).await {
                    Ok(()) => render = true,
                    Err(e) => out.push(describe(&e)),
                },
            },
        }

        while let Ok(notice) = self.notices.try_recv() {
            out.push(render_notice(&notice));
        }

        if let Some(home) = self.home.clone() {
            let state = home.snapshot().await;
            if state.session_expired {
                self.logout().await;
                out.push("Session expired, please log in again".to_string());
            } else if render {
                out.push(render_home(&state, &home.session().username));
            }
        }
        (Flow::Continue, out)
    }

    async fn enter_home(&mut self, session: Arc<AuthSession>) {
        let home = FriendHomeController::new(self.friend_api.clone(), session, self.notifier.clone());
        home.mount().await;
        self.home = Some(home);
    }

    fn leave_home(&mut self) {
        if let Some(home) = self.home.take() {
            home.unmount();
        }
    }

    async fn logout(&mut self) {
        self.leave_home();
        self.auth.logout().await;
        info!("back to login screen");
    }
}

pub fn describe(e: &AppError) -> String {
    match e {
        AppError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}

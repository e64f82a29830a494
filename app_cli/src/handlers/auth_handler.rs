use crate::handlers::Command;
use biz_client::manager::AuthController;
use biz_client::session::AuthSession;
use common::{AppError, AppResult};
use std::sync::Arc;

/// 未登录状态下的命令：登录 / 注册
pub async fn handle(auth: &AuthController, command: Command) -> AppResult<Option<Arc<AuthSession>>> {
    match command {
        Command::Login { username, password } => Ok(auth.login(&username, &password).await),
        Command::Register { username, password } => Ok(auth.register(&username, &password).await),
        other => Err(AppError::Validation(format!("`{}` requires login", other.name()))),
    }
}

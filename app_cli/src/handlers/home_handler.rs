use crate::handlers::Command;
use biz_client::entitys::friend_request::RequestDecision;
use biz_client::manager::{FriendHomeController, FriendHomeControllerOpt};
use common::{AppError, AppResult};

/// 已登录状态下的首页命令
pub async fn handle(home: &FriendHomeController, command: Command) -> AppResult<()> {
    match command {
        Command::Search(query) => home.search(&query).await,
        Command::Add(user_id) => home.send_friend_request(&user_id).await,
        Command::Accept(user_id) => home.respond_to_request(&user_id, RequestDecision::Accepted).await,
        Command::Reject(user_id) => home.respond_to_request(&user_id, RequestDecision::Rejected).await,
        Command::Remove(user_id) => home.remove_friend(&user_id).await,
        Command::Refresh => home.mount().await,
        Command::Show => {}
        Command::Login { .. } | Command::Register { .. } => {
            return Err(AppError::Validation(format!("already logged in as {}, logout first", home.session().username)));
        }
        other => return Err(AppError::Internal(format!("`{}` is not a home command", other.name()))),
    }
    Ok(())
}

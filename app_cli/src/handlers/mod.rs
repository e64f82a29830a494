pub mod auth_handler;
pub mod home_handler;

use common::util::validate::validate_user_id;
use common::{AppError, AppResult, UserId};

/// 终端输入解析后的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Register { username: String, password: String },
    Search(String),
    Add(UserId),
    Accept(UserId),
    Reject(UserId),
    Remove(UserId),
    Refresh,
    Show,
    Logout,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入；空行返回 `None`
    pub fn parse(line: &str) -> AppResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "login" => {
                let (username, password) = credentials(name, rest)?;
                Command::Login { username, password }
            }
            "register" => {
                let (username, password) = credentials(name, rest)?;
                Command::Register { username, password }
            }
            "search" => Command::Search(rest.to_string()),
            "add" => Command::Add(user_id(name, rest)?),
            "accept" => Command::Accept(user_id(name, rest)?),
            "reject" => Command::Reject(user_id(name, rest)?),
            "remove" => Command::Remove(user_id(name, rest)?),
            "refresh" => Command::Refresh,
            "show" => Command::Show,
            "logout" => Command::Logout,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(AppError::Validation(format!("unknown command `{}`, type `help`", other))),
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Register { .. } => "register",
            Command::Search(_) => "search",
            Command::Add(_) => "add",
            Command::Accept(_) => "accept",
            Command::Reject(_) => "reject",
            Command::Remove(_) => "remove",
            Command::Refresh => "refresh",
            Command::Show => "show",
            Command::Logout => "logout",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

fn credentials(name: &str, rest: &str) -> AppResult<(String, String)> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(username), Some(password), None) => Ok((username.to_string(), password.to_string())),
        _ => Err(AppError::Validation(format!("usage: {} <username> <password>", name))),
    }
}

fn user_id(name: &str, rest: &str) -> AppResult<UserId> {
    validate_user_id(rest).map_err(|_| AppError::Validation(format!("usage: {} <user_id>", name)))?;
    Ok(rest.to_string())
}

pub const AUTH_HELP: &str = "\
commands:
  login <username> <password>
  register <username> <password>
  help
  quit";

pub const HOME_HELP: &str = "\
commands:
  search <query>       search users by name
  add <user_id>        send a friend request
  accept <user_id>     accept a friend request
  reject <user_id>     reject a friend request
  remove <user_id>     remove a friend
  refresh              reload friends, requests and recommendations
  show                 print the home view
  logout
  help
  quit";

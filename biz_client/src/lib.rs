//! 好友管理客户端：会话、远程接口与首页状态同步。
pub mod api;
pub mod entitys;
pub mod manager;
pub mod session;

pub mod auth_controller;
pub mod friend_home_controller;
pub mod home_state;
pub mod notifier;

pub use auth_controller::AuthController;
pub use friend_home_controller::{FriendHomeController, FriendHomeControllerOpt};
pub use home_state::{HomeState, LoadingFlags, Section};
pub use notifier::{ChannelNotifier, LogNotifier, Notice, NoticeLevel, Notifier};

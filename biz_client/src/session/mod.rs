pub mod auth_session;

pub use auth_session::AuthSession;

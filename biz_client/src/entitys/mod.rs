pub mod auth_entity;
pub mod friend_recommendation;
pub mod friend_request;
pub mod user_entity;

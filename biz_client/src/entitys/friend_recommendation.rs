use crate::entitys::user_entity::User;
use serde::{Deserialize, Serialize};

/// 推荐好友及共同好友数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRecommendation {
    pub user: User,
    pub mutual_friends: u32,
}

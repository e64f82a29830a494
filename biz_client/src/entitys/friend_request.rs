use crate::entitys::user_entity::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,              // 请求 ID
    pub from: User,              // 发起人
    pub status: RequestStatus,   // 请求状态
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending, // 待处理
    Accepted, // 已同意
    Rejected, // 已拒绝
    #[serde(other)]
    Unknown,
}

/// 对好友请求的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accepted,
    Rejected,
}

impl RequestDecision {
    pub fn is_accepted(self) -> bool {
        matches!(self, RequestDecision::Accepted)
    }
}

/// PUT /api/friends/request/:userId 的请求体
#[derive(Debug, Clone, Serialize)]
pub struct RespondRequestBody {
    pub status: RequestDecision,
}

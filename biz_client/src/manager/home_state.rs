use crate::entitys::friend_recommendation::FriendRecommendation;
use crate::entitys::friend_request::{FriendRequest, RequestStatus};
use crate::entitys::user_entity::User;
use common::UserId;

/// 首页的四个远程集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Search,
    Friends,
    Requests,
    Recommendations,
}

impl Section {
    /// 加载失败时的提示文案
    pub fn failure_message(self) -> &'static str {
        match self {
            Section::Search => "Failed to search users",
            Section::Friends => "Failed to load friends",
            Section::Requests => "Failed to load friend requests",
            Section::Recommendations => "Failed to load recommendations",
        }
    }
}

/// 每个集合进行中的请求数，大于 0 即视为加载中
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    search: u32,
    friends: u32,
    requests: u32,
    recommendations: u32,
}

impl LoadingFlags {
    fn counter(&mut self, section: Section) -> &mut u32 {
        match section {
            Section::Search => &mut self.search,
            Section::Friends => &mut self.friends,
            Section::Requests => &mut self.requests,
            Section::Recommendations => &mut self.recommendations,
        }
    }

    pub fn begin(&mut self, section: Section) {
        *self.counter(section) += 1;
    }

    pub fn finish(&mut self, section: Section) {
        let counter = self.counter(section);
        *counter = counter.saturating_sub(1);
    }

    pub fn get(&self, section: Section) -> bool {
        let in_flight = match section {
            Section::Search => self.search,
            Section::Friends => self.friends,
            Section::Requests => self.requests,
            Section::Recommendations => self.recommendations,
        };
        in_flight > 0
    }
}

/// 发送好友请求前，从搜索结果中暂时移除的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TentativeRemoval {
    pub user: User,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub search_results: Vec<User>,
    pub friends: Vec<User>,
    pub requests: Vec<FriendRequest>,
    pub recommendations: Vec<FriendRecommendation>,
    pub loading: LoadingFlags,
    /// 每次搜索结果被整体替换时递增
    pub search_generation: u64,
    /// 已发出的搜索序号，只有最新一次的响应会被采用
    pub search_issued: u64,
    /// 本代搜索结果的原始顺序，回滚时按它放回
    search_order: Vec<UserId>,
    /// 收到过 401
    pub session_expired: bool,
}

impl HomeState {
    pub fn replace_search_results(&mut self, users: Vec<User>) {
        self.search_order = users.iter().map(|u| u.id.clone()).collect();
        self.search_results = users;
        self.search_generation += 1;
    }

    /// 登记一次新搜索，返回它的序号
    pub fn begin_search(&mut self) -> u64 {
        self.search_issued += 1;
        self.search_issued
    }

    pub fn is_latest_search(&self, ticket: u64) -> bool {
        ticket == self.search_issued
    }

    /// 只保留待处理的请求
    pub fn replace_requests(&mut self, requests: Vec<FriendRequest>) {
        self.requests = requests.into_iter().filter(|r| r.status == RequestStatus::Pending).collect();
    }

    /// 第一阶段：从搜索结果中移除 `user_id`，返回回滚所需信息
    pub fn remove_search_result(&mut self, user_id: &str) -> Option<TentativeRemoval> {
        let index = self.search_results.iter().position(|u| u.id == user_id)?;
        let user = self.search_results.remove(index);
        Some(TentativeRemoval { user, generation: self.search_generation })
    }

    /// 回滚：搜索结果未被替换且用户不在列表中时，按原始顺序放回
    pub fn restore_search_result(&mut self, removal: TentativeRemoval) -> bool {
        if removal.generation != self.search_generation {
            return false;
        }
        if self.search_results.iter().any(|u| u.id == removal.user.id) {
            return false;
        }
        let rank = |id: &str| self.search_order.iter().position(|o| o == id).unwrap_or(usize::MAX);
        let own = rank(&removal.user.id);
        let index = self
            .search_results
            .iter()
            .position(|u| rank(&u.id) > own)
            .unwrap_or(self.search_results.len());
        self.search_results.insert(index, removal.user);
        true
    }
}

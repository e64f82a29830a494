use biz_client::entitys::user_entity::User;
use biz_client::manager::{HomeState, Notice, NoticeLevel, Section};
use common::util::date_util::time_to_str;
use std::fmt::Write;

/// 渲染首页：搜索结果与好友请求为空时不显示
pub fn render_home(state: &HomeState, username: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "==== Social Network - {} ====", username);

    if !state.search_results.is_empty() || state.loading.get(Section::Search) {
        heading(&mut out, "Search Results", state.loading.get(Section::Search));
        for user in &state.search_results {
            user_line(&mut out, user, "");
        }
    }

    if !state.requests.is_empty() || state.loading.get(Section::Requests) {
        heading(&mut out, "Friend Requests", state.loading.get(Section::Requests));
        for request in &state.requests {
            user_line(&mut out, &request.from, "");
        }
    }

    heading(&mut out, "Friends", state.loading.get(Section::Friends));
    if state.friends.is_empty() {
        let _ = writeln!(out, "  No friends yet");
    }
    for friend in &state.friends {
        user_line(&mut out, friend, "");
    }

    heading(&mut out, "Recommended Friends", state.loading.get(Section::Recommendations));
    if state.recommendations.is_empty() {
        let _ = writeln!(out, "  No recommendations available");
    }
    for recommendation in &state.recommendations {
        let mutual = format!("  {} mutual friends", recommendation.mutual_friends);
        user_line(&mut out, &recommendation.user, &mutual);
    }
    out
}

fn heading(out: &mut String, title: &str, loading: bool) {
    if loading {
        let _ = writeln!(out, "-- {} (loading...)", title);
    } else {
        let _ = writeln!(out, "-- {}", title);
    }
}

fn user_line(out: &mut String, user: &User, suffix: &str) {
    let _ = writeln!(out, "  {:<20} [{}]{}", user.username, user.id, suffix);
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    format!("[{}] {}: {}", time_to_str(notice.created_at), tag, notice.message)
}

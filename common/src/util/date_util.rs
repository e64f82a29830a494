use chrono::{DateTime, Local};

/// 当前时间戳（秒）
pub fn now() -> i64 {
    Local::now().timestamp()
}

/// 时间戳转本地时间字符串，非法时间戳返回空串
pub fn time_to_str(time: i64) -> String {
    match DateTime::from_timestamp(time, 0) {
        Some(t) => t.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => String::new(),
    }
}

use common::util::date_util;
use log::{info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// 一条提示消息（对应页面上的 toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: i64,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into(), created_at: date_util::now() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into(), created_at: date_util::now() }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// 提示出口，实现方不得阻塞调用方
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// 仅写日志
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!("[notice] {}", notice.message),
            NoticeLevel::Error => warn!("[notice] {}", notice.message),
        }
    }
}

/// 投递到无界通道，由界面层自行消费
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.tx.send(notice) {
            warn!("notice dropped, receiver gone: {}", e.0.message);
        }
    }
}

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

pub const MSG_LOGGED_OUT: &str = "Вы вышли из аккаунта";

/// Outcome class of a notice, used to pick the toast style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeKind {
    #[default]
    Success,
    Error,
}

/// One-shot toast record. A new notice replaces the previous one wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    pub visible: bool,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { visible: true, kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { visible: true, kind: NoticeKind::Error, message: message.into() }
    }
}

/// Application-wide notification store for pages that have no store of
/// their own.
#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub notice: Notice,
}

impl NoticeState {
    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Notice { visible: true, kind, message: message.into() };
    }

    /// Hide the current notice, keeping its text for fade-out.
    pub fn dismiss(&mut self) {
        self.notice.visible = false;
    }
}

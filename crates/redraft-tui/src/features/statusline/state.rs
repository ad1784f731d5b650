//! Status line state: usage display and transient notices.

use std::time::{Duration, Instant};

use redraft_core::api::{ApiError, Usage};

/// How long a notice such as "Copied" stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UsageDisplay {
    #[default]
    Unknown,
    Loading,
    Loaded(Usage),
    /// Usage failures are reported here only, never in the error panel.
    Failed(String),
}

impl UsageDisplay {
    pub fn label(&self) -> String {
        match self {
            UsageDisplay::Unknown => "usage: -".to_string(),
            UsageDisplay::Loading => "usage: …".to_string(),
            UsageDisplay::Loaded(usage) => format!("usage: {}", usage.summary()),
            UsageDisplay::Failed(reason) => format!("usage unavailable: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct StatusLineState {
    pub usage: UsageDisplay,
    pub notice: Option<Notice>,
}

impl StatusLineState {
    pub fn set_usage_result(&mut self, result: Result<Usage, ApiError>) {
        self.usage = match result {
            Ok(usage) => UsageDisplay::Loaded(usage),
            Err(err) => UsageDisplay::Failed(err.reason()),
        };
    }

    pub fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            expires_at: now + NOTICE_DURATION,
        });
    }

    /// Drops an expired notice. Returns true if one was removed.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
            return true;
        }
        false
    }

    pub fn has_pending_notice(&self) -> bool {
        self.notice.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires() {
        let now = Instant::now();
        let mut status = StatusLineState::default();
        status.notify("Copied", now);

        assert!(!status.expire_notice(now + Duration::from_millis(500)));
        assert!(status.expire_notice(now + NOTICE_DURATION));
        assert!(status.notice.is_none());
    }

    #[test]
    fn test_usage_failure_shows_reason() {
        let mut status = StatusLineState::default();
        let err = ApiError::upstream(403, Some("Forbidden"), r#"{"error":"DeepL API error"}"#);
        status.set_usage_result(Err(err));
        assert_eq!(status.usage.label(), "usage unavailable: DeepL API error");
    }
}

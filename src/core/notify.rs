//! Outgoing notifications.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("no recipient address")]
    NoRecipient,

    #[error("transport failure: {0}")]
    Transport(String),
}

/// A single outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

pub trait Notifier {
    fn send(&self, message: &Notification) -> Result<(), NotifyError>;
}

/// Split a comma-separated address list, dropping blanks.
pub fn parse_cc(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_cc;

    #[test]
    fn cc_list_is_trimmed() {
        assert_eq!(
            parse_cc("a@b.com, c@d.com ,,"),
            vec!["a@b.com".to_string(), "c@d.com".to_string()]
        );
        assert!(parse_cc("").is_empty());
    }
}

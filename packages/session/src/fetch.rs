//! Request tokens and per-target fetch state.

use serde::Serialize;

/// Identifies one issued request. Tokens increase monotonically within a
/// session, so a completion carrying an older token is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing [`RequestToken`]s.
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer {
    last: u64,
}

impl TokenIssuer {
    /// Returns the next token.
    pub const fn issue(&mut self) -> RequestToken {
        self.last += 1;
        RequestToken(self.last)
    }
}

/// Lifecycle of one asynchronous fetch target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading(RequestToken),
    /// The latest request succeeded.
    Ready(T),
    /// The latest request failed.
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> FetchState<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// The loaded value, if ready.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if the latest request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a completion carrying `token` belongs to the request in
    /// flight.
    #[must_use]
    pub fn accepts(&self, token: RequestToken) -> bool {
        matches!(self, Self::Loading(current) if *current == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase() {
        let mut issuer = TokenIssuer::default();
        let a = issuer.issue();
        let b = issuer.issue();
        assert!(b > a);
        assert_eq!(a.get() + 1, b.get());
    }

    #[test]
    fn only_current_token_is_accepted() {
        let mut issuer = TokenIssuer::default();
        let old = issuer.issue();
        let new = issuer.issue();
        let state: FetchState<()> = FetchState::Loading(new);
        assert!(state.accepts(new));
        assert!(!state.accepts(old));
        assert!(!FetchState::<()>::Idle.accepts(new));
        assert!(!FetchState::Ready(()).accepts(new));
    }

    #[test]
    fn serializes_with_status_tag() {
        let state = FetchState::Ready(3);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["value"], 3);
        let json = serde_json::to_value(FetchState::<u8>::Error("down".to_string())).unwrap();
        assert_eq!(json["status"], "error");
    }
}

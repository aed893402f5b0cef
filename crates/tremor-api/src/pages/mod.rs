//! Extraction layer: everything that knows what the site's pages look like.
//!
//! Each submodule covers one page type and exposes pure `parse_*` functions
//! over the raw HTML. Selectors, marker strings, URL patterns and date
//! formats are the site's de facto contract and must match it exactly. When
//! the site changes layout, this module is the only place to update.

pub mod inbox;
pub mod message;
pub mod referrals;
pub mod tos;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{TremorError, TremorResult};
use crate::types::ActionOutcome;

/// Only rendered for authenticated sessions.
pub const LOGOUT_MARKER: &str = "://www.tremorgames.com/Logout.html";

/// Shown by the send form when the recipient does not exist.
pub const INVALID_USER_MARKER: &str = "Invalid User";

/// Whether the page was rendered for a logged-in session.
pub fn is_authenticated(html: &str) -> bool {
    html.contains(LOGOUT_MARKER)
}

/// Outcome of a GET that is only expected to keep the session alive.
pub fn session_outcome(html: &str) -> ActionOutcome {
    if is_authenticated(html) {
        ActionOutcome::Completed
    } else {
        ActionOutcome::SessionLost
    }
}

/// Outcome of the send-message form.
pub fn send_outcome(html: &str) -> ActionOutcome {
    if !is_authenticated(html) {
        ActionOutcome::SessionLost
    } else if html.contains(INVALID_USER_MARKER) {
        ActionOutcome::InvalidRecipient
    } else {
        ActionOutcome::Completed
    }
}

// ── Shared helpers ──────────────────────────────────────────────────────────

/// Parse a selector literal. Selectors here are constants, so a failure is a
/// programming error.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Parse a pattern literal.
pub(crate) fn pattern(re: &'static str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid pattern {re:?}: {e}"))
}

/// First element under `scope` matching `css`.
pub(crate) fn find<'a>(
    scope: ElementRef<'a>,
    css: &'static str,
    what: &'static str,
) -> TremorResult<ElementRef<'a>> {
    scope
        .select(&selector(css))
        .next()
        .ok_or_else(|| missing(what))
}

/// First element in the whole document matching `css`.
pub(crate) fn find_in_document<'a>(
    document: &'a Html,
    css: &'static str,
    what: &'static str,
) -> TremorResult<ElementRef<'a>> {
    document
        .select(&selector(css))
        .next()
        .ok_or_else(|| missing(what))
}

/// All text beneath an element, concatenated without separators.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// First capture group of `re` in `input`.
pub(crate) fn capture(re: &Regex, pattern: &'static str, input: &str) -> TremorResult<String> {
    re.captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TremorError::PatternMismatch {
            pattern,
            input: input.to_string(),
        })
}

fn missing(what: &'static str) -> TremorError {
    tracing::warn!("expected {what} not found on page");
    TremorError::StructureNotFound(what)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGGED_IN: &str =
        r#"<div><a href="http://www.tremorgames.com/Logout.html">Logout</a></div>"#;

    #[test]
    fn test_logout_link_marks_authenticated() {
        assert!(is_authenticated(LOGGED_IN));
        assert!(is_authenticated(
            r#"<a href="https://www.tremorgames.com/Logout.html">x</a>"#
        ));
        assert!(!is_authenticated("<a href=\"/index.php\">Login</a>"));
    }

    #[test]
    fn test_session_outcome() {
        assert_eq!(session_outcome(LOGGED_IN), ActionOutcome::Completed);
        assert_eq!(session_outcome("<html></html>"), ActionOutcome::SessionLost);
    }

    #[test]
    fn test_send_outcome() {
        assert_eq!(send_outcome(LOGGED_IN), ActionOutcome::Completed);

        let invalid = format!("{LOGGED_IN}<p>Invalid User</p>");
        assert_eq!(send_outcome(&invalid), ActionOutcome::InvalidRecipient);

        // Logged out wins over the error text.
        assert_eq!(
            send_outcome("<p>Invalid User</p>"),
            ActionOutcome::SessionLost
        );
    }

    #[test]
    fn test_capture_reports_mismatch() {
        let re = pattern(r"/message/([0-9]+)/");
        assert_eq!(capture(&re, "msg", "/message/7/").unwrap(), "7");
        let err = capture(&re, "msg", "/profile/7/").unwrap_err();
        assert!(matches!(err, TremorError::PatternMismatch { .. }));
    }
}

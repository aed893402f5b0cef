//! Records returned by the session client.
//!
//! Every record is a snapshot of the page at fetch time. Nothing here is
//! kept in sync with the site afterwards.

use chrono::NaiveDate;
use serde::Serialize;

/// One row of the inbox listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSummary {
    /// Numeric message id, kept as the literal digits from the link.
    pub id: String,
    pub is_read: bool,
    pub sender: String,
    pub subject: String,
    /// Date as displayed by the site; not parsed.
    pub date: String,
}

/// A single message as shown on its own page.
///
/// The detail page exposes neither the id nor the read state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDetail {
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub date: String,
}

/// A date cell on the referrals page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "date")]
pub enum ReferralDate {
    /// The site printed a lone `-`: the event never happened.
    Never,
    On(NaiveDate),
}

impl ReferralDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Never => None,
            Self::On(d) => Some(*d),
        }
    }
}

impl std::fmt::Display for ReferralDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => f.write_str("-"),
            Self::On(d) => write!(f, "{d}"),
        }
    }
}

/// A user the logged-in account referred to the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Referral {
    pub username: String,
    /// Coins this referral has earned for the logged-in account.
    pub coins_earned: f64,
    pub join_date: ReferralDate,
    pub last_login: ReferralDate,
}

/// The logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub username: String,
    pub user_id: String,
}

/// Result of a request that changes state on the site.
///
/// The site has no structured responses, so this is inferred from markers in
/// the returned page. `Completed` only means the session survived the request
/// and no error text was shown; the site's state is not re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Completed,
    /// The send form answered with "Invalid User".
    InvalidRecipient,
    /// The response no longer shows the logout link.
    SessionLost,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referral_date_accessors() {
        let d = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
        assert_eq!(ReferralDate::On(d).date(), Some(d));
        assert_eq!(ReferralDate::Never.date(), None);
        assert_eq!(ReferralDate::Never.to_string(), "-");
        assert_eq!(ReferralDate::On(d).to_string(), "2019-01-05");
    }

    #[test]
    fn test_action_outcome_success() {
        assert!(ActionOutcome::Completed.is_success());
        assert!(!ActionOutcome::InvalidRecipient.is_success());
        assert!(!ActionOutcome::SessionLost.is_success());
    }
}

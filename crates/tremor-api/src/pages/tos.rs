//! The terms-of-service page (`index.php?action=tos`).
//!
//! Light enough to fetch cheaply, and it carries the same chrome as every
//! other page: the account box in the top right and the server clock near
//! the bottom.

use chrono::NaiveDate;
use scraper::Html;

use super::{capture, find, find_in_document, pattern, selector, text_of};
use crate::error::{TremorError, TremorResult};
use crate::types::UserIdentity;

pub const PROFILE_LINK_PATTERN: &str =
    r"https?://www\.tremorgames\.com/profiles/([0-9]+)/.*\.html";

/// Format of the server clock once the time of day is cut off.
pub const SERVER_DATE_FORMAT: &str = "%B %d, %Y";

/// Read the logged-in account from the profile link in the top-right box.
pub fn parse_user_info(html: &str) -> TremorResult<UserIdentity> {
    let document = Html::parse_document(html);
    let account_box = find_in_document(&document, "div.wbox_topright", "account box")?;
    let link = find(account_box, "a", "profile link")?;

    let href = link.value().attr("href").unwrap_or_default();
    let user_id = capture(&pattern(PROFILE_LINK_PATTERN), PROFILE_LINK_PATTERN, href)?;

    Ok(UserIdentity {
        username: text_of(link),
        user_id,
    })
}

/// Read the server date from the clock block.
///
/// The clock has no id or class; it is the second-to-last `div` on the page.
/// Any layout change upstream will break or misread this.
pub fn parse_server_time(html: &str) -> TremorResult<NaiveDate> {
    let document = Html::parse_document(html);
    let divs: Vec<_> = document.select(&selector("div")).collect();
    let clock = divs
        .len()
        .checked_sub(2)
        .and_then(|i| divs.get(i))
        .ok_or(TremorError::StructureNotFound("server time block"))?;

    server_date_from_text(&text_of(*clock))
}

/// Cut the date out of text like `Server time is: July 4, 2020, 10:00 AM`.
///
/// Takes from two past the first colon to six past the first comma, which
/// covers `", YYYY"`. The time of day is dropped.
pub fn server_date_from_text(text: &str) -> TremorResult<NaiveDate> {
    let invalid = || TremorError::InvalidDate {
        input: text.to_string(),
        format: SERVER_DATE_FORMAT,
    };

    let colon = text.find(':').ok_or_else(invalid)?;
    let comma = text.find(',').ok_or_else(invalid)?;
    let end = (comma + 6).min(text.len());
    let date_str = text.get(colon + 2..end).ok_or_else(invalid)?;

    NaiveDate::parse_from_str(date_str, SERVER_DATE_FORMAT).map_err(|_| invalid())
}

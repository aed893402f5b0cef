//! The private message inbox (`index.php?action=messages`).
//!
//! The site keeps only the newest 100 messages in the listing. Older ones
//! show up once newer ones are deleted.

use scraper::Html;

use super::{capture, find, find_in_document, pattern, selector, text_of};
use crate::error::{TremorError, TremorResult};
use crate::types::MessageSummary;

const TABLE: &str = r#"table[style="border:1px solid #E4E4E3;"]"#;
const ROW: &str = r#"tr[valign="top"]"#;

/// Alt text of the envelope icon on unread rows.
pub const UNREAD_ALT: &str = "The Message is Unread";

pub const MESSAGE_LINK_PATTERN: &str =
    r"https?://www\.tremorgames\.com/message/([0-9]+)/.*\.html";

/// Extract the message id from a message link.
pub fn message_id_from_href(href: &str) -> TremorResult<String> {
    capture(&pattern(MESSAGE_LINK_PATTERN), MESSAGE_LINK_PATTERN, href)
}

/// Parse the inbox listing, in page order.
///
/// A missing table is an error rather than an empty list: the site does not
/// render it for logged-out sessions.
pub fn parse_inbox(html: &str) -> TremorResult<Vec<MessageSummary>> {
    let document = Html::parse_document(html);
    let table = find_in_document(&document, TABLE, "inbox table")?;

    let cell_sel = selector("td");
    let link_re = pattern(MESSAGE_LINK_PATTERN);

    let mut messages = Vec::new();
    // First matching row is the header.
    for row in table.select(&selector(ROW)).skip(1) {
        let mut cells = row.select(&cell_sel);
        let (read_td, subject_td, date_td) = match (cells.next(), cells.next(), cells.next()) {
            (Some(r), Some(s), Some(d)) => (r, s, d),
            _ => return Err(TremorError::StructureNotFound("inbox row cells")),
        };

        let href = find(subject_td, "a", "message link")?
            .value()
            .attr("href")
            .unwrap_or_default();
        let id = capture(&link_re, MESSAGE_LINK_PATTERN, href)?;

        let is_read = find(read_td, "img", "read state icon")?
            .value()
            .attr("alt")
            != Some(UNREAD_ALT);

        messages.push(MessageSummary {
            id,
            is_read,
            sender: text_of(find(subject_td, "span.messagefrom", "message sender")?),
            subject: text_of(find(subject_td, "span.messagesubject", "message subject")?),
            date: text_of(find(date_td, "span.messagedate", "message date")?),
        });
    }

    tracing::debug!("parsed {} inbox rows", messages.len());
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, alt: &str, from: &str, subject: &str, date: &str) -> String {
        format!(
            r#"<tr valign="top">
                 <td><img src="/images/mail.gif" alt="{alt}"></td>
                 <td><a href="http://www.tremorgames.com/message/{id}/hello-there.html">
                       <span class="messagesubject">{subject}</span></a><br>
                     From: <span class="messagefrom">{from}</span></td>
                 <td><span class="messagedate">{date}</span></td>
               </tr>"#
        )
    }

    fn inbox(rows: &[String]) -> String {
        format!(
            r#"<html><body>
               <table style="border:1px solid #E4E4E3;">
                 <tr valign="top"><td>Status</td><td>Subject</td><td>Date</td></tr>
                 {}
               </table>
               </body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_message_id_from_listing_link() {
        assert_eq!(
            message_id_from_href("http://www.tremorgames.com/message/482/foo.html").unwrap(),
            "482"
        );
        assert_eq!(
            message_id_from_href("https://www.tremorgames.com/message/7/re-hi.html").unwrap(),
            "7"
        );
        assert!(message_id_from_href("http://www.tremorgames.com/message//foo.html").is_err());
    }

    #[test]
    fn test_parse_two_rows_in_order() {
        let html = inbox(&[
            row(101, "The Message is Read", "alice", "Trade?", "Jun 01 2020"),
            row(102, UNREAD_ALT, "bob", "Hi", "Jun 02 2020"),
        ]);

        let messages = parse_inbox(&html).unwrap();
        assert_eq!(messages.len(), 2);

        assert_eq!(messages[0].id, "101");
        assert!(messages[0].is_read);
        assert_eq!(messages[0].sender, "alice");
        assert_eq!(messages[0].subject, "Trade?");
        assert_eq!(messages[0].date, "Jun 01 2020");

        assert_eq!(messages[1].id, "102");
        assert!(!messages[1].is_read);
        assert_eq!(messages[1].sender, "bob");
    }

    #[test]
    fn test_header_only_table_is_empty() {
        assert!(parse_inbox(&inbox(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_missing_table_is_structure_error() {
        let err = parse_inbox("<html><body><p>Please log in</p></body></html>").unwrap_err();
        assert!(matches!(err, TremorError::StructureNotFound("inbox table")));
    }

    #[test]
    fn test_row_without_link_fails() {
        let broken = r#"<tr valign="top"><td><img alt="x"></td><td>no link</td><td></td></tr>"#;
        let err = parse_inbox(&inbox(&[broken.to_string()])).unwrap_err();
        assert!(err.is_structure_error());
    }
}

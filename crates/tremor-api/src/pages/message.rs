//! A single private message (`message/{id}/message.html`).

use scraper::Html;

use super::{find, find_in_document, text_of};
use crate::error::TremorResult;
use crate::types::MessageDetail;

/// Site-relative path of a message page. Viewing it marks the message read.
pub fn message_path(msg_id: &str) -> String {
    format!("message/{msg_id}/message.html")
}

/// Site-relative path that deletes a message.
pub fn delete_path(msg_id: &str) -> String {
    format!("delete-message/{msg_id}/message.html")
}

pub fn parse_message(html: &str) -> TremorResult<MessageDetail> {
    let document = Html::parse_document(html);

    let sender = find_in_document(&document, r#"a[title="Click to View Profile"]"#, "sender link")?;
    let header = find_in_document(&document, "div.main_section_headers", "message header")?;
    let body = find_in_document(&document, "div.box_round.private_message", "message body")?;
    let meta = find_in_document(&document, "div.private_message_main", "message metadata")?;

    Ok(MessageDetail {
        sender: text_of(sender),
        subject: text_of(find(header, "b", "message subject")?),
        body: text_of(body).trim().to_string(),
        date: text_of(find(meta, "b", "message date")?),
    })
}

//! Human-readable and JSON rendering of client results.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde_json::json;
use tremor_api::{ActionOutcome, MessageDetail, MessageSummary, Referral, UserIdentity};

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json(&self, value: &impl serde::Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn status(&self, step: &str, ok: bool) {
        if self.json {
            println!("{}", json!({ "step": step, "ok": ok }));
        } else {
            println!("{step}: {}", if ok { "ok" } else { "failed" });
        }
    }

    pub fn messages(&self, messages: &[MessageSummary]) -> Result<()> {
        if self.json {
            return self.print_json(&messages);
        }
        if messages.is_empty() {
            println!("Inbox is empty.");
        }
        for m in messages {
            let flag = if m.is_read { ' ' } else { '*' };
            println!("{flag} {:>8}  {:<20} {:<16} {}", m.id, m.sender, m.date, m.subject);
        }
        Ok(())
    }

    pub fn message(&self, message: &MessageDetail) -> Result<()> {
        if self.json {
            return self.print_json(message);
        }
        println!("From:    {}", message.sender);
        println!("Date:    {}", message.date);
        println!("Subject: {}", message.subject);
        println!();
        println!("{}", message.body);
        Ok(())
    }

    /// Print an action outcome. Anything but success becomes an error so the
    /// process exits non-zero.
    pub fn outcome(&self, action: &str, outcome: ActionOutcome) -> Result<()> {
        if self.json {
            self.print_json(&json!({ "action": action, "outcome": outcome }))?;
        }
        match outcome {
            ActionOutcome::Completed => {
                if !self.json {
                    println!("{action}: done");
                }
                Ok(())
            }
            ActionOutcome::InvalidRecipient => bail!("{action}: the site rejected the recipient"),
            ActionOutcome::SessionLost => bail!("{action}: the session was logged out"),
        }
    }

    pub fn user(&self, user: &UserIdentity) -> Result<()> {
        if self.json {
            return self.print_json(user);
        }
        println!("{} (id {})", user.username, user.user_id);
        Ok(())
    }

    pub fn coins(&self, raw: &str) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "coins": raw }));
        }
        println!("{raw}");
        Ok(())
    }

    pub fn referrals(&self, referrals: &[Referral]) -> Result<()> {
        if self.json {
            return self.print_json(&referrals);
        }
        for r in referrals {
            println!(
                "{:<20} {:>10.2}  joined {:<10}  last login {}",
                r.username, r.coins_earned, r.join_date.to_string(), r.last_login
            );
        }
        Ok(())
    }

    pub fn server_time(&self, date: NaiveDate) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "server_date": date }));
        }
        println!("{date}");
        Ok(())
    }
}

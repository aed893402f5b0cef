//! The logged-in session client.
//!
//! A `TremorClient` owns one cookie jar and therefore one login. Every method
//! issues exactly one request and parses the answer through [`crate::pages`].
//! Methods take `&mut self` so a client cannot be driven from two places at
//! once; to act as the same user twice, log in twice.

use chrono::NaiveDate;

use crate::config::ClientConfig;
use crate::error::{TremorError, TremorResult};
use crate::http_client::HttpClient;
use crate::pages::{self, inbox, message, referrals, tos};
use crate::types::{ActionOutcome, MessageDetail, MessageSummary, Referral, UserIdentity};

const LOGIN_PATH: &str = "index.php?action=sendmessage";
const SEND_MESSAGE_PATH: &str = "index.php?action=sendmessage";
const LOGOUT_PATH: &str = "Logout.html";
const MESSAGES_PATH: &str = "index.php?action=messages";
const TOS_PATH: &str = "index.php?action=tos";
const COINS_PATH: &str = "achievements/ajax_getusercoins.php";
const REFERRALS_PATH: &str = "?action=viewreferrals";

/// A browser-like session on the site.
pub struct TremorClient {
    http: HttpClient,
    logged_in: bool,
}

impl TremorClient {
    /// Create a client and log in.
    ///
    /// Wrong credentials are not an error: check [`is_logged_in`] on the
    /// returned client. Only transport failures are reported as `Err`.
    ///
    /// [`is_logged_in`]: TremorClient::is_logged_in
    pub async fn login(
        config: &ClientConfig,
        username: &str,
        password: &str,
    ) -> TremorResult<Self> {
        let mut client = Self {
            http: HttpClient::new(config)?,
            logged_in: false,
        };
        client.relogin(username, password).await?;
        Ok(client)
    }

    /// Log in again on this session, e.g. after the site dropped it.
    pub async fn relogin(&mut self, username: &str, password: &str) -> TremorResult<bool> {
        // The front page hands out the session cookie the form expects.
        self.http.get("").await?;

        let form = [
            ("loginuser", username),
            ("loginpassword", password),
            ("Submit", ""),
            ("saveme", "1"),
        ];
        let response = self.http.post_form(LOGIN_PATH, &form).await?;
        self.logged_in = pages::is_authenticated(&response.body);

        if self.logged_in {
            tracing::info!("logged in as {username}");
        } else {
            tracing::warn!("login rejected for {username}");
        }
        Ok(self.logged_in)
    }

    /// Whether the last page seen showed a logged-in session.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Log out. Returns true when the response no longer shows the logout link.
    pub async fn log_out(&mut self) -> TremorResult<bool> {
        let response = self.http.get(LOGOUT_PATH).await?;
        self.logged_in = pages::is_authenticated(&response.body);

        if self.logged_in {
            tracing::warn!("logout did not end the session");
        } else {
            tracing::info!("logged out");
        }
        Ok(!self.logged_in)
    }

    /// List the inbox, newest 100 messages at most, in page order.
    ///
    /// Fails with [`TremorError::StructureNotFound`] when the inbox table is
    /// missing, which is also what a logged-out session gets.
    pub async fn get_all_messages(&mut self) -> TremorResult<Vec<MessageSummary>> {
        let body = self.fetch(MESSAGES_PATH).await?;
        inbox::parse_inbox(&body)
    }

    /// Read one message. Viewing it marks it read on the site.
    pub async fn get_message(&mut self, msg_id: &str) -> TremorResult<MessageDetail> {
        let body = self.fetch(&message::message_path(msg_id)).await?;
        message::parse_message(&body)
    }

    /// Send a private message. Subject and body are passed through untouched.
    pub async fn send_message(
        &mut self,
        username: &str,
        subject: &str,
        body: &str,
    ) -> TremorResult<ActionOutcome> {
        let form = [
            ("tousername", username),
            ("messagesubject", subject),
            ("messagebody", body),
        ];
        let response = self.http.post_form(SEND_MESSAGE_PATH, &form).await?;
        self.logged_in = pages::is_authenticated(&response.body);

        let outcome = pages::send_outcome(&response.body);
        tracing::debug!("send message to {username}: {outcome:?}");
        Ok(outcome)
    }

    /// Delete a message. Only confirms the session survived the request.
    pub async fn delete_message(&mut self, msg_id: &str) -> TremorResult<ActionOutcome> {
        let body = self.fetch(&message::delete_path(msg_id)).await?;
        Ok(pages::session_outcome(&body))
    }

    /// Mark a message read by viewing it.
    ///
    /// The site has no separate endpoint for this as far as is known; opening
    /// the message page is what flips the flag.
    pub async fn mark_message_read(&mut self, msg_id: &str) -> TremorResult<ActionOutcome> {
        let body = self.fetch(&message::message_path(msg_id)).await?;
        Ok(pages::session_outcome(&body))
    }

    /// Username and numeric id of the logged-in account.
    pub async fn get_user_info(&mut self) -> TremorResult<UserIdentity> {
        let body = self.fetch(TOS_PATH).await?;
        tos::parse_user_info(&body)
    }

    /// Raw body of the coin balance endpoint, unparsed.
    pub async fn get_coins(&mut self) -> TremorResult<String> {
        let response = self.http.get(COINS_PATH).await?;
        Ok(response.body)
    }

    /// Coin balance as a number.
    pub async fn coin_balance(&mut self) -> TremorResult<f64> {
        let raw = self.get_coins().await?;
        let parsed = raw.trim().parse::<f64>();
        parsed.map_err(|_| TremorError::InvalidNumber(raw))
    }

    /// Everyone this account referred, in table order.
    pub async fn get_referrals(&mut self) -> TremorResult<Vec<Referral>> {
        let body = self.fetch(REFERRALS_PATH).await?;
        referrals::parse_referrals(&body)
    }

    /// Today's date according to the site's clock.
    pub async fn get_server_time(&mut self) -> TremorResult<NaiveDate> {
        let body = self.fetch(TOS_PATH).await?;
        tos::parse_server_time(&body)
    }

    /// GET a page and note whether the session is still alive.
    async fn fetch(&mut self, path: &str) -> TremorResult<String> {
        let response = self.http.get(path).await?;
        let authenticated = pages::is_authenticated(&response.body);
        if self.logged_in && !authenticated {
            tracing::warn!("session lost while fetching {path}");
        }
        self.logged_in = authenticated;
        Ok(response.body)
    }
}

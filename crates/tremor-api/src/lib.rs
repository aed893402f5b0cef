//! Tremor API: a logged-in browser session against TremorGames.com.
//!
//! The site has no official API. This crate logs in through the regular form,
//! keeps the session cookies, and scrapes private messages, referrals and
//! account details out of the HTML pages.
//!
//! ```no_run
//! # async fn demo() -> tremor_api::TremorResult<()> {
//! use tremor_api::{ClientConfig, TremorClient};
//!
//! let mut client = TremorClient::login(&ClientConfig::default(), "user", "secret").await?;
//! if client.is_logged_in() {
//!     for msg in client.get_all_messages().await? {
//!         println!("{} {} {}", msg.id, msg.sender, msg.subject);
//!     }
//!     client.log_out().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http_client;
pub mod pages;
pub mod types;

pub use client::TremorClient;
pub use config::ClientConfig;
pub use error::{TremorError, TremorResult};
pub use types::*;

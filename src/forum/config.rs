//! Forum endpoint and scraping configuration.

use crate::forum::token::SMF_TOKEN_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Board the tool was first written against.
pub const DEFAULT_FORUM_URL: &str = "https://ludeon.com/forums/index.php";

/// Where and how to talk to the forum.
///
/// Defaults describe a stock SMF 2.0 install; every field can be
/// overridden from a config file since the struct is serde-deserializable
/// with missing fields filled from [`ForumConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    /// The forum's `index.php`.
    pub base_url: Url,
    /// Redirects followed by the login and submit posts.
    pub redirect_limit: u8,
    /// Length of the session-check value (see [`crate::forum::token`]).
    pub token_length: usize,
    /// `id` of the post-edit form.
    pub edit_form_id: String,
    /// Element holding the logged-in username.
    pub user_selector: String,
    /// Text the username element shows to anonymous visitors.
    pub guest_label: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    /// Directory to write fetched pages to, for debugging scrapes.
    pub dump_dir: Option<PathBuf>,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            // Constant input; covered by test_default_forum_url_parses.
            base_url: Url::parse(DEFAULT_FORUM_URL).expect("default forum URL is valid"),
            redirect_limit: 5,
            token_length: SMF_TOKEN_LENGTH,
            edit_form_id: "postmodify".to_string(),
            user_selector: "#name em".to_string(),
            guest_label: "Guest".to_string(),
            timeout_secs: None,
            user_agent: None,
            dump_dir: None,
        }
    }
}

impl ForumConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn with_query(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(Some(query));
        url.set_fragment(None);
        url
    }

    /// `index.php?action=login2`
    pub fn login_url(&self) -> Url {
        self.with_query("action=login2")
    }

    /// `index.php?action=post;msg=<msg>;topic=<topic>`
    pub fn edit_url(&self, message_id: u64, topic_id: &str) -> Url {
        self.with_query(&format!("action=post;msg={};topic={}", message_id, topic_id))
    }

    /// Link straight to the post, for checking the edit by hand.
    pub fn permalink(&self, message_id: u64, topic_id: &str) -> Url {
        let mut url = self.with_query(&format!("topic={}.msg{}", topic_id, message_id));
        url.set_fragment(Some(&format!("msg{}", message_id)));
        url
    }
}

//! The edit pipeline: bootstrap, login, fetch form, submit.

use crate::client::Client;
use crate::forum::config::ForumConfig;
use crate::forum::error::{EditError, ParseError};
use crate::forum::form::{scrape_post_form, PostForm};
use crate::forum::hash::hash_password;
use crate::forum::request::{EditRequest, FieldOverrides};
use crate::forum::session::Session;
use crate::forum::token::extract_token;
use crate::http::response::HttpResponse;
use http::StatusCode;
use scraper::{Html, Selector};
use std::fmt;
use url::Url;

/// Login name and password. The password is never logged.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a submitted edit.
///
/// The forum answers a rejected edit with the same status codes as an
/// accepted one, so a completed submission is never reported as
/// confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The form was posted; check `permalink` to see whether it took.
    Unconfirmed {
        permalink: Url,
        status: StatusCode,
        user: String,
    },
}

impl EditOutcome {
    pub fn permalink(&self) -> &Url {
        match self {
            EditOutcome::Unconfirmed { permalink, .. } => permalink,
        }
    }
}

/// Runs edits against one forum.
#[derive(Clone)]
pub struct ForumEditor {
    client: Client,
    config: ForumConfig,
    debug: bool,
}

impl ForumEditor {
    pub fn new(config: ForumConfig) -> Self {
        let mut builder = Client::builder().redirect_limit(config.redirect_limit);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        Self {
            client: builder.build(),
            config,
            debug: false,
        }
    }

    /// Emit verbose diagnostics (form contents, cookie and token names)
    /// at `debug` level.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn config(&self) -> &ForumConfig {
        &self.config
    }

    /// Fetch the forum index and open a session from its token and cookies.
    pub async fn bootstrap(&self) -> Result<Session, EditError> {
        tracing::info!("obtaining session info");
        let page = self
            .client
            .get(self.config.base_url.as_str())
            .follow(0)
            .send()
            .await?;
        self.dump("bootstrap", &page).await?;

        let token = extract_token(&page.text(), self.config.token_length, "forum index")?;
        let session = Session::new(token, Default::default()).with_cookies(page.cookies());
        if self.debug {
            tracing::debug!(
                token = %session.token().name,
                cookies = ?session.cookies().names().collect::<Vec<_>>(),
                "session opened"
            );
        }
        Ok(session)
    }

    /// Log in and return the authenticated session.
    pub async fn login(
        &self,
        session: Session,
        credentials: &Credentials,
    ) -> Result<Session, EditError> {
        let token = session.token().clone();
        let hash = hash_password(&credentials.username, &credentials.password, &token.value);
        let form = [
            ("user", credentials.username.as_str()),
            ("cookielength", "-1"),
            ("hash_passwrd", hash.as_str()),
            (token.name.as_str(), token.value.as_str()),
        ];

        tracing::info!(user = %credentials.username, "logging in");
        if self.debug {
            tracing::debug!(form = ?form, "login form data");
        }

        let page = self
            .client
            .post(self.config.login_url().as_str())
            .cookies(session.cookies())
            .form(form)
            .follow_set_cookies(true)
            .send()
            .await?;
        self.dump("login", &page).await?;

        let shown = self.logged_in_user(&page.text())?.unwrap_or_else(|| {
            // The edit form fetch fails later if the login really didn't take.
            tracing::warn!(
                selector = %self.config.user_selector,
                "login indicator not found, continuing"
            );
            String::new()
        });
        if shown == self.config.guest_label {
            return Err(EditError::Authentication { shown });
        }
        tracing::info!(user = %shown, "successfully logged in");

        Ok(session.with_cookies(page.cookies()).authenticated(shown))
    }

    /// Username shown by the login indicator, `None` when the page has none.
    fn logged_in_user(&self, html: &str) -> Result<Option<String>, ParseError> {
        let selector = Selector::parse(&self.config.user_selector).map_err(|_| {
            ParseError::InvalidSelector {
                selector: self.config.user_selector.clone(),
            }
        })?;
        let document = Html::parse_document(html);
        Ok(document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string()))
    }

    /// Fetch the edit page of a post, refreshing the session's token.
    pub async fn fetch_edit_form(
        &self,
        session: Session,
        message_id: u64,
        topic_id: &str,
    ) -> Result<(Session, PostForm), EditError> {
        tracing::info!(msg = message_id, topic = %topic_id, "preparing update");
        let url = self.config.edit_url(message_id, topic_id);
        let page = self
            .client
            .get(url.as_str())
            .cookies(session.cookies())
            .follow(0)
            .send()
            .await?;
        self.dump("edit_form", &page).await?;

        let html = page.text();
        // Tokens are per page; the login page's token is stale here.
        let token = extract_token(&html, self.config.token_length, "edit page")?;
        let session = session.with_cookies(page.cookies()).with_token(token);
        let form = scrape_post_form(&html, &self.config.edit_form_id, page.url())?;

        if self.debug {
            tracing::debug!(
                action = %form.action,
                fields = ?form.fields,
                cookies = ?session.cookies().names().collect::<Vec<_>>(),
                "edit form scraped"
            );
        }
        Ok((session, form))
    }

    /// Post the form with `overrides` applied.
    pub async fn submit(
        &self,
        session: &Session,
        form: &PostForm,
        overrides: &FieldOverrides,
    ) -> Result<HttpResponse, EditError> {
        let fields = overrides.apply(&form.fields);
        if self.debug {
            tracing::debug!(fields = ?fields, "update data");
        }
        tracing::info!(
            action = %form.action,
            overrides = ?overrides.field_names(),
            "submitting edit"
        );

        let response = self
            .client
            .post(form.action.as_str())
            .cookies(session.cookies())
            .form(fields.iter())
            .send()
            .await?;
        self.dump("submit", &response).await?;
        Ok(response)
    }

    /// Run the whole pipeline for one edit.
    pub async fn edit(
        &self,
        credentials: &Credentials,
        request: &EditRequest,
    ) -> Result<EditOutcome, EditError> {
        let session = self.bootstrap().await?;
        let session = self.login(session, credentials).await?;
        let (session, form) = self
            .fetch_edit_form(session, request.message_id(), request.topic_id())
            .await?;
        let response = self.submit(&session, &form, request.overrides()).await?;

        let permalink = self.config.permalink(request.message_id(), request.topic_id());
        tracing::info!(
            permalink = %permalink,
            status = response.status().as_u16(),
            "update completed (unconfirmed, check the post)"
        );
        Ok(EditOutcome::Unconfirmed {
            permalink,
            status: response.status(),
            user: session.user().unwrap_or_default().to_string(),
        })
    }

    /// Run an edit and collapse the result to success or failure.
    /// Failures are logged, never returned.
    pub async fn update(&self, credentials: &Credentials, request: &EditRequest) -> bool {
        match self.edit(credentials, request).await {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(
                    kind = err.kind(),
                    code = ?err.net_code(),
                    error = %err,
                    "post edit failed"
                );
                false
            }
        }
    }

    async fn dump(&self, stage: &str, page: &HttpResponse) -> Result<(), EditError> {
        let Some(dir) = &self.config.dump_dir else {
            return Ok(());
        };
        let path = dir.join(format!("{}.html", stage));
        tokio::fs::write(&path, page.bytes())
            .await
            .map_err(|source| EditError::Dump {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "page dumped");
        Ok(())
    }
}

/// Edit a post on the default forum.
///
/// Returns `true` when every stage completed. Whether the forum accepted
/// the edit is not checked; see [`EditOutcome`].
///
/// # Example
///
/// ```rust,no_run
/// use smfedit::{update, FieldOverrides};
///
/// # async fn run() {
/// let ok = update(
///     "me",
///     "my_password",
///     433374,
///     "45557.0",
///     FieldOverrides::new().message("new post body"),
///     false,
/// )
/// .await;
/// # }
/// ```
pub async fn update(
    username: &str,
    password: &str,
    message_id: u64,
    topic_id: &str,
    overrides: FieldOverrides,
    debug: bool,
) -> bool {
    let editor = ForumEditor::new(ForumConfig::default()).debug(debug);
    let credentials = Credentials::new(username, password);
    let request = EditRequest::new(message_id, topic_id, overrides);
    editor.update(&credentials, &request).await
}

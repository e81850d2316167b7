//! The authenticated context operations run under

use crate::task::UserId;

/// Identity and credentials of one logged-in user.
///
/// A `Session` is acquired once, at login (see [`Client::log_in`](crate::client::Client::log_in)),
/// then handed explicitly to the components that need it: the [`Client`](crate::client::Client)
/// uses the access token, the [`TaskStore`](crate::TaskStore) uses the user id.
/// Dropping it (e.g. after [`Client::log_out`](crate::client::Client::log_out)) ends the session;
/// nothing in this crate reads identity from ambient storage.
#[derive(Clone, Debug)]
pub struct Session {
    user_id: UserId,
    access_token: String,
    refresh_token: Option<String>,
}

impl Session {
    /// Create a session from an already-obtained access token
    pub fn new<T: ToString>(user_id: UserId, access_token: T) -> Self {
        Self {
            user_id,
            access_token: access_token.to_string(),
            refresh_token: None,
        }
    }

    /// Attach the refresh token the login endpoint handed out along with the access token
    pub fn with_refresh_token<T: ToString>(mut self, refresh_token: T) -> Self {
        self.refresh_token = Some(refresh_token.to_string());
        self
    }

    pub fn user_id(&self) -> UserId { self.user_id }
    pub fn access_token(&self) -> &str { &self.access_token }
    pub fn refresh_token(&self) -> Option<&str> { self.refresh_token.as_deref() }
}

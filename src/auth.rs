//! Credentials attached to every request.

use reqwest_middleware::RequestBuilder;
use std::fmt;

/// How the client authenticates to SonarQube.
#[derive(Clone, Eq, PartialEq)]
pub enum Auth {
    /// HTTP Basic with a login and password.
    Basic { login: String, password: String },
    /// User token sent as the HTTP Basic username with an empty password.
    Token(String),
    /// User token sent as `Authorization: Bearer <token>`.
    Bearer(String),
}

impl Auth {
    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::Basic { login, password } => builder.basic_auth(login, Some(password)),
            Auth::Token(token) => builder.basic_auth(token, None::<&str>),
            Auth::Bearer(token) => builder.bearer_auth(token),
        }
    }
}

// secrets stay out of logs and panics
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Basic { login, .. } => f
                .debug_struct("Basic")
                .field("login", login)
                .field("password", &"***")
                .finish(),
            Auth::Token(_) => f.write_str("Token(***)"),
            Auth::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}

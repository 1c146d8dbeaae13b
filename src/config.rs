use std::fmt::Debug;

use bon::Builder;

use crate::errors::ValidationError;

/// Environment variable names read by [`Credentials::from_env`].
pub mod env {
    pub const USERNAME: &str = "DIGEST_AUTH_USERNAME";
    pub const PASSWORD: &str = "DIGEST_AUTH_PASSWORD";
    pub const LOGIN_AGENT: &str = "LOGIN_AGENT";
    pub const PASSWORD_AGENT: &str = "PASSWORD_AGENT";
    pub const INTOUCH_ID: &str = "INTOUCH_ID";
}

/// Account credentials issued by InTouch.
///
/// Supplied once when constructing a client and never mutated afterwards.
#[derive(Builder, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API username, used for both Basic and Digest authentication.
    #[builder(into)]
    pub username: String,
    /// API password.
    #[builder(into)]
    pub password: String,
    /// Agent login, embedded into endpoint URLs and request bodies.
    #[builder(into)]
    pub login_agent: String,
    /// Agent password.
    #[builder(into)]
    pub password_agent: String,
    /// Gateway-assigned merchant identifier.
    #[builder(into)]
    pub intouch_id: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    ///
    /// See [`env`] for the variable names.
    pub fn from_env() -> Result<Self, ValidationError> {
        fn var(name: &'static str) -> Result<String, ValidationError> {
            std::env::var(name).map_err(|_| ValidationError::MissingCredential(name))
        }

        let credentials = Credentials {
            username: var(env::USERNAME)?,
            password: var(env::PASSWORD)?,
            login_agent: var(env::LOGIN_AGENT)?,
            password_agent: var(env::PASSWORD_AGENT)?,
            intouch_id: var(env::INTOUCH_ID)?,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Every field must be non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("username", &self.username),
            ("password", &self.password),
            ("login_agent", &self.login_agent),
            ("password_agent", &self.password_agent),
            ("intouch_id", &self.intouch_id),
        ];
        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ValidationError::MissingCredential(name)),
            None => Ok(()),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("login_agent", &self.login_agent)
            .field("password_agent", &"<redacted>")
            .field("intouch_id", &self.intouch_id)
            .finish()
    }
}

/// Endpoint URL templates.
///
/// Templates may contain the placeholders `[LOGIN_AGENT]`, `[PASSWORD_AGENT]`
/// and `[INTOUCH_ID]`, substituted from [`Credentials`] at resolution time.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Merchant payment and cash-out.
    #[builder(into, default = Endpoints::TRANSACTION.to_string())]
    pub transaction: String,
    #[builder(into, default = Endpoints::CASHIN.to_string())]
    pub cashin: String,
    #[builder(into, default = Endpoints::BALANCE.to_string())]
    pub balance: String,
}

impl Endpoints {
    pub const TRANSACTION: &'static str = "https://api.gutouch.com/dist/api/touchpayapi/v1/[INTOUCH_ID]/transaction?loginAgent=[LOGIN_AGENT]&passwordAgent=[PASSWORD_AGENT]";
    pub const CASHIN: &'static str = "https://api.gutouch.com/v1/[INTOUCH_ID]/cashin";
    pub const BALANCE: &'static str = "https://api.gutouch.com/v1/[INTOUCH_ID]/get_balance";

    /// Point every template at another origin, keeping the gateway's paths.
    ///
    /// Useful for sandboxes and local mocks.
    pub fn with_base(base: &str) -> Self {
        const PRODUCTION: &str = "https://api.gutouch.com";
        let base = base.trim_end_matches('/');
        Endpoints {
            transaction: Self::TRANSACTION.replacen(PRODUCTION, base, 1),
            cashin: Self::CASHIN.replacen(PRODUCTION, base, 1),
            balance: Self::BALANCE.replacen(PRODUCTION, base, 1),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::builder().build()
    }
}

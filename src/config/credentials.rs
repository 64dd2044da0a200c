use crate::ConfigError;
use std::fmt;

/// Environment variable holding the portal login id
pub const ID_ENV: &str = "GABA_ID";

/// Environment variable holding the portal password
pub const PASSWORD_ENV: &str = "GABA_PASSWORD";

/// Portal login credentials
#[derive(Clone)]
pub struct Credentials {
    pub id: String,
    pub password: String,
}

impl Credentials {
    /// Reads credentials from the process environment
    ///
    /// Fails with `ConfigError::MissingEnv` naming the first variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
        };

        Ok(Self {
            id: required(ID_ENV)?,
            password: required(PASSWORD_ENV)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .finish()
    }
}

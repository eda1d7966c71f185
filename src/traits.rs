use crate::accessor::Env;
use crate::source::{ReadEnv, SystemEnv};

/// A trait for types that can be constructed from environment variables.
///
/// Implementors describe each field once, as a key plus a default, using the
/// typed accessors on [`Env`]. Missing or malformed variables fall back to the
/// default, so construction never fails.
///
/// # Implementation Guidelines
/// - Use UPPERCASE_WITH_UNDERSCORES variable names
/// - Keep defaults next to the key they belong to
/// - Document every variable the implementation reads
///
/// # Examples
/// ```
/// use chrono::Duration;
/// use envget::{Env, FromEnv, ReadEnv};
///
/// struct DatabaseConfig {
///     host: String,
///     port: isize,
///     timeout: Duration,
/// }
///
/// impl FromEnv for DatabaseConfig {
///     fn from_env_with<S: ReadEnv>(env: &Env<S>) -> Self {
///         Self {
///             host: env.string("DB_HOST", "localhost".to_string()),
///             port: env.int("DB_PORT", 5432),
///             timeout: env.duration("DB_TIMEOUT", Duration::seconds(5)),
///         }
///     }
/// }
///
/// let config = DatabaseConfig::from_env();
/// # let _ = (config.host, config.port, config.timeout);
/// ```
pub trait FromEnv {
    /// Builds the value from the given store.
    fn from_env_with<S: ReadEnv>(env: &Env<S>) -> Self
    where
        Self: Sized;

    /// Builds the value from the process environment.
    fn from_env() -> Self
    where
        Self: Sized,
    {
        Self::from_env_with(&Env::<SystemEnv>::system())
    }
}

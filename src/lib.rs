//! Typed access to environment variables with a caller supplied fallback.
//!
//! Each accessor looks a variable up by name, parses it into the requested
//! type and returns the fallback when the variable is unset, set to the empty
//! string, or does not parse. There is no error channel.
//!
//! | Type | Accessor | Accepted values |
//! |------|----------|-----------------|
//! | `String` | [`get_string`] | anything non-empty |
//! | `isize` | [`get_int`] | base-10, optional sign |
//! | `bool` | [`get_bool`] | `true`/`false` in any case, `1`/`0` |
//! | [`chrono::Duration`] | [`get_duration`] | `300ms`, `-1.5h`, `1h30m`, ... |
//! | `Vec<String>` | [`get_string_slice`] | comma separated, items trimmed |
//!
//! A misspelled key or a malformed value silently yields the fallback. The
//! accessors emit `trace` level [`tracing`] events when that happens.
//!
//! # Examples
//!
//! ```
//! use chrono::Duration;
//!
//! let workers = envget::get_int("APP_WORKERS", 4);
//! let timeout = envget::get_duration("APP_TIMEOUT", Duration::seconds(30));
//! let hosts = envget::get_string_slice("APP_HOSTS", vec!["localhost".to_string()]);
//! # let _ = (workers, timeout, hosts);
//! ```
//!
//! To read from something other than the process environment, implement
//! [`ReadEnv`] and wrap it in an [`Env`].

mod accessor;
mod duration;
mod errors;
mod parse;
mod source;
mod traits;

pub use accessor::{get_bool, get_duration, get_int, get_string, get_string_slice, Env};
pub use duration::{format_duration, parse_duration};
pub use errors::ParseError;
pub use parse::{parse_bool, parse_int, split_list};
#[cfg(any(test, feature = "test-support"))]
pub use source::InMemoryEnv;
pub use source::{ReadEnv, SystemEnv};
pub use traits::FromEnv;

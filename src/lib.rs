//! Read `.env` files into a map or an environment.
//!
//! [`read`] (or [`DotEnvOptions::read`]) returns the merged key/value pairs
//! without touching any environment. [`load_into`] writes them into a
//! [`TargetEnv`]; [`load`] targets the process environment and is `unsafe`,
//! because callers must guarantee no concurrent process-environment access.
//!
//! ```no_run
//! use dotenvkit::DotEnvOptions;
//!
//! let vars = DotEnvOptions::new()
//!     .with_env_files([".env", ".env.local"])
//!     .with_trim_values(true)
//!     .read()?;
//! println!("{:?}", vars.get("DATABASE_URL"));
//! # Ok::<(), dotenvkit::Error>(())
//! ```

mod env;
mod error;
mod loader;
mod merge;
mod model;
mod options;
mod parser;
mod probe;
mod source;
mod vars;

pub use env::TargetEnv;
pub use error::{Error, ParseError, ParseErrorKind, VarError};
pub use loader::{dotenv, load, load_into, read};
pub use merge::{EnvMap, merge};
pub use model::{Encoding, Entry, LoadReport};
pub use options::{DotEnvOptions, Probe};
pub use parser::{is_escaped, parse_lines, parse_str};
pub use probe::{DEFAULT_ENV_FILE, DEFAULT_PROBE_LEVELS, default_start_dir, probe};
pub use source::read_lines;
pub use vars::EnvReader;

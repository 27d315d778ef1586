//! Dotted-path access to JSON and YAML configuration.
//!
//! Documents are normalized into one canonical [`Value`] tree and read through a
//! [`Config`] handle using paths such as `development.users.0.name`. Reads are typed
//! (`bool`, `int`, `string`, ...) with a small set of fixed coercions; writes create
//! missing maps on the way down. [`EnvConfig`] layers per-environment overrides on top.
//!
//! ```
//! use dotted_cfg::{Config, EnvConfig};
//!
//! let cfg = Config::from_yaml(r#"
//! development:
//!   database:
//!     host: localhost
//!   users:
//!     - name: calvin
//!     - name: hobbes
//! production:
//!   database:
//!     host: 192.168.1.1
//! "#).unwrap();
//!
//! assert_eq!(cfg.string("development.users.1.name").unwrap(), "hobbes");
//!
//! let dev = cfg.get("development").unwrap();
//! assert_eq!(dev.string("database.host").unwrap(), "localhost");
//!
//! let prod = EnvConfig::new("production", cfg);
//! assert_eq!(prod.string("database.host").unwrap(), "192.168.1.1");
//! ```

pub mod coerce;
pub mod config;
pub mod env;
pub mod error;
pub mod normalize;
pub mod path;
pub mod render;
pub mod value;

pub use coerce::Coerce;
pub use config::{must, Config};
pub use env::EnvConfig;
pub use error::{ConfigError, Result};
pub use normalize::Normalize;
pub use value::{Kind, Map, Value};

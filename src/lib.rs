//! Blocking GET/POST helpers with form-encoded parameters.
//!
//! Every request goes through one shared client configured with fixed
//! connect/read timeouts and a forward proxy, see [`config`].

pub mod config;
pub mod error;
pub mod helper;
pub mod http_client;
pub mod logger;
pub mod params;

pub use config::HttpHelperConfig;
pub use error::{HttpHelperError, Result};
pub use helper::HttpHelper;
pub use params::Params;

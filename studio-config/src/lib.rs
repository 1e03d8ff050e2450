//! Configuration for Parable Studio.
//!
//! [`StudioConfig`] is read from an optional TOML file and then overridden
//! from the environment:
//!
//! | Env | Field |
//! |-----|-------|
//! | `PARABLE_STUDIO_MODEL` | `model` |
//! | `PARABLE_STUDIO_BASE_URL` | `base_url` |
//! | `PARABLE_STUDIO_DATA_DIR` | `data_dir` |
//! | `PARABLE_STUDIO_LOG` | `log_filter` |

#![warn(missing_docs, clippy::pedantic)]

mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use schema::{GenerationSettings, StudioConfig};

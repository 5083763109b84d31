//! Active environment resolution.
//!
//! Environment-scoped content (`staging_content`, `test_content`, ...) is
//! served based on the name resolved here. The priority chain is:
//!
//! 1. Explicit `--env` flag (or a name passed by an embedding program)
//! 2. The `CMS_ENV` environment variable
//! 3. Fallback to "development"

pub mod resolver;

pub use resolver::{EnvironmentSource, ResolvedEnvironment, DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR};

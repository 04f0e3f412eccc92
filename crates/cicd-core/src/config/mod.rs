//! Option resolution for the CI/CD resources
//!
//! Options come from the service's `custom.cicd` block and are merged over
//! built-in defaults:
//!
//! 1. **Defaults** - image, repository (the service name), branch `main`
//! 2. **User options** - `custom.cicd`, any field set here wins
//! 3. **Stage override** - `custom.<stage>.branch` replaces the branch
//!
//! # Example
//!
//! ```
//! use cicd_core::config::{ConfigResolver, StageContext};
//! use serde_json::json;
//!
//! let resolver = ConfigResolver::new("orders-api");
//! let stage = StageContext::new("prod").with_override("prod", "release");
//! let config = resolver
//!     .resolve_value(&json!({"gitOwner": "acme", "gitBranch": "develop"}), &stage)
//!     .unwrap();
//!
//! assert_eq!(config.git_repo, "orders-api");
//! assert_eq!(config.git_branch, "release");
//! ```

mod options;
mod resolver;
mod scalar;
mod stage;

pub use options::{CicdOptions, DEFAULT_BASE_IMAGE, DEFAULT_GIT_BRANCH};
pub use resolver::{ConfigResolver, EnvVar, ResolvedConfig};
pub use stage::{StageContext, StageOverride, should_run};

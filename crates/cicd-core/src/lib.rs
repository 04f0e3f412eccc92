//! CI/CD resources for serverless services
//!
//! This crate turns a service description's `custom.cicd` block into three
//! template resources and merges them into the description before the host
//! packages it:
//!
//! - **Configuration resolution**: user options over built-in defaults, plus
//!   per-stage branch overrides
//! - **Resource graph**: an IAM role, a build project, and a two-stage
//!   pipeline that reference each other by logical name
//! - **Lifecycle hooks**: the `before:package:initialize` handler that skips
//!   excluded stages and merges the generated document
//!
//! # Architecture
//!
//! ```text
//!        hooks (CicdPlugin)
//!          |            |
//!       config      service
//!          |            ^
//!      resources -------+
//!          |
//!       render
//! ```
//!
//! # Example
//!
//! ```
//! use cicd_core::{CicdPlugin, HookEvent, Plugin, ServiceDescription};
//!
//! let mut service = ServiceDescription::from_yaml_str(
//!     "service: orders-api\ncustom:\n  stage: prod\n  cicd:\n    gitOwner: acme\n",
//! )
//! .unwrap();
//!
//! CicdPlugin::new()
//!     .handle(HookEvent::BeforePackageInitialize, &mut service)
//!     .unwrap();
//!
//! let resources = &service.resources().unwrap()["Resources"];
//! assert_eq!(resources["CICDRole"]["Properties"]["RoleName"], "orders-api-prod");
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod render;
pub mod resources;
pub mod service;

pub use config::{CicdOptions, ConfigResolver, EnvVar, ResolvedConfig, StageContext, should_run};
pub use error::{Error, Result};
pub use hooks::{CicdPlugin, HookEvent, HookOutcome, HookResult, Plugin, run_hooks};
pub use render::Format;
pub use resources::{Intrinsic, Resource, ResourceDocument, ResourceGraphBuilder, Resources};
pub use service::ServiceDescription;

//! Configuration section definitions.
//!
//! Each module corresponds to a section in `mapprep.toml`:
//!
//! | Module       | TOML Section     | Purpose                              |
//! |--------------|------------------|--------------------------------------|
//! | `paths`      | `[paths]`        | District list and source SVG         |
//! | `annotate`   | `[annotate]`     | Patch labels and id collisions       |
//! | `namespace`  | `[namespace]`    | Namespace declarations to strip      |
//! | `fill`       | `[fill]`         | Fill color replacement               |
//! | `background` | `[background]`   | Background groups and shape fills    |
//! | `run`        | `[run]`          | Full pipeline output                 |

mod annotate;
mod background;
mod fill;
mod namespace;
mod paths;
mod run;

pub use annotate::{AnnotateConfig, CollisionPolicy};
pub use background::BackgroundConfig;
pub use fill::FillConfig;
pub use namespace::NamespaceConfig;
pub use paths::PathsConfig;
pub use run::RunConfig;

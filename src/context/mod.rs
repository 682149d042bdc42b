//! Formatter context for template expansion
//!
//! A [`Context`] is built once through [`ContextBuilder`] and then only read. Each
//! expansion creates its own [`Resolver`], which owns the implicit cursor, so one
//! context can serve any number of concurrent expansions.
//!
//! # Example
//!
//! ```rust
//! use pathfmt::{format, ContextBuilder};
//!
//! let context = ContextBuilder::new()
//!     .add_formatter("path", "/path/to/logs")
//!     .add_formatter("num", 12)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(format("${path}/app.${num|04}.log", &context).unwrap(), "/path/to/logs/app.0012.log");
//! ```

mod registry;
mod resolver;

pub use registry::{Context, ContextBuilder};
pub use resolver::Resolver;

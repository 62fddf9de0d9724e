//! Chat reply templating.
//!
//! This module provides:
//! - Placeholder path parsing (`{user}`, `{0}`, `{obj.list[0]["name"]}`)
//! - Argument sources: positional, flat mapping, or nested values
//! - Substitution engine where unresolved placeholders render empty
//!
//! # Example
//!
//! ```ignore
//! let source = ArgumentSource::from(json!({
//!     "user": "Bob",
//!     "match": ["1234", "1234"]
//! }));
//!
//! let line = render_template("code {match.1} from {user}", &source);
//! assert_eq!(line, "code 1234 from Bob");
//! ```

mod path;
mod substitution;
mod types;

pub use path::{parse_path, PathError, Segment};
pub use substitution::{render_template, render_with_policy};
pub use types::{stringify, ArgumentSource, RenderPolicy};
pub(crate) use types::is_falsy;

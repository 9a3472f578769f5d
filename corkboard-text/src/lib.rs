//! # Corkboard Text
//!
//! Text helpers for rendering user content on a bulletin board.
//!
//! ## Features
//!
//! - **Configurable escaping** - default five HTML entities plus extra,
//!   excluded and overridden characters
//! - **Double-escape prevention** - existing entity references such as
//!   `&amp;` or `&#x2F;` are passed through, so escaping is idempotent
//! - **Truncation** - character-aware previews with optional word-safe cuts
//!
//! ## Escaping
//!
//! ```rust
//! use corkboard_text::{escape, escape_html, EscapeConfig, Escaper};
//!
//! assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
//!
//! // Already escaped text is left alone
//! assert_eq!(escape_html("Tom &amp; Jerry"), "Tom &amp; Jerry");
//!
//! // ...unless double escaping is requested
//! let raw = EscapeConfig::new().prevent_double_escape(false);
//! assert_eq!(escape("&lt;safe&gt;", &raw), "&amp;lt;safe&amp;gt;");
//!
//! // Bind a configuration once and reuse it
//! let attr = Escaper::new(EscapeConfig::new().with_extra('/').with_entity('/', "&#x2F;")).unwrap();
//! assert_eq!(attr.escape("</a>"), "&lt;&#x2F;a&gt;");
//! ```
//!
//! ## Truncation
//!
//! ```rust
//! use corkboard_text::{truncate, TruncateOptions};
//!
//! let preview = truncate("Welcome to the board, please read the rules", 16, &TruncateOptions::word_safe());
//! assert_eq!(preview, "Welcome to the...");
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod truncate;

pub use config::{DEFAULT_ENTITIES, EscapeConfig};
pub use encoder::{Escaper, decode_entities, escape, escape_html, escape_value, make_escaper};
pub use error::{Result, TextError};
pub use truncate::{TruncateOptions, truncate, truncate_value};

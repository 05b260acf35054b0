//! Converts design-token JSON (`$type` / `$value` trees) into CSS custom
//! properties, CSS class rules or token-to-token references.
//!
//! ```no_run
//! use token_parser::{render, Config, SourceFile, TokenContext};
//!
//! let text = std::fs::read_to_string("tokens.json").unwrap();
//! let mut ctx = TokenContext::builtin();
//! let css = render(&Config::default(), &[SourceFile::parse("tokens.json", &text)], &mut ctx);
//! println!("{css}");
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod expression;
pub mod extensions;
pub mod generate;
pub mod keywords;
pub mod mapping;
pub mod naming;
pub mod output;
pub mod preview;
pub mod scanner;
pub mod store;
pub mod token;
pub mod validator;

pub use config::{Config, FileVariant, OutputMode, ResponsiveMode, TokenFormat};
pub use context::TokenContext;
pub use error::{ConfigError, GenerateError, KeywordError, StoreError};
pub use generate::{render, try_render, SourceFile};
pub use keywords::KeywordSet;
pub use mapping::{PropertyMapper, PropertyMapping, PropertyRegistry};
pub use naming::{Depth, NamingOptions};
pub use output::{render_output, Artifact, Output};
pub use preview::{PreviewScheduler, PreviewSession};
pub use token::{extract, TokenRecord};

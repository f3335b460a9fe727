//! # Prompt Bridge Translator
//!
//! Converts Stable Diffusion web UI prompt emphasis into InvokeAI syntax.
//!
//! ## Architecture
//!
//! ```text
//! Prompt
//!     │
//!     ├──> Lexer (one regex, escapes → brackets → weights → text)
//!     │
//!     ├──> Attention Parser
//!     │    ├─> Bracket stacks record where each ( / [ opened
//!     │    ├─> Closers multiply every segment since their opener
//!     │    ├─> BREAK becomes a ("BREAK", -1) separator
//!     │    └─> Adjacent segments with equal weight are merged
//!     │
//!     └──> Invoke Formatter
//!          ├─> Rewrite <lora:NAME:WEIGHT> → withLora(NAME,WEIGHT)
//!          └─> (text)+++ / (text)-- per 0.1 of weight
//! ```
//!
//! ## Example
//!
//! ```rust
//! use prompt_bridge_translator::translate;
//!
//! assert_eq!(translate("((masterpiece)), [blurry]"), "(masterpiece)++, (blurry)-");
//! assert_eq!(translate("(cat:1.3)"), "(cat)+++");
//! assert_eq!(translate("<lora:film_grain:0.8>"), "withLora(film_grain,0.8)");
//! ```

mod config;
mod error;
mod formatter;
mod lexer;
mod lora;
mod parser;
mod translator;
mod types;

pub use config::{
    TranslatorConfig, EMPHASIS_STEP, ROUND_BRACKET_MULTIPLIER, SQUARE_BRACKET_MULTIPLIER,
};
pub use error::{Result, TranslatorError};
pub use formatter::InvokeFormatter;
pub use lexer::{tokenize, Token};
pub use lora::rewrite_lora_tags;
pub use parser::AttentionParser;
pub use translator::{translate, Translator};
pub use types::{Attention, Segment, BREAK_TEXT, BREAK_WEIGHT};

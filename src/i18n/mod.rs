//! Internationalization (i18n) module for the supported site locales.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` type; only registered, enabled codes can be constructed
//! - `strings`: Pre-authored per-locale copy (page metadata, lead-magnet text)
//! - `validator`: Structural checks on translated article bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use content_pipeline::i18n::{Language, LanguageRegistry};
//!
//! let source = Language::canonical(); // Italian
//! let german = Language::from_code("de")?;
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod language;
mod registry;
mod strings;
mod validator;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
pub use validator::{TranslationValidator, ValidationReport};

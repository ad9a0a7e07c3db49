//! Resource catalog: the data model behind the resource directory page.
//!
//! Everything in here is pure (no DOM, no I/O) so the controllers can be
//! exercised from plain unit tests; the frontend wraps [`session::BrowserSession`]
//! in a signal and renders from it.

pub mod aggregate;
pub mod calibration;
pub mod error;
pub mod filter;
pub mod icon;
pub mod palette;
pub mod search;
pub mod session;
pub mod stats;

pub use aggregate::{Catalog, CatalogDocument, Category, Resource, TagDefinition, ALL_TAG_ID};
pub use calibration::calibrate;
pub use error::{LoadError, SearchPatternError};
pub use icon::{normalize, DefaultGlyph, IconContext, IconDescriptor, IconFragment};
pub use palette::ThemeColor;
pub use search::{PatternMode, SearchOptions, SearchQuery, SearchResults, TextSegment};
pub use session::{BrowserSession, ContentKey, QueryChange, Transition};
pub use stats::{aggregate_stats, CatalogStats};

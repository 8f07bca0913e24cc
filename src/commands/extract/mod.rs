//! Row-based key-value reconstruction for property-sheet zones.
//!
//! Positioned text-layer fragments go through the geometric row parser;
//! flat OCR text goes through the keyword-slice parser. Both share one
//! catalog and one output format.

mod catalog;
mod dispatch;
mod key_locate;
mod keyword_slice;
mod positional_parse;
mod reading_order;
mod row_bounds;
mod row_values;
mod run;
mod source_select;
mod types;

pub use catalog::{FieldCatalog, OVERVIEW_KEYS};
pub use dispatch::{ZoneDispatcher, ZoneSource};
pub use keyword_slice::{OcrTextCleaner, parse_keyword_slices};
pub use positional_parse::parse_positional;
pub use run::{ZoneOutcome, extract_zone, run};
pub use types::{ExtractedField, ParserSettings, TextFragment, ZoneExtraction};

//! YDK Converter - deck-list to readable text web service
//!
//! Accepts a `.ydk` deck-list upload, resolves numeric card identifiers to
//! names via a local directory with a YGOPRODeck API fallback, tallies
//! duplicates per deck section and returns a formatted report plus a
//! downloadable file.

pub mod card_directory;
pub mod deck;
pub mod error;
pub mod report_store;
pub mod resolver;
pub mod web;
pub mod ygoprodeck;

pub use card_directory::CardDirectory;
pub use deck::{convert_ydk, parse_ydk, render_report, DeckSections, Section};
pub use error::{ConvertError, Result};
pub use report_store::ReportStore;
pub use resolver::CardResolver;

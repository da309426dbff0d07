//! YDK deck-list parsing and report rendering
//!
//! A `.ydk` file is UTF-8 text: lines are either metadata comments
//! (ignored), one of three literal section markers (`#main`, `#extra`,
//! `!side`), or decimal card identifiers. The report lists each section in
//! fixed order with per-name occurrence counts.

use crate::error::{ConvertError, Result};
use crate::resolver::CardResolver;
use std::collections::BTreeMap;

/// Metadata lines carrying this prefix are skipped
const CREATED_MARKER: &str = "#created";

/// The three deck partitions, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Main,
    Extra,
    Side,
}

impl Section {
    /// Heading label used in the rendered report
    pub fn label(&self) -> &'static str {
        match self {
            Section::Main => "Main",
            Section::Extra => "Extra",
            Section::Side => "Side",
        }
    }

    /// Section selected by a marker line, if it is one
    fn from_marker(line: &str) -> Option<Section> {
        match line {
            "#main" => Some(Section::Main),
            "#extra" => Some(Section::Extra),
            "!side" => Some(Section::Side),
            _ => None,
        }
    }
}

/// Card entries per section, in order of appearance (duplicates retained)
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeckSections {
    pub main: Vec<String>,
    pub extra: Vec<String>,
    pub side: Vec<String>,
}

impl DeckSections {
    fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Main => &mut self.main,
            Section::Extra => &mut self.extra,
            Section::Side => &mut self.side,
        }
    }

    fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Main => &self.main,
            Section::Extra => &self.extra,
            Section::Side => &self.side,
        }
    }
}

/// Collect card identifiers into their sections.
///
/// Blank lines, `#created` metadata and unrecognized lines are skipped.
/// Identifier lines seen before any section marker are silently dropped;
/// the original converter behaves this way and decks in the wild rely on
/// the tolerance.
pub fn parse_ydk(text: &str) -> DeckSections {
    let mut sections = DeckSections::default();
    let mut current: Option<Section> = None;

    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() || line.starts_with(CREATED_MARKER) {
            continue;
        }
        if let Some(section) = Section::from_marker(line) {
            current = Some(section);
        } else if is_card_id(line) {
            if let Some(section) = current {
                sections.section_mut(section).push(line.to_string());
            }
        }
    }

    sections
}

fn is_card_id(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Render the aggregated report from resolved card names.
///
/// Sections always appear as Main, Extra, Side. Within a section, distinct
/// names are sorted by ordinal comparison and emitted as `  <name> x<count>`;
/// each section ends with a blank separator line. Surrounding whitespace is
/// trimmed from the joined result.
pub fn render_report(deck: &DeckSections) -> String {
    let mut output: Vec<String> = Vec::new();

    for section in [Section::Main, Section::Extra, Section::Side] {
        output.push(format!("\n{} Deck:", section.label()));

        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for name in deck.section(section) {
            *counts.entry(name.as_str()).or_insert(0) += 1;
        }
        for (name, count) in &counts {
            output.push(format!("  {} x{}", name, count));
        }

        // Spacing between sections
        output.push(String::new());
    }

    output.join("\n").trim().to_string()
}

/// Convert raw `.ydk` bytes into the readable report.
///
/// Any internal failure surfaces as `InvalidFormat`; the detail stays
/// server-side, callers show a generic message.
pub async fn convert_ydk(raw: &[u8], resolver: &CardResolver) -> Result<String> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| ConvertError::InvalidFormat(format!("not valid UTF-8: {}", e)))?;

    let ids = parse_ydk(text);

    let mut resolved = DeckSections::default();
    for section in [Section::Main, Section::Extra, Section::Side] {
        for card_id in ids.section(section) {
            // Sequential on purpose; one round trip per unresolved identifier
            let name = resolver.resolve(card_id).await;
            resolved.section_mut(section).push(name);
        }
    }

    Ok(render_report(&resolved))
}

#[cfg(test)]
#[path = "deck_tests.rs"]
mod tests;

use std::ops::RangeInclusive;

use crate::application::ports::TextRepair;

const HEBREW_BLOCK: RangeInclusive<char> = '\u{0590}'..='\u{05FF}';

/// Words observed to come out mirrored in OCR output of right-to-left
/// scans. A line containing any of them is reversed wholesale, even when
/// the match is coincidental; lines without a match are never touched.
const MIRRORED_MARKERS: [&str; 4] = ["ךמס", "ךאראת", "רובסל", "יק יק"];

/// Narrow repair for OCR output that mirrored Hebrew lines. Not a
/// bidirectional-text algorithm: it only flips lines it can positively
/// match against the marker set.
#[derive(Debug, Default)]
pub struct MirroredHebrewRepair;

impl MirroredHebrewRepair {
    pub fn new() -> Self {
        Self
    }
}

impl TextRepair for MirroredHebrewRepair {
    fn repair(&self, text: &str) -> String {
        if !contains_hebrew(text) {
            return text.to_string();
        }

        let lines: Vec<String> = text
            .split('\n')
            .map(|line| {
                if contains_hebrew(line)
                    && MIRRORED_MARKERS.iter().any(|marker| line.contains(marker))
                {
                    tracing::debug!(chars = line.chars().count(), "reversed mirrored line");
                    reverse_line(line)
                } else {
                    line.to_string()
                }
            })
            .collect();

        lines.join("\n")
    }
}

fn contains_hebrew(text: &str) -> bool {
    text.chars().any(|c| HEBREW_BLOCK.contains(&c))
}

/// Character-order reversal of the whole line, not word-order.
fn reverse_line(line: &str) -> String {
    line.chars().rev().collect()
}

//! Ability fortune extraction from lore text
//!
//! Counter-based hoes report their ability bonus only through display text
//! (e.g. `§7You have §6+58⁘ Farming Fortune`). Extraction is best-effort:
//! anything that does not match contributes zero.

use once_cell::sync::Lazy;
use regex::Regex;

static ABILITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"You have (?:§.)*\+(\d+)(?:§.)*⁘").expect("ability pattern is a valid regex")
});

/// Sum of every "You have +N⁘" bonus on one lore line
pub fn extract_ability_fortune_line(line: &str) -> f64 {
    ABILITY_PATTERN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .map(f64::from)
        .sum()
}

/// Sum of every ability bonus across all lore lines
pub fn extract_ability_fortune(lore: &[String]) -> f64 {
    lore.iter().map(|line| extract_ability_fortune_line(line)).sum()
}

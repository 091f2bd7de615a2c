//! Summary of one truncation run.

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use serde::Serialize;

use super::tier::{SizeTier, TierSettings};
use crate::constants::Kilometer;

/// Outcome of truncating one body.
///
/// Fields
/// -----------------
/// * `terms_before`, `terms_after`: number of terms.
/// * `chars_before`, `chars_after`: characters taken by the coefficients in JSON.
/// * `rounding_steps`: digit roundings applied in phase 1.
/// * `dropped_terms`: terms removed in phase 2.
/// * `threshold_km`: error allowed per character saved.
/// * `error_bound_km`: sum of the bounds of all applied changes over the tier window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyReport {
    pub body: String,
    pub terms_before: usize,
    pub terms_after: usize,
    pub chars_before: usize,
    pub chars_after: usize,
    pub rounding_steps: usize,
    pub dropped_terms: usize,
    pub threshold_km: Kilometer,
    pub error_bound_km: Kilometer,
}

impl BodyReport {
    pub fn chars_saved(&self) -> usize {
        self.chars_before.saturating_sub(self.chars_after)
    }
}

/// Outcome of one tier over a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruncationReport {
    pub tier: SizeTier,
    pub settings: TierSettings,
    pub bodies: Vec<BodyReport>,
    /// Bodies left out of the output.
    pub excluded: Vec<String>,
}

impl TruncationReport {
    pub fn terms_before(&self) -> usize {
        self.bodies.iter().map(|b| b.terms_before).sum()
    }

    pub fn terms_after(&self) -> usize {
        self.bodies.iter().map(|b| b.terms_after).sum()
    }

    pub fn chars_before(&self) -> usize {
        self.bodies.iter().map(|b| b.chars_before).sum()
    }

    pub fn chars_after(&self) -> usize {
        self.bodies.iter().map(|b| b.chars_after).sum()
    }

    pub fn body(&self, name: &str) -> Option<&BodyReport> {
        self.bodies.iter().find(|b| b.body == name)
    }
}

impl fmt::Display for TruncationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Tier {} (threshold = {:e}, t_max = {} centuries)",
            self.tier, self.settings.threshold, self.settings.t_max
        )?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Body"),
            Cell::new("Terms"),
            Cell::new("Chars"),
            Cell::new("Rounded"),
            Cell::new("Dropped"),
            Cell::new("km/char"),
            Cell::new("Bound [km]"),
        ]);

        for b in &self.bodies {
            table.add_row(Row::from(vec![
                Cell::new(&b.body),
                Cell::new(format!("{} → {}", b.terms_before, b.terms_after))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{} → {}", b.chars_before, b.chars_after))
                    .set_alignment(CellAlignment::Right),
                Cell::new(b.rounding_steps).set_alignment(CellAlignment::Right),
                Cell::new(b.dropped_terms).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3e}", b.threshold_km)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3e}", b.error_bound_km))
                    .set_alignment(CellAlignment::Right),
            ]));
        }
        writeln!(f, "{table}")?;

        if !self.excluded.is_empty() {
            writeln!(f, "Excluded: {}", self.excluded.join(", "))?;
        }
        write!(
            f,
            "Total: {} → {} terms, {} → {} chars",
            self.terms_before(),
            self.terms_after(),
            self.chars_before(),
            self.chars_after()
        )
    }
}

#[cfg(test)]
mod report_test {
    use super::*;

    fn body(name: &str, before: usize, after: usize) -> BodyReport {
        BodyReport {
            body: name.to_string(),
            terms_before: before,
            terms_after: after,
            chars_before: before * 30,
            chars_after: after * 12,
            rounding_steps: 7,
            dropped_terms: before - after,
            threshold_km: 15.0,
            error_bound_km: 120.0,
        }
    }

    #[test]
    fn test_totals_and_display() {
        let report = TruncationReport {
            tier: SizeTier::Small,
            settings: TierSettings::new(1e-7, 10.0),
            bodies: vec![body("MARS", 10, 4), body("VENUS", 5, 5)],
            excluded: vec!["EARTH".into()],
        };
        assert_eq!(report.terms_before(), 15);
        assert_eq!(report.terms_after(), 9);
        assert_eq!(report.body("MARS").unwrap().chars_saved(), 300 - 48);
        assert!(report.body("PLUTO").is_none());

        let text = report.to_string();
        assert!(text.starts_with("Tier small (threshold = 1e-7, t_max = 10 centuries)"));
        assert!(text.contains("VENUS"));
        assert!(text.contains("Excluded: EARTH"));
        assert!(text.ends_with("Total: 15 → 9 terms, 450 → 108 chars"));
    }
}

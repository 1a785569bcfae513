//! # Human-readable rendering of star-hopping results
//!
//! [`PathResult`] implements [`Display`](std::fmt::Display):
//!
//! - with hops, a [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/) table
//!   `# | From | To | Mag | Bearing | Dir | Dist`, preceded by the start star and followed by
//!   the final approach to the target;
//! - without hops, a single line describing the outcome.
//!
//! Example
//! -------
//! ```text
//! Start at Mirach (mag 2.1), target M33
//! ┌───┬─────────┬─────────┬─────┬─────────┬─────┬──────┐
//! │ # ┆ From    ┆ To      ┆ Mag ┆ Bearing ┆ Dir ┆ Dist │
//! ╞═══╪═════════╪═════════╪═════╪═════════╪═════╪══════╡
//! │ 1 ┆ Mirach  ┆ ...     ┆ 4.5 ┆  147.2° ┆ SSE ┆ 3.9° │
//! └───┴─────────┴─────────┴─────┴─────────┴─────┴──────┘
//! Then 2.1° SE (131.0°) to M33
//! ```
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use super::{FinalApproach, PathResult, PathStatus};

impl PathResult {
    /// The hop table alone, `None` when there is no hop to show.
    pub fn hop_table(&self) -> Option<Table> {
        if self.hops.is_empty() {
            return None;
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("From"),
            Cell::new("To"),
            Cell::new("Mag"),
            Cell::new("Bearing"),
            Cell::new("Dir"),
            Cell::new("Dist"),
        ]);

        for (i, hop) in self.hops.iter().enumerate() {
            let mag = hop
                .to_magnitude
                .map(|m| format!("{m:.1}"))
                .unwrap_or_else(|| "-".into());
            table.add_row(Row::from(vec![
                Cell::new(i + 1).set_alignment(CellAlignment::Right),
                Cell::new(&hop.from),
                Cell::new(&hop.to),
                Cell::new(mag).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}°", hop.bearing)).set_alignment(CellAlignment::Right),
                Cell::new(hop.direction),
                Cell::new(format!("{:.1}°", hop.distance)).set_alignment(CellAlignment::Right),
            ]));
        }
        Some(table)
    }

    fn target_label(&self) -> &str {
        self.target
            .as_ref()
            .map(|t| t.canonical_name.as_str())
            .unwrap_or(&self.target_name)
    }

    fn write_approach(&self, f: &mut fmt::Formatter<'_>, approach: &FinalApproach) -> fmt::Result {
        write!(
            f,
            "{:.1}° {} ({:.1}°) to {}",
            approach.distance,
            approach.direction,
            approach.bearing,
            self.target_label()
        )
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            PathStatus::TargetNotFound => {
                return write!(f, "Object not found: {}", self.target_name)
            }
            PathStatus::TargetNotVisible => {
                let altitude = self.target_horizontal.map(|h| h.altitude).unwrap_or(0.0);
                return write!(
                    f,
                    "{} is below the horizon (altitude {altitude:.1}°)",
                    self.target_label()
                );
            }
            PathStatus::NoStartingStarFound => {
                return write!(
                    f,
                    "No bright visible star near {} to start from",
                    self.target_label()
                )
            }
            _ => {}
        }

        if let Some(start) = &self.start_star {
            let mag = start.magnitude.map(|m| format!(" (mag {m:.1})")).unwrap_or_default();
            write!(
                f,
                "Start at {}{mag}, target {}",
                start.display_name(),
                self.target_label()
            )?;
        }

        if self.status == PathStatus::TargetInStartFov {
            if let Some(approach) = &self.final_approach {
                write!(f, ": already in the {:.1}° field, ", self.fov_degrees)?;
                self.write_approach(f, approach)?;
            }
            return Ok(());
        }

        if let Some(table) = self.hop_table() {
            write!(f, "\n{table}")?;
        }

        match (&self.status, &self.final_approach) {
            (PathStatus::Success, Some(approach)) => {
                f.write_str("\nThen ")?;
                self.write_approach(f, approach)
            }
            _ => write!(
                f,
                "\nNo path found after {} hop(s), {:.1}° still to go",
                self.hops.len(),
                self.remaining_distance.unwrap_or(f64::NAN)
            ),
        }
    }
}

#[cfg(test)]
mod display_test {
    use super::super::{Hop, HopParams};
    use super::*;
    use crate::catalog::EquatorialRecord;
    use crate::coordinates::CompassPoint;

    fn base(status: PathStatus) -> PathResult {
        let params = HopParams::with_fov(5.0).unwrap();
        PathResult {
            target: Some(EquatorialRecord::new("M33", 1.564, 30.66)),
            start_star: Some(EquatorialRecord::new("Mirach", 1.162, 35.62).with_magnitude(2.07)),
            ..PathResult::terminal(status, "m33", &params)
        }
    }

    #[test]
    fn test_status_lines() {
        let params = HopParams::with_fov(5.0).unwrap();
        let missing = PathResult::terminal(PathStatus::TargetNotFound, "Planet Nine", &params);
        assert_eq!(missing.to_string(), "Object not found: Planet Nine");

        let mut in_fov = base(PathStatus::TargetInStartFov);
        in_fov.final_approach = Some(FinalApproach {
            bearing: 131.04,
            direction: CompassPoint::SouthEast,
            distance: 4.2,
        });
        assert_eq!(
            in_fov.to_string(),
            "Start at Mirach (mag 2.1), target M33: already in the 5.0° field, 4.2° SE (131.0°) to M33"
        );
    }

    #[test]
    fn test_hop_table() {
        let mut result = base(PathStatus::Success);
        result.hops.push(Hop {
            from: "Mirach".into(),
            to: "HIP 6000".into(),
            to_magnitude: None,
            bearing: 147.23,
            direction: CompassPoint::SouthSouthEast,
            distance: 3.9,
        });
        result.final_approach = Some(FinalApproach {
            bearing: 200.0,
            direction: CompassPoint::SouthSouthWest,
            distance: 2.1,
        });

        let text = result.to_string();
        assert!(text.starts_with("Start at Mirach (mag 2.1), target M33\n"));
        for column in ["From", "To", "Mag", "Bearing", "Dir", "Dist", "HIP 6000", "SSE", "147.2°"] {
            assert!(text.contains(column), "missing {column} in\n{text}");
        }
        assert!(text.ends_with("Then 2.1° SSW (200.0°) to M33"));

        result.status = PathStatus::PathNotFound;
        result.final_approach = None;
        result.remaining_distance = Some(6.04);
        assert!(result
            .to_string()
            .ends_with("No path found after 1 hop(s), 6.0° still to go"));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure validation system that turns raw set-up lines into a typed world set-up.
//!
//! A set-up consists of exactly four lines: the grid size, the single zombie
//! position, the creature positions and the movement script. Validation keeps
//! going after the first problem so callers can report every issue at once;
//! it only stops early when a later check cannot run, such as coordinate range
//! checks without a valid grid size.

use outbreak_core::{CellCoord, GridSize, MovementScript, ValidationIssue};
use thiserror::Error;

/// Number of lines a world set-up must contain.
pub const SETUP_LINE_COUNT: usize = 4;

/// World set-up that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedSetup {
    size: GridSize,
    zombie: Option<CellCoord>,
    creatures: Vec<CellCoord>,
    script: MovementScript,
}

impl ValidatedSetup {
    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Starting cell of the initial zombie, if one was supplied.
    #[must_use]
    pub const fn zombie(&self) -> Option<CellCoord> {
        self.zombie
    }

    /// Cells of the uninfected creatures in the order they were listed.
    #[must_use]
    pub fn creatures(&self) -> &[CellCoord] {
        &self.creatures
    }

    /// Movement script exactly as supplied.
    #[must_use]
    pub const fn script(&self) -> &MovementScript {
        &self.script
    }
}

/// Every issue detected in a rejected set-up, in detection order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("world set-up failed validation with {} issue(s)", .issues.len())]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Issues in the order they were detected.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Consumes the report, yielding the underlying issues.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

/// Validates raw set-up lines, producing a typed set-up or every detected issue.
pub fn validate<S>(lines: &[S]) -> Result<ValidatedSetup, ValidationReport>
where
    S: AsRef<str>,
{
    let mut issues = Vec::new();

    let [size_line, zombie_line, creature_line, script_line] = lines else {
        issues.push(ValidationIssue::LineCount {
            expected: SETUP_LINE_COUNT,
            found: lines.len(),
        });
        return Err(ValidationReport { issues });
    };
    let size_line: &str = size_line.as_ref();
    let zombie_line: &str = zombie_line.as_ref();
    let creature_line: &str = creature_line.as_ref();
    let script_line: &str = script_line.as_ref();

    let Some(size) = parse_non_negative(size_line, &mut issues) else {
        issues.push(ValidationIssue::InvalidSize {
            line: size_line.to_owned(),
        });
        return Err(ValidationReport { issues });
    };
    let size = GridSize::new(size);

    let zombies = check_zombie_line(zombie_line, size, &mut issues);
    let creatures = check_positions(creature_line, size, &mut issues);
    if creatures.is_none() {
        issues.push(ValidationIssue::InvalidCreatureLine {
            line: creature_line.to_owned(),
        });
    }

    match (zombies, creatures) {
        (Some(zombies), Some(creatures)) if issues.is_empty() => Ok(ValidatedSetup {
            size,
            zombie: zombies.first().copied(),
            creatures,
            script: MovementScript::new(script_line),
        }),
        _ => Err(ValidationReport { issues }),
    }
}

fn check_zombie_line(
    line: &str,
    size: GridSize,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Vec<CellCoord>> {
    let positions = check_positions(line, size, issues);
    let multiple = coordinate_groups(line).count() > 1;
    if multiple {
        issues.push(ValidationIssue::MultipleZombies {
            line: line.to_owned(),
        });
    }

    if positions.is_none() || multiple {
        issues.push(ValidationIssue::InvalidZombieLine {
            line: line.to_owned(),
        });
        return None;
    }
    positions
}

/// Checks every coordinate pair on the line, returning the cells when all are valid.
fn check_positions(
    line: &str,
    size: GridSize,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Vec<CellCoord>> {
    let mut cells = Vec::new();
    let mut valid = true;

    for group in coordinate_groups(line) {
        let (column, row) = pair_fields(group);
        let column = parse_non_negative(column.trim(), issues);
        let row = parse_non_negative(row.trim(), issues);

        match (column, row) {
            (Some(column), Some(row)) => {
                let cell = CellCoord::new(column, row);
                if size.contains(cell) {
                    cells.push(cell);
                } else {
                    issues.push(ValidationIssue::CoordinateOutsideGrid {
                        group: group.to_owned(),
                    });
                    valid = false;
                }
            }
            _ => {
                issues.push(ValidationIssue::InvalidCoordinate {
                    group: group.to_owned(),
                });
                valid = false;
            }
        }
    }

    valid.then_some(cells)
}

/// Splits a pair into its first two comma-separated fields.
///
/// Trailing empty fields are dropped and anything past the second field is
/// ignored, so `1,2,3` reads as `(1, 2)` and `0,1,` as `(0, 1)`. A missing field
/// comes back empty.
fn pair_fields(group: &str) -> (&str, &str) {
    let mut fields: Vec<&str> = group.split(',').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        let _ = fields.pop();
    }
    match fields.as_slice() {
        [] => ("", ""),
        [column] => (*column, ""),
        [column, row, ..] => (*column, *row),
    }
}

/// Parses a non-negative 32-bit signed integer exactly as given, recording why it failed.
fn parse_non_negative(text: &str, issues: &mut Vec<ValidationIssue>) -> Option<u32> {
    if text.is_empty() {
        issues.push(ValidationIssue::MissingNumber);
        return None;
    }

    let Ok(value) = text.parse::<i32>() else {
        issues.push(ValidationIssue::NotANumber {
            value: text.to_owned(),
        });
        return None;
    };

    if value < 0 {
        issues.push(ValidationIssue::NegativeNumber {
            value: i64::from(value),
        });
        return None;
    }

    Some(value.unsigned_abs())
}

/// Yields the contents of every shortest `(...)` group on the line.
fn coordinate_groups(line: &str) -> impl Iterator<Item = &str> {
    let mut rest = line;
    std::iter::from_fn(move || {
        let open = rest.find('(')?;
        let after_open = &rest[open + 1..];
        let close = after_open.find(')')?;
        let group = &after_open[..close];
        rest = &after_open[close + 1..];
        Some(group)
    })
}

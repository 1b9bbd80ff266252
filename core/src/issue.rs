//! Structured diagnostics produced while validating a world set-up.

use thiserror::Error;

/// Broad category of a [`ValidationIssue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// The set-up does not have the required shape.
    Structural,
    /// A value that must be a number is not one.
    Parse,
    /// A number lies outside its permitted range.
    Range,
    /// More entities were supplied than the line permits.
    Cardinality,
    /// Line-level summary that accompanies the detailed issues of that line.
    Summary,
}

/// Single problem detected in a world set-up.
///
/// The `Display` output is the human-readable diagnostic shown to users.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// The set-up does not consist of exactly the expected number of lines.
    #[error("Incorrect number of lines in the input file. Required {expected} but found {found}")]
    LineCount {
        /// Number of lines a set-up must contain.
        expected: usize,
        /// Number of lines actually supplied.
        found: usize,
    },
    /// A number was expected but the text was empty.
    #[error("No number is provided")]
    MissingNumber,
    /// The text could not be parsed as an integer.
    #[error("Number provided is not a valid number: {value}")]
    NotANumber {
        /// Offending text.
        value: String,
    },
    /// The integer parsed but is negative.
    #[error("Number provided is not a positive number: {value}")]
    NegativeNumber {
        /// Offending value.
        value: i64,
    },
    /// The first line does not hold a usable grid size.
    #[error(
        "The 1st line should be a positive number defining the height and length of the world (grid) but found {line}"
    )]
    InvalidSize {
        /// Raw first line.
        line: String,
    },
    /// One side of a coordinate pair is not a valid non-negative integer.
    #[error("One of the position co-ordinates is not a valid number: {group}")]
    InvalidCoordinate {
        /// Contents of the parenthesised group.
        group: String,
    },
    /// A coordinate pair lies outside the grid.
    #[error("One of the position co-ordinates is outside the grid: {group}")]
    CoordinateOutsideGrid {
        /// Contents of the parenthesised group.
        group: String,
    },
    /// The zombie line lists more than one coordinate pair.
    #[error("More than one zombie has been provided: {line}")]
    MultipleZombies {
        /// Raw zombie line.
        line: String,
    },
    /// The zombie line failed validation.
    #[error("The 2nd line should be valid zombie co-ordinates but found {line}")]
    InvalidZombieLine {
        /// Raw zombie line.
        line: String,
    },
    /// The creature line failed validation.
    #[error("The 3rd line should be valid creature co-ordinates but found {line}")]
    InvalidCreatureLine {
        /// Raw creature line.
        line: String,
    },
}

impl ValidationIssue {
    /// Category the issue belongs to.
    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        match self {
            Self::LineCount { .. } => IssueKind::Structural,
            Self::MissingNumber | Self::NotANumber { .. } | Self::InvalidCoordinate { .. } => {
                IssueKind::Parse
            }
            Self::NegativeNumber { .. } | Self::CoordinateOutsideGrid { .. } => IssueKind::Range,
            Self::MultipleZombies { .. } => IssueKind::Cardinality,
            Self::InvalidSize { .. }
            | Self::InvalidZombieLine { .. }
            | Self::InvalidCreatureLine { .. } => IssueKind::Summary,
        }
    }
}

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use mars_rover_core::CellCoord;
use mars_rover_world::Grid;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SURVEY_DOMAIN: &str = "rover";
const SURVEY_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded survey payload.
pub(crate) const SURVEY_HEADER: &str = "rover:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Grid dimensions and obstacle cells captured as a single transferable line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Survey {
    /// Number of rows in the surveyed grid.
    pub(crate) rows: i32,
    /// Number of columns in the surveyed grid.
    pub(crate) columns: i32,
    /// Obstacle cells in row-major order.
    pub(crate) obstacles: Vec<CellCoord>,
}

impl Survey {
    /// Captures the dimensions and obstacles of an existing grid.
    #[must_use]
    pub(crate) fn from_grid(grid: &Grid) -> Self {
        let (rows, columns) = grid.dimensions();
        Self {
            rows,
            columns,
            obstacles: grid.obstacles().collect(),
        }
    }

    /// Encodes the survey as `rover:v1:<rows>x<columns>:<payload>`.
    pub(crate) fn encode(&self) -> Result<String, SurveyError> {
        let payload = SerializableSurvey {
            obstacles: self.obstacles.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(SurveyError::Serialization)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{SURVEY_HEADER}{FIELD_DELIMITER}{}x{}{FIELD_DELIMITER}{encoded}",
            self.rows, self.columns
        ))
    }

    /// Decodes a survey from its single-line representation.
    pub(crate) fn decode(value: &str) -> Result<Self, SurveyError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SurveyError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SurveyError::MissingPrefix)?;
        let version = parts.next().ok_or(SurveyError::MissingVersion)?;
        let dimensions = parts.next().ok_or(SurveyError::MissingDimensions)?;
        let payload = parts.next().ok_or(SurveyError::MissingPayload)?;
        if parts.next().is_some() {
            return Err(SurveyError::TrailingSegments);
        }

        if domain != SURVEY_DOMAIN {
            return Err(SurveyError::InvalidPrefix(domain.to_owned()));
        }
        if version != SURVEY_VERSION {
            return Err(SurveyError::UnsupportedVersion(version.to_owned()));
        }

        let (rows, columns) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(SurveyError::InvalidEncoding)?;
        let decoded: SerializableSurvey =
            serde_json::from_slice(&bytes).map_err(SurveyError::InvalidPayload)?;

        Ok(Self {
            rows,
            columns,
            obstacles: decoded.obstacles,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSurvey {
    obstacles: Vec<CellCoord>,
}

/// Errors that can occur while encoding or decoding survey strings.
#[derive(Debug, Error)]
pub(crate) enum SurveyError {
    /// The provided string was empty or contained only whitespace.
    #[error("survey string was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("survey string is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("survey string is missing the version")]
    MissingVersion,
    /// The grid dimensions were missing.
    #[error("survey string is missing the grid dimensions")]
    MissingDimensions,
    /// The payload segment was missing.
    #[error("survey string is missing the payload")]
    MissingPayload,
    /// Extra segments followed the payload.
    #[error("survey string has unexpected segments after the payload")]
    TrailingSegments,
    /// The prefix segment named another format.
    #[error("survey prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The version segment named an unsupported revision.
    #[error("survey version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed or were not positive.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode survey payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not a valid obstacle list.
    #[error("could not parse survey payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The obstacle list could not be serialised.
    #[error("could not serialise survey payload: {0}")]
    Serialization(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<(i32, i32), SurveyError> {
    let invalid = || SurveyError::InvalidDimensions(dimensions.to_owned());
    let (rows, columns) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let rows = rows.trim().parse::<i32>().map_err(|_| invalid())?;
    let columns = columns.trim().parse::<i32>().map_err(|_| invalid())?;

    if rows <= 0 || columns <= 0 {
        return Err(invalid());
    }

    Ok((rows, columns))
}

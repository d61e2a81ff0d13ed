use crate::mode::{AdapterIndex, VALID_BIT_DEPTHS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("querying display devices: {0}")]
    Enumeration(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("error setting display {adapter} to display mode: {status}")]
    Commit { adapter: AdapterIndex, status: i32 },
    #[error("launching DisplaySwitch.exe")]
    Duplication(#[source] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Enumeration(_) | Error::Duplication(_) => 1,
            Error::Validation(err) => err.exit_code(),
            Error::Commit { status, .. } => *status,
        }
    }
}

/// Rejected command line input. Raised before any mode change is attempted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Set resolution switch used, but no resolutions definition followed. Please specify.")]
    MissingModes,
    #[error("Set resolution switch used, but incorrect resolutions definition followed. Comma separated argument count must be a multiple of 5.")]
    MalformedModes,
    #[error("Set rotations switch used, but no rotations definition followed. Please specify.")]
    MissingRotations,
    #[error("Set rotations switch used, but incorrect rotations definition followed. Comma separated argument count must be a multiple of 2.")]
    MalformedRotations,
    #[error("Target display: {index} outside known display count: {count}")]
    AdapterOutOfRange { index: AdapterIndex, count: usize },
    #[error("Target width: {value} outside range {min}-{max}.")]
    Width { value: u32, min: u32, max: u32 },
    #[error("Target height: {value} outside range {min}-{max}.")]
    Height { value: u32, min: u32, max: u32 },
    #[error("Target bit depth: {value} outside range: {:?}", VALID_BIT_DEPTHS)]
    BitDepth { value: u32 },
    #[error("Target refresh rate: {value} outside range {min}-{max}.")]
    RefreshRate { value: u32, min: u32, max: u32 },
    #[error("Target rotation: {value} outside range: [0, 90, 180, 270]")]
    Rotation { value: u32 },
    #[error("Unable to process target display settings, please check syntax.")]
    ModeSyntax,
    #[error("Unable to process target display rotation settings, please check syntax.")]
    RotationSyntax,
    #[error("Parameter: {flag} is exclusive and cannot be combined with other operations")]
    Exclusive { flag: &'static str },
}

impl ValidationError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidationError::MissingModes
            | ValidationError::MalformedModes
            | ValidationError::MissingRotations
            | ValidationError::MalformedRotations => 2,
            ValidationError::AdapterOutOfRange { .. } => 3,
            ValidationError::Width { .. } | ValidationError::Rotation { .. } => 4,
            ValidationError::Height { .. } | ValidationError::RotationSyntax => 5,
            ValidationError::BitDepth { .. } => 6,
            ValidationError::RefreshRate { .. } => 7,
            ValidationError::ModeSyntax => 8,
            ValidationError::Exclusive { .. } => 9,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

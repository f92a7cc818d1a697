/// Failures raised by the navigation core.
///
/// Degenerate but valid inputs (missing heading, zero distance, identical
/// points) never end up here.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum NavError {
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("invalid heading {0}")]
    InvalidHeading(f64),

    #[error("portal {0} not found")]
    UnknownTarget(u32),

    #[error("invalid configuration : {0}")]
    InvalidConfig(String),
}

pub type NavResult<T> = Result<T, NavError>;

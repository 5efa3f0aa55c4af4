use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    SeedHashMismatch { expected: u32, actual: u32 },
    LengthMismatch { expected: usize, actual: usize },
    BarMismatch { index: usize },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::SeedHashMismatch { expected, actual } => {
                write!(f, "seed hash mismatch: logged {expected}, regenerated {actual}")
            }
            ReplayError::LengthMismatch { expected, actual } => {
                write!(f, "bar count mismatch: logged {expected}, regenerated {actual}")
            }
            ReplayError::BarMismatch { index } => write!(f, "bar {index} differs from log"),
        }
    }
}

impl std::error::Error for ReplayError {}

#[derive(Debug)]
pub enum BarcodeError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Replay { seed: String, source: ReplayError },
}

impl fmt::Display for BarcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarcodeError::Io(e) => write!(f, "io error: {e}"),
            BarcodeError::Json(e) => write!(f, "invalid json: {e}"),
            BarcodeError::Replay { seed, source } => write!(f, "replay failed for seed {seed:?}: {source}"),
        }
    }
}

impl std::error::Error for BarcodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BarcodeError::Io(e) => Some(e),
            BarcodeError::Json(e) => Some(e),
            BarcodeError::Replay { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for BarcodeError {
    fn from(e: std::io::Error) -> Self { BarcodeError::Io(e) }
}

impl From<serde_json::Error> for BarcodeError {
    fn from(e: serde_json::Error) -> Self { BarcodeError::Json(e) }
}

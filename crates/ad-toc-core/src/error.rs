use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    NotMarkdown = 2,
    EmptyDocument = 3,
    InvalidArguments = 4,
    Io = 5,
    Config = 6,
}

impl ExitCode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Success),
            2 => Some(Self::NotMarkdown),
            3 => Some(Self::EmptyDocument),
            4 => Some(Self::InvalidArguments),
            5 => Some(Self::Io),
            6 => Some(Self::Config),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TocError {
    #[error("{} is not a markdown file", path.display())]
    NotMarkdown { path: PathBuf },

    #[error("document {origin} is empty")]
    EmptyDocument { origin: String },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl TocError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotMarkdown { .. } => ExitCode::NotMarkdown,
            Self::EmptyDocument { .. } => ExitCode::EmptyDocument,
            Self::InvalidArguments(_) => ExitCode::InvalidArguments,
            Self::Io(_) => ExitCode::Io,
        }
    }

    /// Precondition failures abort without touching the document.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NotMarkdown { .. } | Self::EmptyDocument { .. })
    }
}

pub type TocResult<T> = Result<T, TocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_round_trip_through_u8() {
        for code in [
            ExitCode::Success,
            ExitCode::NotMarkdown,
            ExitCode::EmptyDocument,
            ExitCode::InvalidArguments,
            ExitCode::Io,
            ExitCode::Config,
        ] {
            assert_eq!(ExitCode::from_u8(code as u8), Some(code));
        }
        assert_eq!(ExitCode::from_u8(1), None);
    }
}

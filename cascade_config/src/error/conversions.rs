//! Conversions from external error types into `CascadeError`.

use figment::Error as FigmentError;

use super::CascadeError;

impl From<clap::Error> for CascadeError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}

impl From<FigmentError> for CascadeError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(Box::new(e))
    }
}

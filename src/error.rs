use crate::mapping::{Direction, Options};
use thiserror::Error;

/// Failure raised when no registered mapping accepts a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("unable to determine model {direction} format; options={options}")]
    NoMatchingFormat {
        direction: Direction,
        options: Options,
    },
}

impl ResolveError {
    /// The request context every mapping rejected.
    pub fn options(&self) -> &Options {
        match self {
            ResolveError::NoMatchingFormat { options, .. } => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_reports_direction_and_options() {
        let err = ResolveError::NoMatchingFormat {
            direction: Direction::Output,
            options: Options::for_location("pom.txt"),
        };
        assert_eq!(
            err.to_string(),
            r#"unable to determine model output format; options={"location":"pom.txt"}"#
        );
        assert_eq!(err.options().location(), Some("pom.txt"));
    }
}

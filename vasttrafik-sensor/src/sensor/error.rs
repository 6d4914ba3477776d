//! Sensor update errors.

/// A failed update cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The configured skip index is past the end of the suggested journeys
    #[error("skip index {skip} is out of range ({available} journeys available)")]
    SkipOutOfRange { skip: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SelectError::SkipOutOfRange {
            skip: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "skip index 3 is out of range (2 journeys available)"
        );
    }
}

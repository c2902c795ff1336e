use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(
        "password length must be between {minimum} and {maximum} to include every character class, got {length}"
    )]
    InvalidLength {
        length: usize,
        minimum: usize,
        maximum: usize,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("cannot sample from an empty {0} character set")]
    EmptyCharacterSet(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_message_states_range() {
        let err = Error::InvalidLength {
            length: 3,
            minimum: 4,
            maximum: 4096,
        };
        let message = err.to_string();
        assert!(message.contains("between 4 and 4096"));
        assert!(message.contains("got 3"));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = Error::invalid_input("site key", "cannot be empty");
        assert_eq!(err.to_string(), "invalid site key: cannot be empty");
    }
}

//! Error types for cursor operations.

use std::fmt;

/// Result type for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors that can occur while reading or writing through a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Attempted to move past the end of the buffer.
    OutOfRange {
        /// Offset the operation started at.
        offset: usize,
        /// Number of bytes requested (zero for a plain jump).
        requested: usize,
        /// Buffer length in bytes.
        len: usize,
    },

    /// A length-prefixed or fixed-length string was not valid UTF-8.
    InvalidUtf8 {
        /// Offset of the first string byte.
        offset: usize,
    },

    /// A 7-bit encoded length prefix ran past five bytes.
    InvalidLengthPrefix {
        /// Offset of the first prefix byte.
        offset: usize,
    },

    /// A length does not fit the on-disk prefix.
    LengthOverflow {
        /// The length that was rejected.
        length: usize,
    },
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                offset,
                requested,
                len,
            } => {
                if *requested == 0 {
                    write!(f, "offset {offset} is outside the {len}-byte buffer")
                } else {
                    write!(
                        f,
                        "attempted to access {requested} bytes at offset {offset} in a {len}-byte buffer"
                    )
                }
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "string at offset {offset} is not valid UTF-8")
            }
            Self::InvalidLengthPrefix { offset } => {
                write!(f, "length prefix at offset {offset} is longer than 5 bytes")
            }
            Self::LengthOverflow { length } => {
                write!(f, "length {length} does not fit a 31-bit length prefix")
            }
        }
    }
}

impl std::error::Error for CursorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_out_of_range() {
        let err = CursorError::OutOfRange {
            offset: 10,
            requested: 4,
            len: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("4 bytes"), "should mention requested bytes");
        assert!(msg.contains("offset 10"), "should mention the offset");
        assert!(msg.contains("12-byte"), "should mention buffer length");
    }

    #[test]
    fn error_display_out_of_range_jump() {
        let err = CursorError::OutOfRange {
            offset: 99,
            requested: 0,
            len: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("99"));
        assert!(msg.contains("outside"));
    }

    #[test]
    fn error_display_invalid_utf8() {
        let msg = CursorError::InvalidUtf8 { offset: 7 }.to_string();
        assert!(msg.contains("UTF-8"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn error_display_length_overflow() {
        let msg = CursorError::LengthOverflow { length: usize::MAX }.to_string();
        assert!(msg.contains("prefix"));
    }

    #[test]
    fn error_equality() {
        let err1 = CursorError::InvalidUtf8 { offset: 1 };
        let err2 = CursorError::InvalidUtf8 { offset: 1 };
        let err3 = CursorError::InvalidUtf8 { offset: 2 };
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<CursorError>();
    }
}

/// The message shown when the backend acknowledges a deletion with an empty body.
pub const DEFAULT_DELETE_MESSAGE: &str = "User deleted successfully!";

/// The acknowledgement returned by the backend for a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReceipt {
    /// The raw text body of the response.
    pub(crate) message: String,
}

impl DeleteReceipt {
    /// Creates a new `DeleteReceipt` from the response body.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// The message to show, falling back to [DEFAULT_DELETE_MESSAGE] for a blank body.
    pub fn message(&self) -> &str {
        match self.message.trim() {
            "" => DEFAULT_DELETE_MESSAGE,
            message => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_uses_response_body() {
        assert_eq!("User deleted1", DeleteReceipt::new("User deleted1").message());
    }

    #[test]
    fn message_falls_back_for_blank_body() {
        assert_eq!(DEFAULT_DELETE_MESSAGE, DeleteReceipt::new("").message());
        assert_eq!(DEFAULT_DELETE_MESSAGE, DeleteReceipt::new(" \n").message());
    }
}

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("patient name is required")]
    EmptyPatientName,
    #[error("user name is required")]
    EmptyUserName,
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("invalid call outcome: {0}")]
    InvalidOutcome(String),
    #[error("call time is in the future")]
    TimestampInFuture,
    #[error("invalid display format: {0}")]
    InvalidDisplayFormat(String),
    #[error("call modal is not open")]
    ModalClosed,
}

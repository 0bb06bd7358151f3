use thiserror::Error;

pub type PbResult<T> = Result<T, PbError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PbError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

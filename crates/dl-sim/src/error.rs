use dl_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("tick length must be positive")]
    ZeroTick,
}

pub type SessionResult<T> = Result<T, SessionError>;

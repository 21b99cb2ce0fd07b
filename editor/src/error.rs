use larder_core::form::FormError;
use larder_core::store::StoreError;

/// Errors reported back to the user for a single command.
///
/// None of these end the session; the loop prints them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no file name; use `save-as PATH`")]
    NoPath,
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CommandResult<T = ()> = Result<T, CommandError>;

impl CommandError {
    /// Text for the error banner, matching the short messages users expect.
    pub fn banner(&self) -> String {
        match self {
            CommandError::Store(StoreError::FileNotFound(_)) => "File not found".to_owned(),
            CommandError::Form(err) if err.rejected_input().is_some() => {
                "Invalid input".to_owned()
            }
            other => other.to_string(),
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("A deletion job is already in progress")]
    DeletionInProgress,

    #[error("No visible items to delete")]
    NothingToDelete,

    #[error("Deletion was declined at the confirmation prompt")]
    ConfirmationDeclined,

    #[error("State store error: {0}")]
    Store(String),

    #[error("Playlist input error: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;

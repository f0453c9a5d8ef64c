use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to create destination directory. error: {source}")]
    DirCreationError {
        #[from]
        source: io::Error,
    },
}

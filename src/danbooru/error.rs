use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("No posts found for tag selection")]
    ZeroPosts,

    #[error("Imageboard returned an invalid response")]
    InvalidServerResponse,

    #[error("Connection Error")]
    ConnectionError(#[from] reqwest::Error),
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Texture(#[from] angel_tex::TextureError),
    #[error(transparent)]
    Pipeline(#[from] angel_tex_image::ImageError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("Input path does not exist: {0}")]
    MissingInput(PathBuf),
}

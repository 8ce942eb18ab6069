use thiserror::Error;

#[derive(Debug, Error)]
pub enum AntError {
    #[error("{0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Couldn't write the frame image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("The nest was enclosed by obstacles in every one of {attempts} generated layouts")]
    NestEnclosed { attempts: usize },
    #[error("Couldn't build the ground color gradient: {0}")]
    Palette(String),
}

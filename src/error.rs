// Crate-wide error type
use thiserror::Error;

use crate::prelude::Float;

pub type Result<T> = std::result::Result<T, RailgunError>;

#[derive(Error, Debug)]
pub enum RailgunError {
	#[error("invalid configuration: {parameter} must be {requirement}, got {value}")]
	InvalidConfiguration {
		parameter: &'static str,
		requirement: &'static str,
		value: Float
	},
	#[error("invalid sample grid: {0}")]
	InvalidGrid(String),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	Yaml(#[from] serde_yaml::Error),
	#[cfg(feature = "image-rendering")]
	#[error(transparent)]
	Image(#[from] image::ImageError)
}

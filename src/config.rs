//! Runtime configuration loaded from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file. Every setting has a default so the server starts with no
//! configuration at all.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_UNIVERSITY: &str = "CHRIST (Deemed to be University), Bangalore";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Image handling limits shared by the upload pipeline and the PDF layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    /// Uploaded images wider than this many pixels are downscaled on disk.
    pub max_image_px: u32,
    /// Widest an image may be drawn in the report, in inches.
    pub max_image_width_inch: f32,
    /// JPEG quality used when re-encoding resized images.
    pub resize_quality: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_image_px: 1200,
            max_image_width_inch: 6.6,
            resize_quality: 85,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub upload_folder: PathBuf,
    pub default_university: String,
    pub images: ImageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            upload_folder: PathBuf::from("uploads"),
            default_university: DEFAULT_UNIVERSITY.to_string(),
            images: ImageSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            upload_folder: env::var("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_folder),
            default_university: env::var("DEFAULT_UNIVERSITY")
                .unwrap_or(defaults.default_university),
            images: ImageSettings {
                max_image_px: parse_var("MAX_IMAGE_PX", defaults.images.max_image_px)?,
                max_image_width_inch: parse_var(
                    "MAX_IMAGE_WIDTH_INCH",
                    defaults.images.max_image_width_inch,
                )?,
                resize_quality: parse_var("IMAGE_QUALITY", defaults.images.resize_quality)?,
            },
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::Invalid {
                    key,
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

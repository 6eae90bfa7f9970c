// ABOUTME: Declared properties of an image node.
// ABOUTME: Selects pull-from-registry or build-from-context mode.

use serde::Deserialize;

use crate::error::Error;

/// Declared configuration of an image node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageProperties {
    /// Registry repository; presence selects pull mode.
    pub repository: Option<String>,
    /// Tag for pull mode, `latest` when absent.
    pub tag: Option<String>,
    /// Image name for build mode.
    pub image_name: Option<String>,
    /// Base path of the build context for build mode.
    pub dockerfile: Option<String>,
    /// Keep the image on delete.
    pub keep: bool,
}

/// Where an image comes from. Repository mode wins when both are declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Pull { name: String },
    Build { name: String, dockerfile: String },
}

impl ImageProperties {
    pub fn source(&self, node: &str) -> Result<ImageSource, Error> {
        if let Some(repository) = &self.repository {
            let tag = self.tag.as_deref().unwrap_or("latest");
            return Ok(ImageSource::Pull {
                name: format!("{}:{}", repository, tag),
            });
        }
        match (&self.image_name, &self.dockerfile) {
            (Some(name), Some(dockerfile)) => Ok(ImageSource::Build {
                name: name.clone(),
                dockerfile: dockerfile.clone(),
            }),
            _ => Err(Error::MissingImageSource {
                node: node.to_string(),
            }),
        }
    }
}

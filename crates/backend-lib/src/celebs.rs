// ============================
// netguessr-backend-lib/src/celebs.rs
// ============================
//! The celebrity net-worth dataset.
use std::fs;
use std::path::Path;

use rand::seq::IndexedRandom;
use serde::Deserialize;

use netguessr_common::Celeb;

use crate::error::AppError;

#[derive(Deserialize)]
struct CelebFile {
    data: Vec<Celeb>,
}

/// In-memory copy of `celebs.json`, loaded once at startup.
pub struct CelebDirectory {
    celebs: Vec<Celeb>,
    /// Prefix prepended to bare image filenames, e.g. `/static/celeb-images`
    image_prefix: String,
}

impl CelebDirectory {
    /// Load the dataset from a `{"data": [...]}` JSON file.
    pub fn load(path: impl AsRef<Path>, image_prefix: impl Into<String>) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let file: CelebFile = serde_json::from_str(&raw)?;
        Ok(Self::new(file.data, image_prefix))
    }

    pub fn new(celebs: Vec<Celeb>, image_prefix: impl Into<String>) -> Self {
        CelebDirectory {
            celebs,
            image_prefix: image_prefix.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.celebs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.celebs.is_empty()
    }

    /// Look up a celeb by name, with a served image URL.
    pub fn get(&self, name: &str) -> Option<Celeb> {
        self.celebs
            .iter()
            .find(|c| c.name == name)
            .map(|c| self.with_image_url(c))
    }

    /// Pick a celeb uniformly at random. `None` only for an empty dataset.
    pub fn random(&self) -> Option<Celeb> {
        let mut rng = rand::rng();
        self.celebs
            .choose(&mut rng)
            .map(|c| self.with_image_url(c))
    }

    /// Dataset image links are either full URLs or bare filenames; bare
    /// names get the static prefix so clients always receive a usable URL.
    fn with_image_url(&self, celeb: &Celeb) -> Celeb {
        let mut celeb = celeb.clone();
        if !celeb.image.starts_with("http") {
            celeb.image = format!(
                "{}/{}",
                self.image_prefix.trim_end_matches('/'),
                celeb.image
            );
        }
        celeb
    }
}

/// Parse a dataset net-worth string like `"$1,500,000"` into a number.
pub fn parse_net_worth(raw: &str) -> Result<i64, AppError> {
    raw.replace('$', "")
        .replace(',', "")
        .trim()
        .parse()
        .map_err(|_| AppError::Internal(format!("unparseable net worth: {raw}")))
}

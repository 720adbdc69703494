//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the API layer and the UI layer.

use serde::{Deserialize, Serialize};

/// Represents a single photo as returned by Lorem Picsum
///
/// Records are produced by the remote API and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Photo ID as assigned by the API (numeric, but kept as a string)
    pub id: String,
    /// Photographer name
    pub author: String,
    /// Original width in pixels
    pub width: u32,
    /// Original height in pixels
    pub height: u32,
    /// Page on the photo's source site (e.g. Unsplash)
    pub url: String,
    /// Direct link to the full-size image
    pub download_url: String,
}

impl Photo {
    /// Display title, the API doesn't provide one
    pub fn title(&self) -> String {
        format!("Photo #{}", self.id)
    }

    /// First letter of the author, upper-cased, for the avatar bubble
    pub fn author_initial(&self) -> String {
        self.author
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Width divided by height, None for a degenerate record
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }

    /// Aspect ratio formatted like "1.50:1"
    pub fn aspect_label(&self) -> String {
        match self.aspect_ratio() {
            Some(ratio) => format!("{:.2}:1", ratio),
            None => "n/a".to_string(),
        }
    }

    pub fn dimensions_label(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }

    /// Placeholder description shown on the detail page
    pub fn description(&self) -> String {
        format!(
            "A beautiful photograph captured by {}. This high-resolution image showcases exceptional composition and artistic vision.",
            self.author
        )
    }

    /// Size to request for a preview whose longest edge is `max_edge`,
    /// keeping the original aspect ratio and never upscaling.
    pub fn fit_within(&self, max_edge: u32) -> (u32, u32) {
        let (w, h) = (self.width.max(1), self.height.max(1));
        let longest = w.max(h);
        if longest <= max_edge {
            return (w, h);
        }
        let scale = max_edge as f64 / longest as f64;
        let fit = |v: u32| ((v as f64 * scale).round() as u32).max(1);
        (fit(w), fit(h))
    }
}

/// Photo records for tests in other modules
#[cfg(test)]
pub(crate) mod fixtures {
    use super::Photo;

    pub(crate) fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            author: "alejandro Escamilla".to_string(),
            width: 5000,
            height: 3333,
            url: format!("https://unsplash.com/photos/{}", id),
            download_url: format!("https://picsum.photos/id/{}/5000/3333", id),
        }
    }

    /// `count` photos with consecutive ids starting at `first`
    pub(crate) fn page(first: usize, count: usize) -> Vec<Photo> {
        (first..first + count).map(|i| photo(&i.to_string())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::photo as sample;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": "0",
            "author": "Alejandro Escamilla",
            "width": 5000,
            "height": 3333,
            "url": "https://unsplash.com/photos/yC-Yzbqy7PY",
            "download_url": "https://picsum.photos/id/0/5000/3333"
        }"#;

        let photo: Photo = serde_json::from_str(json).unwrap();

        assert_eq!(photo.id, "0");
        assert_eq!(photo.author, "Alejandro Escamilla");
        assert_eq!((photo.width, photo.height), (5000, 3333));
    }

    #[test]
    fn test_display_helpers() {
        let photo = sample("42");

        assert_eq!(photo.title(), "Photo #42");
        assert_eq!(photo.author_initial(), "A");
        assert_eq!(photo.aspect_label(), "1.50:1");
        assert_eq!(photo.dimensions_label(), "5000 × 3333");
        assert!(photo.description().contains("alejandro Escamilla"));
    }

    #[test]
    fn test_degenerate_dimensions() {
        let mut photo = sample("1");
        photo.height = 0;
        photo.author.clear();

        assert_eq!(photo.aspect_ratio(), None);
        assert_eq!(photo.aspect_label(), "n/a");
        assert_eq!(photo.author_initial(), "");
    }

    #[test]
    fn test_fit_within() {
        let photo = sample("1");
        assert_eq!(photo.fit_within(1600), (1600, 1067));

        let mut small = sample("2");
        small.width = 800;
        small.height = 600;
        assert_eq!(small.fit_within(1600), (800, 600));
    }
}

//! Path-based routing between the gallery, detail and not-found views

/// A view the application can show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    /// The paginated gallery
    #[default]
    Gallery,
    /// A single photo by id
    Detail(String),
    /// Anything unmatched, keeps the requested path for display
    NotFound(String),
}

impl Route {
    /// Map a path to a route
    ///
    /// Accepts `/`, `/photos`, `/photo/{id}` and `/photos/{id}`.
    /// Trailing slashes and a query string are ignored.
    pub fn parse(path: &str) -> Self {
        let clean = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["photos"] => Route::Gallery,
            ["photo" | "photos", id] => Route::Detail((*id).to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Gallery => "/".to_string(),
            Route::Detail(id) => format!("/photos/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_gallery(&self) -> bool {
        matches!(self, Route::Gallery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_paths() {
        assert_eq!(Route::parse("/"), Route::Gallery);
        assert_eq!(Route::parse(""), Route::Gallery);
        assert_eq!(Route::parse("/photos"), Route::Gallery);
        assert_eq!(Route::parse("/photos/"), Route::Gallery);
    }

    #[test]
    fn test_detail_paths() {
        assert_eq!(Route::parse("/photo/237"), Route::Detail("237".to_string()));
        assert_eq!(Route::parse("/photos/237"), Route::Detail("237".to_string()));
        assert_eq!(Route::parse("/photos/237?size=large"), Route::Detail("237".to_string()));
    }

    #[test]
    fn test_unmatched_paths() {
        assert_eq!(Route::parse("/about"), Route::NotFound("/about".to_string()));
        assert_eq!(
            Route::parse("/photos/1/info"),
            Route::NotFound("/photos/1/info".to_string())
        );
    }

    #[test]
    fn test_path_round_trip() {
        for route in [Route::Gallery, Route::Detail("12".to_string())] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}

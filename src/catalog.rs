//! Read-only sample data served by the lessons.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FakeItem {
    pub item_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedItem {
    pub item_id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    pub id: &'static str,
    pub name: &'static str,
}

/// In-memory lists shared by all handlers.
#[derive(Debug, Clone)]
pub struct Catalog {
    fake_items: Vec<FakeItem>,
    listing: Vec<ListedItem>,
    media: Vec<Media>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            fake_items: ["Foo", "Bar", "Baz"]
                .into_iter()
                .map(|item_name| FakeItem { item_name })
                .collect(),
            listing: ["Foo", "Bar"]
                .into_iter()
                .map(|item_id| ListedItem { item_id })
                .collect(),
            media: vec![
                Media {
                    id: "isbn-9781529046137",
                    name: "The Hitchhiker's Guide to the Galaxy",
                },
                Media {
                    id: "imdb-tt0371724",
                    name: "The Hitchhiker's Guide to the Galaxy",
                },
                Media {
                    id: "isbn-9781439512982",
                    name: "Isaac Asimov: The Complete Stories, Vol. 2",
                },
            ],
        }
    }
}

impl Catalog {
    /// `fake_items[skip : skip + limit]` with Python slice semantics.
    pub fn page(&self, skip: i64, limit: i64) -> &[FakeItem] {
        let (start, end) = slice_bounds(self.fake_items.len(), skip, skip.saturating_add(limit));
        &self.fake_items[start..end]
    }

    pub fn listing(&self) -> &[ListedItem] {
        &self.listing
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn media_name(&self, id: &str) -> Option<&'static str> {
        self.media.iter().find(|m| m.id == id).map(|m| m.name)
    }
}

/// Resolves `[start:stop]` against a sequence of `len` elements: negative
/// indices count from the end, out-of-range indices clamp, and an inverted
/// range is empty.
pub fn slice_bounds(len: usize, start: i64, stop: i64) -> (usize, usize) {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let clamp = |index: i64| -> usize {
        let resolved = if index < 0 { index.saturating_add(len_i) } else { index };
        resolved.clamp(0, len_i) as usize
    };
    let (start, stop) = (clamp(start), clamp(stop));
    (start, stop.max(start))
}

/// Item ids must name a book or a movie.
pub fn check_media_id(id: &str) -> Result<(), String> {
    if id.starts_with("isbn-") || id.starts_with("imdb-") {
        Ok(())
    } else {
        Err("Invalid ID format, must start with 'isbn-' or 'imdb-'".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[FakeItem]) -> Vec<&str> {
        items.iter().map(|i| i.item_name).collect()
    }

    #[test]
    fn test_page_defaults() {
        let catalog = Catalog::default();
        assert_eq!(names(catalog.page(0, 10)), vec!["Foo", "Bar", "Baz"]);
        assert_eq!(names(catalog.page(1, 1)), vec!["Bar"]);
        assert!(catalog.page(5, 10).is_empty());
    }

    #[test]
    fn test_page_negative_indices() {
        let catalog = Catalog::default();
        // [-1:9] → last element onwards
        assert_eq!(names(catalog.page(-1, 10)), vec!["Baz"]);
        // [0:-1] → everything but the last
        assert_eq!(names(catalog.page(0, -1)), vec!["Foo", "Bar"]);
        // [2:1] → empty
        assert!(catalog.page(2, -1).is_empty());
    }

    #[test]
    fn test_slice_bounds_extremes() {
        assert_eq!(slice_bounds(3, i64::MIN, i64::MAX), (0, 3));
        assert_eq!(slice_bounds(0, 0, 10), (0, 0));
    }

    #[test]
    fn test_media_lookup() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.media_name("imdb-tt0371724"),
            Some("The Hitchhiker's Guide to the Galaxy")
        );
        assert_eq!(catalog.media_name("isbn-0"), None);
    }

    #[test]
    fn test_check_media_id() {
        assert!(check_media_id("isbn-123").is_ok());
        assert!(check_media_id("imdb-tt1").is_ok());
        assert!(check_media_id("asin-1").is_err());
    }
}

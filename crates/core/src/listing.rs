//! Shared building blocks for client-side list filtering and sorting.
//!
//! Lists are UI-scale (tens to low hundreds of rows), so every call does a
//! full stable re-sort. Ties keep insertion order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Applies the direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Where rows with a missing sort value go.
///
/// Independent of [`SortDirection`]: flipping the direction never moves
/// missing values to the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullsPlacement {
    /// Missing values after present ones.
    #[default]
    Last,
    /// Missing values before present ones.
    First,
}

/// Compares two optional sort values.
#[must_use]
pub fn compare_optional<T: Ord + ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    direction: SortDirection,
    nulls: NullsPlacement,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(b)),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match nulls {
            NullsPlacement::Last => Ordering::Greater,
            NullsPlacement::First => Ordering::Less,
        },
        (Some(_), None) => match nulls {
            NullsPlacement::Last => Ordering::Less,
            NullsPlacement::First => Ordering::Greater,
        },
    }
}

/// Case-insensitive substring match. A blank needle matches everything.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True if any of the fields contains the search text.
#[must_use]
pub fn any_field_matches<'a>(fields: impl IntoIterator<Item = &'a str>, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| contains_ignore_case(field, search))
}

/// Category filter value used by the select boxes; `"all"` disables filtering.
pub const ALL_CATEGORIES: &str = "all";

/// True if `category` passes a category filter.
#[must_use]
pub fn category_matches(category: &str, filter: &str) -> bool {
    filter.is_empty() || filter.eq_ignore_ascii_case(ALL_CATEGORIES) || category == filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_optional_nulls_last_both_directions() {
        let one = 1;
        let two = 2;
        assert_eq!(
            compare_optional(Some(&one), Some(&two), SortDirection::Asc, NullsPlacement::Last),
            Ordering::Less
        );
        assert_eq!(
            compare_optional(Some(&one), Some(&two), SortDirection::Desc, NullsPlacement::Last),
            Ordering::Greater
        );
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(
                compare_optional(None, Some(&one), direction, NullsPlacement::Last),
                Ordering::Greater
            );
            assert_eq!(
                compare_optional(Some(&one), None, direction, NullsPlacement::Last),
                Ordering::Less
            );
        }
    }

    #[test]
    fn test_compare_optional_nulls_first() {
        let one = 1;
        assert_eq!(
            compare_optional(None, Some(&one), SortDirection::Asc, NullsPlacement::First),
            Ordering::Less
        );
        assert_eq!(
            compare_optional::<i32>(None, None, SortDirection::Asc, NullsPlacement::First),
            Ordering::Equal
        );
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Quarterly Report", "report"));
        assert!(contains_ignore_case("anything", "   "));
        assert!(!contains_ignore_case("Invoice", "budget"));
    }

    #[test]
    fn test_category_matches() {
        assert!(category_matches("finance", "all"));
        assert!(category_matches("finance", "ALL"));
        assert!(category_matches("finance", ""));
        assert!(category_matches("finance", "finance"));
        assert!(!category_matches("finance", "hr"));
    }

    #[test]
    fn test_toggled() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }
}

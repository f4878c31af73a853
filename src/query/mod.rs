//! Listing query engine: filter by name, stable sort, then page.
//!
//! Pure and synchronous. The input slice is never touched; results are new
//! vectors. Records missing the sort field (or with a NaN price) go after
//! every record that has it, for ascending and descending keys alike.

mod params;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use params::{QueryParams, SortKey};

use crate::models::PropertyListing;

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<PropertyListing>,
    /// Matching listings before paging
    pub total: usize,
    pub offset: usize,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }
}

/// Run the query and return owned listings
pub fn query(listings: &[PropertyListing], params: &QueryParams) -> Vec<PropertyListing> {
    select(listings, params).into_iter().cloned().collect()
}

/// Run the query and report the pre-paging total alongside the items
pub fn query_page(listings: &[PropertyListing], params: &QueryParams) -> Page {
    let matched = filter_and_sort(listings, params);
    let total = matched.len();
    let items = paginate(matched, params).into_iter().cloned().collect();
    Page {
        items,
        total,
        offset: params.offset,
    }
}

/// Borrowing variant of [`query`]
pub fn select<'a>(
    listings: &'a [PropertyListing],
    params: &QueryParams,
) -> Vec<&'a PropertyListing> {
    let matched = filter_and_sort(listings, params);
    paginate(matched, params)
}

pub fn matches(listing: &PropertyListing, params: &QueryParams) -> bool {
    match params.needle() {
        Some(needle) => name_contains(listing, &needle),
        None => true,
    }
}

fn name_contains(listing: &PropertyListing, needle: &str) -> bool {
    listing.name.to_lowercase().contains(needle)
}

fn filter_and_sort<'a>(
    listings: &'a [PropertyListing],
    params: &QueryParams,
) -> Vec<&'a PropertyListing> {
    let mut matched: Vec<&PropertyListing> = match params.needle() {
        Some(needle) => listings
            .iter()
            .filter(|listing| name_contains(listing, &needle))
            .collect(),
        None => listings.iter().collect(),
    };

    // sort_by is stable, so equal keys keep input order
    match params.sort_key {
        SortKey::None => {}
        SortKey::PriceAsc | SortKey::PriceDesc => {
            let descending = params.sort_key.is_descending();
            // NaN is already filtered out, so partial_cmp only ties -0.0 with 0.0
            matched.sort_by(|a, b| {
                compare_present(a.sortable_price(), b.sortable_price(), descending, |x, y| {
                    x.partial_cmp(y).unwrap_or(Ordering::Equal)
                })
            });
        }
        SortKey::DateAsc | SortKey::DateDesc => {
            let descending = params.sort_key.is_descending();
            matched.sort_by(|a, b| {
                compare_present(a.posted_at, b.posted_at, descending, Ord::cmp)
            });
        }
    }

    matched
}

fn paginate<'a>(
    matched: Vec<&'a PropertyListing>,
    params: &QueryParams,
) -> Vec<&'a PropertyListing> {
    if params.offset == 0 && params.limit.is_none() {
        return matched;
    }
    matched
        .into_iter()
        .skip(params.offset)
        .take(params.limit.unwrap_or(usize::MAX))
        .collect()
}

/// Present values ordered by `cmp` (reversed when descending); absent values last
fn compare_present<T>(
    a: Option<T>,
    b: Option<T>,
    descending: bool,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = cmp(&a, &b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::{DateTime, TimeZone, Utc};

    fn listing(
        id: &str,
        name: &str,
        price: Option<f64>,
        posted: Option<(i32, u32, u32)>,
    ) -> PropertyListing {
        PropertyListing {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: Category::Sale,
            price,
            location: String::new(),
            image_url: String::new(),
            owner_name: String::new(),
            owner_email: String::new(),
            owner_photo: None,
            posted_at: posted.map(|(y, m, d)| date(y, m, d)),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn ids(listings: &[PropertyListing]) -> Vec<&str> {
        listings.iter().map(|listing| listing.id.as_str()).collect()
    }

    fn three_homes() -> Vec<PropertyListing> {
        vec![
            listing("villa", "Modern Villa", Some(2_500_000.0), Some((2025, 1, 15))),
            listing("loft", "Modern Loft", Some(800_000.0), Some((2025, 2, 1))),
            listing("beach", "Beach House", Some(3_200_000.0), Some((2025, 1, 20))),
        ]
    }

    #[test]
    fn search_is_case_insensitive_and_keeps_order() {
        let result = query(&three_homes(), &QueryParams::new().search("modern"));
        assert_eq!(ids(&result), vec!["villa", "loft"]);

        let result = query(&three_homes(), &QueryParams::new().search("HOUSE"));
        assert_eq!(ids(&result), vec!["beach"]);
    }

    #[test]
    fn search_only_looks_at_names() {
        let mut homes = three_homes();
        homes[2].description = "A modern beachfront home".to_string();
        homes[2].location = "Modern Beach, CA".to_string();

        let result = query(&homes, &QueryParams::new().search("modern"));
        assert_eq!(ids(&result), vec!["villa", "loft"]);
    }

    #[test]
    fn price_ascending() {
        let result = query(&three_homes(), &QueryParams::new().sort(SortKey::PriceAsc));
        assert_eq!(ids(&result), vec!["loft", "villa", "beach"]);
    }

    #[test]
    fn price_descending() {
        let result = query(&three_homes(), &QueryParams::new().sort(SortKey::PriceDesc));
        assert_eq!(ids(&result), vec!["beach", "villa", "loft"]);
    }

    #[test]
    fn date_descending_is_most_recent_first() {
        let result = query(&three_homes(), &QueryParams::new().sort(SortKey::DateDesc));
        assert_eq!(ids(&result), vec!["loft", "beach", "villa"]);

        let result = query(&three_homes(), &QueryParams::new().sort(SortKey::DateAsc));
        assert_eq!(ids(&result), vec!["villa", "beach", "loft"]);
    }

    #[test]
    fn filter_runs_before_sort() {
        let params = QueryParams::new().search("modern").sort(SortKey::PriceAsc);
        let result = query(&three_homes(), &params);
        assert_eq!(ids(&result), vec!["loft", "villa"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let homes = vec![
            listing("a", "Cabin A", Some(3000.0), Some((2025, 1, 1))),
            listing("b", "Cabin B", Some(1000.0), Some((2025, 1, 1))),
            listing("c", "Cabin C", Some(3000.0), Some((2025, 1, 1))),
            listing("d", "Cabin D", Some(1000.0), Some((2025, 1, 1))),
        ];

        let asc = query(&homes, &QueryParams::new().sort(SortKey::PriceAsc));
        assert_eq!(ids(&asc), vec!["b", "d", "a", "c"]);

        let desc = query(&homes, &QueryParams::new().sort(SortKey::PriceDesc));
        assert_eq!(ids(&desc), vec!["a", "c", "b", "d"]);

        let by_date = query(&homes, &QueryParams::new().sort(SortKey::DateDesc));
        assert_eq!(ids(&by_date), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn signed_zero_prices_tie() {
        let homes = vec![
            listing("plus", "Free Plot", Some(0.0), None),
            listing("minus", "Free Shed", Some(-0.0), None),
        ];

        let asc = query(&homes, &QueryParams::new().sort(SortKey::PriceAsc));
        assert_eq!(ids(&asc), vec!["plus", "minus"]);

        let desc = query(&homes, &QueryParams::new().sort(SortKey::PriceDesc));
        assert_eq!(ids(&desc), vec!["plus", "minus"]);

        let flipped: Vec<_> = homes.into_iter().rev().collect();
        let asc = query(&flipped, &QueryParams::new().sort(SortKey::PriceAsc));
        assert_eq!(ids(&asc), vec!["minus", "plus"]);
    }

    #[test]
    fn negative_zero_from_store_json_still_ties() {
        let parsed: PropertyListing = serde_json::from_str(
            r#"{"_id":"minus","propertyName":"Free Shed","category":"Land","price":-0.0}"#,
        )
        .unwrap();
        assert!(parsed.price.unwrap().is_sign_negative());

        let homes = vec![parsed, listing("plus", "Free Plot", Some(0.0), None)];
        let asc = query(&homes, &QueryParams::new().sort(SortKey::PriceAsc));
        assert_eq!(ids(&asc), vec!["minus", "plus"]);
    }

    #[test]
    fn missing_values_sort_last_both_ways() {
        let homes = vec![
            listing("none", "No price", None, None),
            listing("nan", "NaN price", Some(f64::NAN), Some((2025, 1, 2))),
            listing("cheap", "Cheap", Some(10.0), Some((2025, 1, 1))),
            listing("dear", "Dear", Some(20.0), Some((2025, 1, 3))),
        ];

        let asc = query(&homes, &QueryParams::new().sort(SortKey::PriceAsc));
        assert_eq!(ids(&asc), vec!["cheap", "dear", "none", "nan"]);

        let desc = query(&homes, &QueryParams::new().sort(SortKey::PriceDesc));
        assert_eq!(ids(&desc), vec!["dear", "cheap", "none", "nan"]);

        let newest = query(&homes, &QueryParams::new().sort(SortKey::DateDesc));
        assert_eq!(ids(&newest), vec!["dear", "nan", "cheap", "none"]);

        let oldest = query(&homes, &QueryParams::new().sort(SortKey::DateAsc));
        assert_eq!(ids(&oldest), vec!["cheap", "nan", "dear", "none"]);
    }

    #[test]
    fn no_sort_and_empty_search_return_input_unchanged() {
        let homes = three_homes();
        assert_eq!(query(&homes, &QueryParams::new()), homes);
        assert_eq!(query(&homes, &QueryParams::new().search("")), homes);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(query(&[], &QueryParams::new().search("villa")).is_empty());
        assert!(query(&[], &QueryParams::new().sort(SortKey::DateAsc)).is_empty());
        assert_eq!(query_page(&[], &QueryParams::new()).total, 0);
    }

    #[test]
    fn input_is_not_mutated() {
        let homes = three_homes();
        let snapshot = homes.clone();
        let _ = query(&homes, &QueryParams::new().search("o").sort(SortKey::PriceDesc));
        assert_eq!(homes, snapshot);
    }

    #[test]
    fn requery_with_no_sort_is_identity() {
        let params = QueryParams::new().search("modern").sort(SortKey::DateDesc);
        let first = query(&three_homes(), &params);
        let again = query(&first, &QueryParams::new().search("modern"));
        assert_eq!(first, again);
    }

    #[test]
    fn every_match_appears_exactly_once() {
        let homes = three_homes();
        let result = query(&homes, &QueryParams::new().search("e").sort(SortKey::PriceAsc));
        for home in homes.iter().filter(|home| home.name.to_lowercase().contains('e')) {
            assert_eq!(result.iter().filter(|found| found.id == home.id).count(), 1);
        }
        assert!(result.iter().all(|found| found.name.to_lowercase().contains('e')));
    }

    #[test]
    fn paging_after_sort() {
        let params = QueryParams::new().sort(SortKey::PriceAsc).page(1, Some(1));
        let page = query_page(&three_homes(), &params);
        assert_eq!(ids(&page.items), vec!["villa"]);
        assert_eq!(page.total, 3);
        assert!(page.has_more());

        let past_end = query_page(&three_homes(), &QueryParams::new().page(5, None));
        assert!(past_end.is_empty());
        assert_eq!(past_end.total, 3);

        let zero = query(&three_homes(), &QueryParams::new().page(0, Some(0)));
        assert!(zero.is_empty());
    }

    #[test]
    fn select_borrows_from_input() {
        let homes = three_homes();
        let picked = select(&homes, &QueryParams::new().search("beach"));
        assert!(std::ptr::eq(picked[0], &homes[2]));
        assert!(matches(&homes[0], &QueryParams::new().search("VILLA")));
        assert!(!matches(&homes[0], &QueryParams::new().search("loft")));
    }
}

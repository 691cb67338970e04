// Host-side tests for page discovery and the session catalog.

use book_core::constants::{BUNDLED_PAGE_COUNT, FALLBACK_PAGE_COUNT};
use book_core::*;
use pollster::block_on;

struct Listing(Result<DirectoryListing, CatalogError>);

impl PageDirectory for Listing {
    async fn list_pages(&self) -> Result<DirectoryListing, CatalogError> {
        self.0.clone()
    }
}

fn names(pages: &[PageId]) -> Vec<&str> {
    pages.iter().map(PageId::as_str).collect()
}

fn expected_fallback() -> Vec<String> {
    (1..=17).map(|n| format!("page{n}")).collect()
}

#[test]
fn page_number_rejects_leading_zeros_and_junk() {
    assert_eq!(page_number("page1"), Some(1));
    assert_eq!(page_number("page10"), Some(10));
    assert_eq!(page_number("page01"), None);
    assert_eq!(page_number("page0"), None);
    assert_eq!(page_number("page"), None);
    assert_eq!(page_number("page-3"), None);
    assert_eq!(page_number("page3a"), None);
    assert_eq!(page_number("book-cover-roughness"), None);
    assert!(is_page_identifier("page17"));
    assert!(!is_page_identifier("Page1"));
}

#[test]
fn texture_paths_follow_asset_naming() {
    assert_eq!(
        PageId::page(7).texture_path("/textures/").as_deref(),
        Some("/textures/page7.jpg")
    );
    assert_eq!(
        PageId::front_cover().texture_path("/textures/").as_deref(),
        Some("/textures/book-cover.jpg")
    );
    assert_eq!(PageId::blank().texture_path("/textures/"), None);
    assert_eq!(PageId::page(3).page_number(), Some(3));
    assert_eq!(PageId::back_cover().page_number(), None);
}

#[test]
fn bundled_directory_lists_seventeen_pages() {
    let listing = block_on(SimulatedDirectory::bundled().list_pages()).unwrap();
    assert_eq!(listing.status, ListingStatus::Success);
    assert_eq!(listing.pages.len(), BUNDLED_PAGE_COUNT as usize);
    assert_eq!(listing.total_count, BUNDLED_PAGE_COUNT as usize);
    assert_eq!(listing.pages.last().map(String::as_str), Some("page17"));
    assert!(listing.pages.iter().all(|p| p.starts_with("page")));
    assert!(listing.pages.iter().all(|p| !p.ends_with(".jpg")));
}

#[test]
fn resolve_sorts_numerically_and_filters() {
    let dir = Listing(Ok(DirectoryListing::success(
        ["page10", "page2", "book-cover-roughness", "page1", "page02", "notes", "page2"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )));
    let pages = block_on(resolve(&dir, 17));
    assert_eq!(names(&pages), vec!["page1", "page2", "page10"]);
}

#[test]
fn resolved_pages_are_strictly_increasing() {
    let raw: Vec<String> = [31, 4, 9, 100, 4, 12, 1, 77]
        .iter()
        .map(|n| format!("page{n}"))
        .collect();
    let pages = block_on(resolve(&Listing(Ok(DirectoryListing::success(raw))), 17));
    let numbers: Vec<u32> = pages.iter().filter_map(PageId::page_number).collect();
    assert_eq!(numbers.len(), pages.len());
    assert!(numbers.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn rejected_discovery_falls_back_to_seventeen_pages() {
    let dir = Listing(Err(CatalogError::Discovery("offline".into())));
    let pages = block_on(resolve(&dir, FALLBACK_PAGE_COUNT));
    assert_eq!(names(&pages), expected_fallback());
}

#[test]
fn error_status_falls_back_to_seventeen_pages() {
    let dir = Listing(Ok(DirectoryListing::error("500", "directory unavailable")));
    let pages = block_on(resolve(&dir, FALLBACK_PAGE_COUNT));
    assert_eq!(names(&pages), expected_fallback());
}

#[test]
fn empty_success_is_not_a_failure() {
    let dir = Listing(Ok(DirectoryListing::success(Vec::new())));
    assert!(block_on(resolve(&dir, 17)).is_empty());
}

#[test]
fn session_catalog_freezes_after_first_publish() {
    let mut catalog = SessionCatalog::new();
    assert!(!catalog.is_frozen());
    assert!(catalog.pages().is_empty());
    catalog.publish(fallback_catalog(3)).unwrap();
    assert!(catalog.is_frozen());
    assert_eq!(
        catalog.publish(fallback_catalog(5)),
        Err(CatalogError::Frozen)
    );
    assert_eq!(catalog.pages().len(), 3);
}

#[test]
fn fallback_catalog_counts_from_one() {
    assert!(fallback_catalog(0).is_empty());
    let pages = fallback_catalog(FALLBACK_PAGE_COUNT);
    assert_eq!(pages.first(), Some(&PageId::page(1)));
    assert_eq!(pages.last(), Some(&PageId::page(FALLBACK_PAGE_COUNT as u32)));
}

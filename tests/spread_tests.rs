// Host-side tests for pairing pages into leaves.

use book_core::*;

fn pages(n: u32) -> Vec<PageId> {
    (1..=n).map(PageId::page).collect()
}

fn pairs(spreads: &[Spread]) -> Vec<(&str, &str)> {
    spreads
        .iter()
        .map(|s| (s.front.as_str(), s.back.as_str()))
        .collect()
}

#[test]
fn empty_catalog_has_no_spreads() {
    assert!(build_book(&[]).is_empty());
    assert!(texture_ids(&[]).is_empty());
}

#[test]
fn single_page_backs_both_covers() {
    let spreads = build_book(&pages(1));
    assert_eq!(
        pairs(&spreads),
        vec![("book-cover", "page1"), ("page1", "book-back")]
    );
}

#[test]
fn two_pages_have_no_interior() {
    let spreads = build_book(&pages(2));
    assert_eq!(
        pairs(&spreads),
        vec![("book-cover", "page1"), ("page2", "book-back")]
    );
}

#[test]
fn even_interior_pairs_consecutively() {
    // interior = page2..page5
    let spreads = build_book(&pages(6));
    assert_eq!(
        pairs(&spreads),
        vec![
            ("book-cover", "page1"),
            ("page2", "page3"),
            ("page4", "page5"),
            ("page6", "book-back"),
        ]
    );
}

#[test]
fn odd_interior_gets_a_blank_back() {
    // interior = page2..page4
    let spreads = build_book(&pages(5));
    assert_eq!(
        pairs(&spreads),
        vec![
            ("book-cover", "page1"),
            ("page2", "page3"),
            ("page4", "blank"),
            ("page5", "book-back"),
        ]
    );
}

#[test]
fn interior_pages_appear_exactly_once() {
    for n in 3..=40 {
        let list = pages(n);
        let spreads = build_book(&list);
        assert_eq!(spreads.first().unwrap().front, PageId::front_cover());
        assert_eq!(spreads.last().unwrap().back, PageId::back_cover());
        for page in &list[1..list.len() - 1] {
            let seen = spreads
                .iter()
                .flat_map(|s| [&s.front, &s.back])
                .filter(|id| *id == page)
                .count();
            assert_eq!(seen, 1, "{page} in a book of {n} pages");
        }
        let interior = n as usize - 2;
        assert_eq!(spreads.len(), 2 + interior.div_ceil(2));
    }
}

#[test]
fn custom_covers_are_used() {
    let front = PageId::new("front");
    let back = PageId::new("back");
    let spreads = build_spreads(&pages(3), &front, &back);
    assert_eq!(spreads[0].front, front);
    assert_eq!(spreads[2].back, back);
}

#[test]
fn texture_ids_skip_blank_and_add_roughness() {
    let ids = texture_ids(&build_book(&pages(5)));
    assert!(!ids.contains(&PageId::blank()));
    assert!(ids.contains(&PageId::front_cover_roughness()));
    assert_eq!(ids.iter().filter(|id| **id == PageId::page(1)).count(), 1);
    // covers + roughness + 5 pages
    assert_eq!(ids.len(), 8);
}

#[test]
fn covers_only_leaf() {
    let s = Spread::covers_only();
    assert_eq!(s.front, PageId::front_cover());
    assert_eq!(s.back, PageId::back_cover());
}

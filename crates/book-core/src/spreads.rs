use crate::catalog::PageId;

/// One two-sided leaf of the book.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Spread {
    pub front: PageId,
    pub back: PageId,
}

impl Spread {
    pub fn new(front: PageId, back: PageId) -> Self {
        Self { front, back }
    }

    /// The single closed leaf shown when the catalog has no pages.
    pub fn covers_only() -> Self {
        Self::new(PageId::front_cover(), PageId::back_cover())
    }
}

/// Pair a flat page list into leaves.
///
/// The cover backs the first page and the back cover backs the last one.
/// Interior pages pair up in order; an interior page left without a partner
/// is backed by a blank side, so every index is consumed exactly once.
pub fn build_spreads(pages: &[PageId], front_cover: &PageId, back_cover: &PageId) -> Vec<Spread> {
    let Some((first, rest)) = pages.split_first() else {
        return Vec::new();
    };
    let mut spreads = Vec::with_capacity(pages.len() / 2 + 2);
    spreads.push(Spread::new(front_cover.clone(), first.clone()));

    let interior = match rest.split_last() {
        Some((_, interior)) => interior,
        None => &[][..],
    };
    for pair in interior.chunks(2) {
        let back = pair.get(1).cloned().unwrap_or_else(PageId::blank);
        spreads.push(Spread::new(pair[0].clone(), back));
    }

    let last = pages.last().unwrap_or(first);
    spreads.push(Spread::new(last.clone(), back_cover.clone()));
    spreads
}

/// [`build_spreads`] with the standard cover identifiers.
#[inline]
pub fn build_book(pages: &[PageId]) -> Vec<Spread> {
    build_spreads(pages, &PageId::front_cover(), &PageId::back_cover())
}

/// Every identifier a renderer needs a texture for, in first-seen order.
pub fn texture_ids(spreads: &[Spread]) -> Vec<PageId> {
    let mut ids: Vec<PageId> = Vec::with_capacity(spreads.len() * 2 + 1);
    for spread in spreads {
        for id in [&spread.front, &spread.back] {
            if !id.is_blank() && !ids.contains(id) {
                ids.push(id.clone());
            }
        }
    }
    if ids.contains(&PageId::front_cover()) {
        ids.push(PageId::front_cover_roughness());
    }
    ids
}

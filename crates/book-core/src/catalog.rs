//! Page catalog discovery.
//!
//! The viewer never knows up front how many page images exist. A
//! [`PageDirectory`] answers with the identifiers it can find; [`resolve`]
//! validates and orders them, or falls back to a synthetic `page1..pageN`
//! list when discovery fails. The result is published once into a
//! [`SessionCatalog`] and stays frozen for the rest of the mount.

use crate::constants::{
    BACK_COVER_ID, BLANK_PAGE_ID, BUNDLED_PAGE_COUNT, FRONT_COVER_ID, FRONT_COVER_ROUGHNESS_ID,
    PAGE_EXTENSION, PAGE_PREFIX,
};
use crate::error::CatalogError;
use std::fmt;

/// Opaque token naming a page texture (`page7`, `book-cover`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `page<number>`, the catalog naming convention.
    pub fn page(number: u32) -> Self {
        Self(format!("{PAGE_PREFIX}{number}"))
    }

    pub fn front_cover() -> Self {
        Self(FRONT_COVER_ID.to_string())
    }

    pub fn front_cover_roughness() -> Self {
        Self(FRONT_COVER_ROUGHNESS_ID.to_string())
    }

    pub fn back_cover() -> Self {
        Self(BACK_COVER_ID.to_string())
    }

    /// Plain paper side used when an interior page has no partner.
    pub fn blank() -> Self {
        Self(BLANK_PAGE_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0 == BLANK_PAGE_ID
    }

    /// Numeric suffix of a catalog page, `None` for anything else.
    pub fn page_number(&self) -> Option<u32> {
        page_number(&self.0)
    }

    /// Where the texture for this identifier lives. Blank sides have none.
    pub fn texture_path(&self, base: &str) -> Option<String> {
        (!self.is_blank()).then(|| format!("{base}{}{PAGE_EXTENSION}", self.0))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse `page<N>` where N is decimal without leading zeros.
pub fn page_number(raw: &str) -> Option<u32> {
    let digits = raw.strip_prefix(PAGE_PREFIX)?;
    let bytes = digits.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes[0] == b'0' {
        return None;
    }
    digits.parse().ok()
}

#[inline]
pub fn is_page_identifier(raw: &str) -> bool {
    page_number(raw).is_some()
}

/// Status reported by a directory lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingStatus {
    Success,
    Error(String),
}

/// Answer of a directory lookup.
///
/// `pages` may be unordered and may contain names that do not follow the
/// page convention; the resolver filters them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryListing {
    pub status: ListingStatus,
    pub pages: Vec<String>,
    pub total_count: usize,
    pub message: String,
}

impl DirectoryListing {
    pub fn success(pages: Vec<String>) -> Self {
        let total_count = pages.len();
        Self {
            status: ListingStatus::Success,
            message: format!("found {total_count} pages"),
            pages,
            total_count,
        }
    }

    pub fn error(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ListingStatus::Error(status.into()),
            pages: Vec::new(),
            total_count: 0,
            message: message.into(),
        }
    }
}

/// Source of page identifiers. In production this is a backend call; the
/// front-end wraps [`SimulatedDirectory`] with an artificial latency.
#[allow(async_fn_in_trait)]
pub trait PageDirectory {
    async fn list_pages(&self) -> Result<DirectoryListing, CatalogError>;
}

/// Directory scan stand-in backed by a fixed list of file names.
#[derive(Clone, Debug)]
pub struct SimulatedDirectory {
    files: Vec<String>,
}

impl SimulatedDirectory {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    /// Files of the texture folder shipped with the viewer.
    pub fn bundled() -> Self {
        let mut files = vec![
            format!("{FRONT_COVER_ID}{PAGE_EXTENSION}"),
            format!("{FRONT_COVER_ROUGHNESS_ID}{PAGE_EXTENSION}"),
            format!("{BACK_COVER_ID}{PAGE_EXTENSION}"),
        ];
        files.extend(
            (1..=BUNDLED_PAGE_COUNT).map(|n| format!("{PAGE_PREFIX}{n}{PAGE_EXTENSION}")),
        );
        Self { files }
    }
}

impl PageDirectory for SimulatedDirectory {
    async fn list_pages(&self) -> Result<DirectoryListing, CatalogError> {
        let pages: Vec<String> = self
            .files
            .iter()
            .filter(|f| f.starts_with(PAGE_PREFIX) && f.ends_with(PAGE_EXTENSION))
            .map(|f| f.trim_end_matches(PAGE_EXTENSION).to_string())
            .collect();
        log::info!("[catalog] directory scan complete, {} pages", pages.len());
        Ok(DirectoryListing::success(pages))
    }
}

/// Deterministic `page1..pageN` list used when discovery fails.
pub fn fallback_catalog(len: usize) -> Vec<PageId> {
    (1..=u32::try_from(len).unwrap_or(u32::MAX))
        .map(PageId::page)
        .collect()
}

/// Keep valid page identifiers only and order them by numeric suffix.
pub fn order_pages<S: AsRef<str>>(raw: &[S]) -> Vec<PageId> {
    let mut numbered: Vec<(u32, &str)> = raw
        .iter()
        .filter_map(|r| page_number(r.as_ref()).map(|n| (n, r.as_ref())))
        .collect();
    numbered.sort_by_key(|(n, _)| *n);
    numbered.dedup_by_key(|(n, _)| *n);
    numbered.into_iter().map(|(_, r)| PageId::new(r)).collect()
}

/// Discover the page list, absorbing every failure into the fallback.
pub async fn resolve<D: PageDirectory>(directory: &D, fallback_len: usize) -> Vec<PageId> {
    match directory.list_pages().await {
        Ok(listing) => match listing.status {
            ListingStatus::Success => {
                let pages = order_pages(&listing.pages[..]);
                log::info!(
                    "[catalog] resolved {} of {} listed pages",
                    pages.len(),
                    listing.total_count
                );
                pages
            }
            ListingStatus::Error(status) => {
                let err = CatalogError::Status {
                    status,
                    message: listing.message,
                };
                log::warn!("[catalog] {err}; using {fallback_len} fallback pages");
                fallback_catalog(fallback_len)
            }
        },
        Err(err) => {
            log::warn!("[catalog] {err}; using {fallback_len} fallback pages");
            fallback_catalog(fallback_len)
        }
    }
}

/// Catalog shared by the components of one viewer session.
///
/// Empty until published, frozen afterwards.
#[derive(Clone, Debug, Default)]
pub struct SessionCatalog {
    pages: Option<Vec<PageId>>,
}

impl SessionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, pages: Vec<PageId>) -> Result<(), CatalogError> {
        if self.pages.is_some() {
            return Err(CatalogError::Frozen);
        }
        self.pages = Some(pages);
        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.pages.is_some()
    }

    pub fn pages(&self) -> &[PageId] {
        self.pages.as_deref().unwrap_or(&[])
    }
}

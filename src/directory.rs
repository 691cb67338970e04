use book_core::{CatalogError, DirectoryListing, PageDirectory};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Resolve after `ms` milliseconds on the browser timer.
pub async fn sleep_ms(ms: i32) -> Result<(), CatalogError> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let Some(w) = web::window() else {
            _ = reject.call1(&JsValue::NULL, &JsValue::from_str("no window"));
            return;
        };
        if let Err(e) = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms) {
            _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| CatalogError::Discovery(format!("timer: {:?}", e)))
}

/// Wraps a directory with a fixed lookup latency, like a backend round trip.
pub struct DelayedDirectory<D> {
    inner: D,
    latency_ms: i32,
}

impl<D: PageDirectory> DelayedDirectory<D> {
    pub fn new(inner: D, latency_ms: i32) -> Self {
        Self { inner, latency_ms }
    }
}

impl<D: PageDirectory> PageDirectory for DelayedDirectory<D> {
    async fn list_pages(&self) -> Result<DirectoryListing, CatalogError> {
        sleep_ms(self.latency_ms).await?;
        self.inner.list_pages().await
    }
}

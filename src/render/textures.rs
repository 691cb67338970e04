use super::helpers;
use crate::constants::{TEXTURE_LAYER_HEIGHT, TEXTURE_LAYER_WIDTH};
use book_core::PageId;
use fnv::FnvHashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Page images packed into one texture array, one layer per identifier.
///
/// Layers stay transparent until their image arrives, which the leaf shader
/// draws as plain paper.
pub struct PageTextures {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    layers: FnvHashMap<PageId, u32>,
    scratch: Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)>,
}

fn scratch_canvas() -> Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let document = crate::dom::window_document()?;
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    canvas.set_width(TEXTURE_LAYER_WIDTH);
    canvas.set_height(TEXTURE_LAYER_HEIGHT);
    let ctx = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, ctx))
}

impl PageTextures {
    pub fn new(device: &wgpu::Device, ids: &[PageId]) -> Self {
        let (texture, view) = helpers::create_page_array(
            device,
            TEXTURE_LAYER_WIDTH,
            TEXTURE_LAYER_HEIGHT,
            ids.len() as u32,
        );
        let layers = ids
            .iter()
            .filter(|id| !id.is_blank())
            .enumerate()
            .map(|(i, id)| (id.clone(), i as u32))
            .collect();
        Self {
            texture,
            view,
            layers,
            scratch: None,
        }
    }

    #[inline]
    pub fn layer(&self, id: &PageId) -> Option<u32> {
        self.layers.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Scale `image` into the layer of `id`. Unknown identifiers are ignored.
    pub fn upload(&mut self, queue: &wgpu::Queue, id: &PageId, image: &web::HtmlImageElement) -> anyhow::Result<()> {
        let Some(layer) = self.layer(id) else {
            return Ok(());
        };
        if self.scratch.is_none() {
            self.scratch = scratch_canvas();
        }
        let (canvas, ctx) = self
            .scratch
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no 2d canvas for texture upload"))?;
        ctx.clear_rect(0.0, 0.0, TEXTURE_LAYER_WIDTH as f64, TEXTURE_LAYER_HEIGHT as f64);
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            0.0,
            0.0,
            TEXTURE_LAYER_WIDTH as f64,
            TEXTURE_LAYER_HEIGHT as f64,
        )
        .map_err(|e| anyhow::anyhow!("draw {}: {:?}", id, e))?;
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLCanvasElement(canvas.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: layer,
                },
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: TEXTURE_LAYER_WIDTH,
                height: TEXTURE_LAYER_HEIGHT,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }
}

/// Fetch and decode an image.
pub async fn load_image(src: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_src(src);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow::anyhow!("decode {}: {:?}", src, e))?;
    Ok(img)
}

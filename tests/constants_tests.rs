// Host-side tests for the web frontend's pure helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod mesh {
    include!("../src/render/mesh.rs");
}

use constants::*;
use mesh::*;

#[test]
fn element_ids_are_unique_and_scoped() {
    let ids = [
        VIEWER_ROOT_ID,
        CANVAS_ID,
        LOADING_ID,
        CLOSE_BUTTON_ID,
        PREV_BUTTON_ID,
        NEXT_BUTTON_ID,
        STRIP_ID,
        MUTE_BUTTON_ID,
        VOLUME_SLIDER_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(a.starts_with(VIEWER_ROOT_ID), "{a} is not scoped");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn background_is_near_black_in_linear_space() {
    let bg = srgb_to_linear(BACKGROUND_SRGB);
    assert!(bg > 0.0 && bg < 0.01);
    assert_eq!(srgb_to_linear(0), 0.0);
    assert!((srgb_to_linear(255) - 1.0).abs() < 1e-12);
    assert!(ROOT_STYLE.contains("#0a0a0a"));
}

#[test]
fn backing_size_scales_by_dpr_and_never_hits_zero() {
    assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
    assert_eq!(backing_size(0.0, 0.0, 1.0), (1, 1));
    assert_eq!(backing_size(-5.0, 10.0, 1.0), (1, 10));
}

#[test]
fn pixel_to_ndc_maps_corners() {
    assert_eq!(pixel_to_ndc(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
    assert_eq!(pixel_to_ndc(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
    assert_eq!(pixel_to_ndc(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn texture_layers_are_portrait() {
    assert!(TEXTURE_LAYER_HEIGHT > TEXTURE_LAYER_WIDTH);
    assert!(TEXTURE_LAYER_WIDTH <= 2048 && TEXTURE_LAYER_HEIGHT <= 2048);
}

#[test]
fn leaf_grid_spans_the_unit_square() {
    let (vertices, indices) = leaf_grid(30);
    assert_eq!(vertices.len(), 62);
    assert_eq!(indices.len(), 180);
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    assert_eq!(vertices.first().unwrap().grid, [0.0, 0.0]);
    assert_eq!(vertices.last().unwrap().grid, [1.0, 1.0]);
}

#[test]
fn leaf_grid_triangles_are_counter_clockwise() {
    let (vertices, indices) = leaf_grid(8);
    for tri in indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| vertices[i as usize].grid);
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        assert!(cross > 0.0);
    }
}

#[test]
fn leaf_grid_has_at_least_one_segment() {
    let (vertices, indices) = leaf_grid(0);
    assert_eq!(vertices.len(), 4);
    assert_eq!(indices.len(), 6);
}

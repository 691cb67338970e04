//! Camera framing shared with the web frontend.
//!
//! The eye position depends on the viewport width only: wide viewports get
//! a close-up of the book, narrow ones pull back so both open pages fit.

use crate::constants::*;
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// The two framing presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    Narrow,
    Wide,
}

impl Framing {
    pub fn for_viewport_width(width_css_px: f64) -> Self {
        if width_css_px > NARROW_VIEWPORT_MAX_PX {
            Framing::Wide
        } else {
            Framing::Narrow
        }
    }

    pub fn eye(self) -> Vec3 {
        match self {
            Framing::Wide => Vec3::from_array(CAMERA_EYE_WIDE),
            Framing::Narrow => Vec3::from_array(CAMERA_EYE_NARROW),
        }
    }
}

impl Camera {
    /// Camera for a viewport of the given CSS width and aspect ratio.
    pub fn framed(viewport_width_css_px: f64, aspect: f32) -> Self {
        let framing = Framing::for_viewport_width(viewport_width_css_px);
        Self {
            eye: framing.eye(),
            target: camera_target_vec3(),
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p1 - self.eye).normalize();
        (self.eye, rd)
    }
}

//! Render regression helpers.
//!
//! Frames are compared by SHA-256 of their RGBA bytes so tests can assert that two runs drew
//! exactly the same pixels without storing the pixels themselves.

use sha2::{Digest, Sha256};

use crate::graphics::Renderer2d;
use crate::surface::{RgbaBuffer, SurfaceSize};

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

/// Renders each state offscreen at `size` and returns one hash per state.
pub fn render_hashes<'a, S, I, F>(states: I, size: SurfaceSize, mut draw: F) -> Vec<String>
where
    S: 'a,
    I: IntoIterator<Item = &'a S>,
    F: FnMut(&S, &mut dyn Renderer2d),
{
    states
        .into_iter()
        .map(|state| {
            let mut buf = RgbaBuffer::new(size);
            draw(state, &mut buf.renderer());
            rgba_sha256_hex(buf.frame())
        })
        .collect()
}

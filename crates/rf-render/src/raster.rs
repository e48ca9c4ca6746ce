//! Raster surface backed by a tiny-skia `Pixmap`.
//!
//! The raster is sized to the source photo and holds only the selection
//! overlay (the photo itself is shown underneath by the host). Pixels are
//! premultiplied RGBA8 internally; [`Raster::to_rgba8`] exports straight
//! alpha for `putImageData`.

use kurbo::Size;
use rf_core::Rgba;
use std::fmt;
use tiny_skia::{Color, Pixmap};

/// Largest edge we allocate. Anything bigger is almost certainly a bad
/// image header.
pub const MAX_DIMENSION: u32 = 16_384;

pub struct Raster {
    pixmap: Pixmap,
}

impl Raster {
    /// Allocate a transparent raster.
    pub fn new(width: u32, height: u32) -> Result<Self, String> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(format!(
                "Invalid raster size {width}x{height} (each edge must be 1..={MAX_DIMENSION})"
            ));
        }
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| format!("Failed to allocate a {width}x{height} raster"))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Straight-alpha colour at `(x, y)`, `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Export as straight-alpha RGBA8 rows (the `ImageData` layout).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Capture the full pixel buffer.
    pub fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data().to_vec(),
        }
    }

    /// Overwrite the pixel buffer with `snapshot`. Returns `false` (and leaves
    /// the raster untouched) if the snapshot was taken at another size.
    pub fn restore(&mut self, snapshot: &RasterSnapshot) -> bool {
        if snapshot.width != self.width() || snapshot.height != self.height() {
            log::warn!(
                "snapshot {}x{} does not fit raster {}x{}",
                snapshot.width,
                snapshot.height,
                self.width(),
                self.height()
            );
            return false;
        }
        self.pixmap.data_mut().copy_from_slice(&snapshot.data);
        true
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// An opaque, exact copy of a raster's pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterSnapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Debug for RasterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSnapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_sizes() {
        assert!(Raster::new(0, 10).is_err());
        assert!(Raster::new(10, MAX_DIMENSION + 1).is_err());
        let r = Raster::new(4, 3).unwrap();
        assert_eq!(r.data().len(), 4 * 3 * 4);
        assert!(r.is_blank());
    }

    #[test]
    fn snapshot_restore_is_exact() {
        let mut r = Raster::new(8, 8).unwrap();
        let blank = r.snapshot();
        r.pixmap_mut().fill(Color::from_rgba8(255, 0, 0, 255));
        assert!(!r.is_blank());
        assert!(r.restore(&blank));
        assert_eq!(r.snapshot(), blank);
    }

    #[test]
    fn restore_rejects_other_size() {
        let other = Raster::new(2, 2).unwrap().snapshot();
        let mut r = Raster::new(4, 4).unwrap();
        r.pixmap_mut().fill(Color::WHITE);
        let before = r.snapshot();
        assert!(!r.restore(&other));
        assert_eq!(r.snapshot(), before);
    }

    #[test]
    fn export_is_straight_alpha() {
        let mut r = Raster::new(1, 1).unwrap();
        r.pixmap_mut().fill(Color::from_rgba8(255, 119, 51, 255));
        assert_eq!(r.to_rgba8(), vec![255, 119, 51, 255]);
        assert_eq!(r.pixel(0, 0), Some(Rgba::new(255, 119, 51, 255)));
        assert_eq!(r.pixel(1, 0), None);
    }
}

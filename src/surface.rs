use crate::color::Rgb;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Something the snake can be painted on.
pub trait Surface {
    fn size(&self) -> SurfaceSize;
    fn resize(&mut self, size: SurfaceSize);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb);
}

/// Where surfaces come from: the element hosting the effect.
pub trait Container {
    type Surface: Surface;

    /// Current content box, re-read on every resize.
    fn content_size(&self) -> SurfaceSize;
    fn attach(&mut self, size: SurfaceSize) -> Self::Surface;
    fn detach(&mut self, surface: Self::Surface);
}

/// RGBA8 framebuffer, row-major, the same layout `pixels` hands out.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    size: SurfaceSize,
    frame: Vec<u8>,
}

impl PixelSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            frame: vec![0; Self::frame_len(size)],
        }
    }

    fn frame_len(size: SurfaceSize) -> usize {
        size.width as usize * size.height as usize * 4
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Color at a pixel, `None` when outside or still transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y * self.size.width + x) * 4) as usize;
        let px = &self.frame[idx..idx + 4];
        (px[3] != 0).then(|| Rgb::new(px[0], px[1], px[2]))
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.frame.clear();
        self.frame.resize(Self::frame_len(size), 0);
    }

    fn clear(&mut self) {
        self.frame.fill(0);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb) {
        let width = self.size.width as i64;
        let height = self.size.height as i64;
        let x1 = (x as i64).clamp(0, width);
        let y1 = (y as i64).clamp(0, height);
        let x2 = (x as i64 + w as i64).clamp(0, width);
        let y2 = (y as i64 + h as i64).clamp(0, height);
        for py in y1..y2 {
            let row = (py * width) as usize;
            for px in x1..x2 {
                let idx = (row + px as usize) * 4;
                self.frame[idx] = color.r;
                self.frame[idx + 1] = color.g;
                self.frame[idx + 2] = color.b;
                self.frame[idx + 3] = 255;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_clips_to_frame() {
        let mut s = PixelSurface::new(SurfaceSize::new(4, 3));
        s.fill_rect(-2, 2, 10, 10, Rgb::new(1, 2, 3));
        assert_eq!(s.pixel(0, 2), Some(Rgb::new(1, 2, 3)));
        assert_eq!(s.pixel(3, 2), Some(Rgb::new(1, 2, 3)));
        assert_eq!(s.pixel(0, 1), None);
        assert_eq!(s.pixel(4, 2), None);
    }

    #[test]
    fn clear_and_resize_blank_the_frame() {
        let mut s = PixelSurface::new(SurfaceSize::new(2, 2));
        s.fill_rect(0, 0, 2, 2, Rgb::new(9, 9, 9));
        s.clear();
        assert!(s.frame().iter().all(|&b| b == 0));

        s.fill_rect(0, 0, 2, 2, Rgb::new(9, 9, 9));
        s.resize(SurfaceSize::new(3, 1));
        assert_eq!(s.frame().len(), 12);
        assert_eq!(s.pixel(2, 0), None);
    }
}

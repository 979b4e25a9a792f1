#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// An offscreen RGBA canvas with a resizable backing store.
///
/// Scene renderers resize this to the pixel size they computed for the
/// current scene and then repaint it from scratch; presentation (copying
/// the buffer to a window surface) happens elsewhere.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl Canvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Resizes the backing store. Existing contents are not preserved; the
    /// buffer is zeroed so a skipped repaint shows black instead of garbage.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.buf.clear();
        self.buf.resize(size.rgba_len(), 0u8);
    }
}

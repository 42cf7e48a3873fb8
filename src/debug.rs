use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static DEBUG_TRACE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Destination of the recognition trace image, taken from `ITF_DEBUG`
pub(crate) fn debug_trace_path() -> Option<&'static Path> {
    DEBUG_TRACE_PATH
        .get_or_init(|| std::env::var_os("ITF_DEBUG").map(PathBuf::from))
        .as_deref()
}

/// Per-iteration scanlines of one recognize call
///
/// Row `i` holds the averaged scanline of iteration `i`, row
/// `i + max_iterations` the threshold-path binary line when that path ran.
pub(crate) struct TraceImage {
    rows: usize,
    image: Option<GrayImage>,
}

impl TraceImage {
    pub(crate) fn new(max_iterations: u32) -> Self {
        Self {
            rows: max_iterations as usize * 2,
            image: None,
        }
    }

    /// Record a grayscale line; the first line fixes the image width
    pub(crate) fn gray_row(&mut self, row: usize, line: &[u8]) {
        self.put_row(row, line.iter().copied());
    }

    /// Record a 0/1 line as black/white
    pub(crate) fn binary_row(&mut self, row: usize, line: &[u8]) {
        let offset = self.rows / 2;
        self.put_row(row + offset, line.iter().map(|&v| v * 255));
    }

    fn put_row(&mut self, row: usize, values: impl Iterator<Item = u8>) {
        let (rows, width) = (self.rows, values.size_hint().0);
        let image = self
            .image
            .get_or_insert_with(|| GrayImage::new(width.max(1) as u32, rows.max(1) as u32));
        if row >= image.height() as usize {
            return;
        }
        for (x, value) in values.take(image.width() as usize).enumerate() {
            image.put_pixel(x as u32, row as u32, Luma([value]));
        }
    }

    pub(crate) fn save(&self, path: &Path) -> image::ImageResult<()> {
        match &self.image {
            Some(image) => image.save(path),
            None => Ok(()),
        }
    }
}

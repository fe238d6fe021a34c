//! Grayscale image views used by the correlation kernels.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows.
//!
//! Color rasters stay in `image::RgbImage`; only the matching planes go
//! through these views.

use crate::util::{BoardError, BoardResult};

pub mod io;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> BoardResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> BoardResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(BoardError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a contiguous row-major buffer of exactly `width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> BoardResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(BoardError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns a copy rotated clockwise by `quarter_turns * 90` degrees.
    ///
    /// Exact pixel permutation, no resampling.
    pub fn rotated_quarter_turns(&self, quarter_turns: u32) -> Self {
        let mut current = self.clone();
        for _ in 0..quarter_turns % 4 {
            current = current.rotated_cw();
        }
        current
    }

    fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width, self.height);
        let mut data = vec![0u8; w * h];
        for y in 0..h {
            for x in 0..w {
                // (x, y) lands at column h-1-y, row x of the h-wide output.
                data[x * h + (h - 1 - y)] = self.data[y * w + x];
            }
        }
        Self {
            data,
            width: h,
            height: w,
        }
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> BoardResult<usize> {
    if width == 0 || height == 0 {
        return Err(BoardError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(BoardError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(BoardError::InvalidDimensions { width, height })
}

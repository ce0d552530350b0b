use crate::Error;

/// RGB pixel, channel order `[r, g, b]`.
pub type Rgb8 = [u8; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

/// Borrowed, read-only view over a contiguous row-major buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(width: usize, height: usize, data: &'a [T]) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Fails with [`Error::EmptyImage`] when either dimension is zero.
    pub fn require_non_empty(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl<T: Copy> ImageView<'_, T> {
    pub fn to_owned_image(&self) -> Image<T> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

/// BT.601 luma, `round(0.299 r + 0.587 g + 0.114 b)` in fixed point.
#[inline]
fn luma(px: Rgb8) -> u8 {
    let [r, g, b] = px;
    let acc = 4899 * r as u32 + 9617 * g as u32 + 1868 * b as u32;
    ((acc + (1 << 13)) >> 14) as u8
}

pub fn rgb_to_gray(img: &ImageView<'_, Rgb8>) -> Image<u8> {
    Image {
        width: img.width(),
        height: img.height(),
        data: img.data().iter().map(|&px| luma(px)).collect(),
    }
}

pub fn gray_to_rgb(img: &ImageView<'_, u8>) -> Image<Rgb8> {
    Image {
        width: img.width(),
        height: img.height(),
        data: img.data().iter().map(|&v| [v, v, v]).collect(),
    }
}

pub fn to_f32(img: &ImageView<'_, u8>) -> Image<f32> {
    Image {
        width: img.width(),
        height: img.height(),
        data: img.data().iter().map(|&v| v as f32).collect(),
    }
}

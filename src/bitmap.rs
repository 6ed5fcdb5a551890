/*
 * libopenraw - bitmap.rs
 *
 * Copyright (C) 2022 Hubert Figuière
 *
 * This library is free software: you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public License
 * as published by the Free Software Foundation, either version 3 of
 * the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library.  If not, see
 * <http://www.gnu.org/licenses/>.
 */

use crate::DataType;

pub use crate::geometry::{Point, Rect, Size};

/// Trait for bitmap objects: anything that carries pixel data and
/// knows its own dimensions, regardless of the sample depth.
pub trait Bitmap {
    fn data_type(&self) -> DataType;
    /// Size in bytes of the pixel data.
    fn data_size(&self) -> usize;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Bits per component
    fn bpc(&self) -> u16;
    /// Image data in 8 bits
    fn data8(&self) -> Option<&[u8]>;
}

/// A [`Bitmap`] whose samples can also be fetched as 16-bit values.
/// RAW sensor planes and 16-bit-preview thumbnails implement this;
/// plain 8-bit JPEG thumbnails only implement [`Bitmap`].
pub trait Image: Bitmap {
    /// Image data in 16 bits
    fn data16(&self) -> Option<&[u16]>;
}

/// Encapsulate sample data as 8 or 16 bits.
#[derive(Debug)]
pub enum Data {
    Data8(Vec<u8>),
    Data16(Vec<u16>),
    /// Tiled data, plus the nominal tile size.
    Tiled((Vec<Vec<u8>>, (u32, u32))),
}

impl Default for Data {
    fn default() -> Self {
        Data::Data8(Vec::new())
    }
}

/// A simple, owned pixel buffer used by decompressors to build up
/// the output plane while they run. `n_components` allows packing
/// interleaved channels (e.g. one component per decode pass).
pub struct ImageBuffer<T> {
    pub data: Vec<T>,
    pub width: u32,
    pub height: u32,
    pub bpc: u16,
    pub n_components: u8,
}

impl<T: Copy + Default> ImageBuffer<T> {
    /// Allocate a zeroed buffer.
    pub fn new(width: u32, height: u32, bpc: u16, n_components: u8) -> Self {
        let len = width as usize * height as usize * n_components as usize;
        ImageBuffer {
            data: vec![T::default(); len],
            width,
            height,
            bpc,
            n_components,
        }
    }

    /// Wrap already decoded data.
    pub fn with_data(data: Vec<T>, width: u32, height: u32, bpc: u16) -> Self {
        let n_components = if width == 0 || height == 0 {
            1
        } else {
            (data.len() / (width as usize * height as usize)).max(1) as u8
        };
        ImageBuffer {
            data,
            width,
            height,
            bpc,
            n_components,
        }
    }

    /// Mutable reference to the sample at `(row, col)` for `component`.
    pub fn mut_pixel_at(&mut self, row: usize, col: usize, component: usize) -> &mut T {
        let stride = self.width as usize * self.n_components as usize;
        let idx = row * stride + col * self.n_components as usize + component;
        &mut self.data[idx]
    }
}

// SPDX-License-Identifier: LGPL-3.0-or-later
/*
 * libopenraw - rawdata.rs
 *
 * Copyright (C) 2022-2023 Hubert Figuière
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

//! The decoded RAW sensor plane and the metadata needed to make sense
//! of it: black/white points, active area, mosaic pattern, colour
//! matrices. Rendering it into an RGB image is out of scope here.

use crate::bitmap::{Data, ImageBuffer};
use crate::mosaic::Pattern;
use crate::tiff::exif;
use crate::utils;
use crate::{tiff, Bitmap, DataType, Image, Rect};

/// RAW Data extracted from the file.
#[derive(Debug, Default)]
pub struct RawData {
    /// Width
    width: u32,
    /// Height
    height: u32,
    /// Type if the data
    data_type: DataType,
    /// Wrapped data
    data: Data,
    /// Bits per component
    bpc: u16,
    /// White point, per component.
    whites: [u16; 4],
    /// Black point, per component.
    blacks: [u16; 4],
    /// Exif photometric interpretation of the plane.
    photom_int: exif::PhotometricInterpretation,
    /// The compression used on the original data, for information.
    compression: tiff::Compression,
    /// Sensor active area
    active_area: Option<Rect>,
    /// The mosaic pattern
    mosaic_pattern: Pattern,
    /// The neutral camera white balance
    as_shot_neutral: [f64; 4],
    /// Colour matrices (index 0 = ColorMatrix1, 1 = ColorMatrix2)
    matrices: [Vec<f64>; 2],
    /// Linearization table. len = 2^bpc
    linearization_table: Option<Vec<u16>>,
}

impl RawData {
    pub fn new() -> Self {
        Self::default()
    }

    /// New `RawData` with 8 bit data.
    pub fn with_data8(
        width: u32,
        height: u32,
        bpc: u16,
        data_type: DataType,
        data: Vec<u8>,
        mosaic_pattern: Pattern,
    ) -> Self {
        RawData {
            width,
            height,
            bpc,
            data_type,
            data: Data::Data8(data),
            mosaic_pattern,
            ..Default::default()
        }
    }

    /// New `RawData` with 16 bit data.
    pub fn with_data16(
        width: u32,
        height: u32,
        bpc: u16,
        data_type: DataType,
        data: Vec<u16>,
        mosaic_pattern: Pattern,
    ) -> Self {
        RawData {
            width,
            height,
            bpc,
            data_type,
            data: Data::Data16(data),
            mosaic_pattern,
            ..Default::default()
        }
    }

    /// New `RawData` with 8 bit data and an unknown mosaic pattern.
    pub(crate) fn new8(width: u32, height: u32, bpc: u16, data_type: DataType, data: Vec<u8>) -> Self {
        Self::with_data8(width, height, bpc, data_type, data, Pattern::default())
    }

    /// New `RawData` with 16 bit data and an unknown mosaic pattern.
    pub(crate) fn new16(width: u32, height: u32, bpc: u16, data_type: DataType, data: Vec<u16>) -> Self {
        Self::with_data16(width, height, bpc, data_type, data, Pattern::default())
    }

    /// New tiled `RawData` (e.g. DNG tiled lossless JPEG).
    pub fn new_tiled(
        width: u32,
        height: u32,
        bpc: u16,
        data_type: DataType,
        data: Vec<Vec<u8>>,
        tile_size: (u32, u32),
        mosaic_pattern: Pattern,
    ) -> Self {
        RawData {
            width,
            height,
            bpc,
            data_type,
            data: Data::Tiled((data, tile_size)),
            mosaic_pattern,
            ..Default::default()
        }
    }

    pub(crate) fn with_image_buffer(
        buffer: ImageBuffer<u16>,
        data_type: DataType,
        mosaic_pattern: Pattern,
    ) -> Self {
        RawData {
            width: buffer.width,
            height: buffer.height,
            bpc: buffer.bpc,
            data_type,
            data: Data::Data16(buffer.data),
            mosaic_pattern,
            ..Default::default()
        }
    }

    /// Reset the buffer from an `ImageBuffer<u16>`.
    /// This is useful when decompressing.
    pub(crate) fn set_with_buffer(&mut self, buffer: ImageBuffer<u16>) {
        self.width = buffer.width;
        self.height = buffer.height;
        self.bpc = buffer.bpc;
        self.data = Data::Data16(buffer.data);
    }

    /// Get the linearization table if there is one.
    pub fn linearization_table(&self) -> Option<&Vec<u16>> {
        self.linearization_table.as_ref()
    }

    pub(crate) fn set_linearization_table(&mut self, table: Option<Vec<u16>>) {
        self.linearization_table = table;
    }

    /// The sensor active area.
    pub fn active_area(&self) -> Option<&Rect> {
        self.active_area.as_ref()
    }

    /// Set the sensor active area.
    pub fn set_active_area(&mut self, rect: Option<Rect>) {
        self.active_area = rect;
    }

    /// Retrieve the White balance as RGBx multiplier values.
    ///
    /// Usually on RGB raw data `x` will be NAN. These multipliers are
    /// usually normalized around a 1.0 multiplier value for Green.
    /// For a white balanced RGB image, returns `[1.0, 1.0, 1.0, NAN]`
    pub fn as_shot_neutral(&self) -> &[f64] {
        &self.as_shot_neutral
    }

    /// Set the white balance.
    ///
    /// Currently only 3 RGB components are supported.
    pub fn set_as_shot_neutral(&mut self, as_shot: &[f64]) {
        self.as_shot_neutral[0] = as_shot[0];
        self.as_shot_neutral[1] = as_shot[1];
        self.as_shot_neutral[2] = as_shot[2];
        self.as_shot_neutral[3] = f64::NAN;
    }

    /// Set the width of the RawData. Use with caution.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Black values
    pub fn blacks(&self) -> &[u16; 4] {
        &self.blacks
    }

    pub fn set_blacks(&mut self, b: [u16; 4]) {
        self.blacks = b;
    }

    pub fn whites(&self) -> &[u16; 4] {
        &self.whites
    }

    pub fn set_whites(&mut self, w: [u16; 4]) {
        self.whites = w;
    }

    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type
    }

    pub fn photometric_interpretation(&self) -> exif::PhotometricInterpretation {
        self.photom_int
    }

    pub fn set_photometric_interpretation(&mut self, photom_int: exif::PhotometricInterpretation) {
        self.photom_int = photom_int;
    }

    pub fn compression(&self) -> tiff::Compression {
        self.compression
    }

    pub fn set_compression(&mut self, compression: tiff::Compression) {
        self.compression = compression;
    }

    pub fn set_bpc(&mut self, bpc: u16) {
        self.bpc = bpc;
    }

    /// The colour matrix for calibration illuminant `index` (1 or 2).
    pub fn colour_matrix(&self, index: usize) -> Option<&[f64]> {
        if index == 1 || index == 2 {
            return Some(&self.matrices[index - 1]);
        }
        None
    }

    pub fn set_colour_matrix(&mut self, index: usize, m: &[f64]) {
        if index == 1 || index == 2 {
            self.matrices[index - 1] = m.to_vec();
        }
    }

    pub fn set_data16(&mut self, data: Vec<u16>) {
        self.data = Data::Data16(data)
    }

    /// Provide the 16bits data as a u8 slice.
    /// Use with caution
    pub fn data16_as_u8(&self) -> Option<&[u8]> {
        match self.data {
            Data::Data16(ref d) => Some(utils::to_u8_slice(d)),
            _ => None,
        }
    }

    pub fn tile_data(&self) -> Option<&[Vec<u8>]> {
        match self.data {
            Data::Tiled(ref d) => Some(&d.0),
            _ => None,
        }
    }

    pub fn tile_size(&self) -> Option<(u32, u32)> {
        match self.data {
            Data::Tiled(ref d) => Some(d.1),
            _ => None,
        }
    }

    pub fn replace_data(mut self, data: Vec<u16>) -> RawData {
        self.data = Data::Data16(data);

        self
    }

    /// Set the mosaic pattern.
    pub fn set_mosaic_pattern(&mut self, pattern: Pattern) {
        self.mosaic_pattern = pattern;
    }

    /// Return the mosaic pattern for the RAW data.
    pub fn mosaic_pattern(&self) -> &Pattern {
        &self.mosaic_pattern
    }
}

impl Bitmap for RawData {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn data_size(&self) -> usize {
        match self.data {
            Data::Data8(ref d) => d.len(),
            Data::Data16(ref d) => d.len() * 2,
            Data::Tiled(ref d) => d.0.iter().map(|t| t.len()).sum(),
        }
    }

    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }

    fn bpc(&self) -> u16 {
        self.bpc
    }

    fn data8(&self) -> Option<&[u8]> {
        match self.data {
            Data::Data8(ref d) => Some(d),
            _ => None,
        }
    }
}

impl Image for RawData {
    fn data16(&self) -> Option<&[u16]> {
        match self.data {
            Data::Data16(ref d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::RawData;
    use crate::{Bitmap, DataType};

    #[test]
    fn test_rawdata_new8() {
        let data = vec![0_u8; 16];
        let rawdata = RawData::with_data8(
            4,
            4,
            8,
            DataType::Raw,
            data,
            crate::mosaic::Pattern::default(),
        );
        assert_eq!(rawdata.width(), 4);
        assert_eq!(rawdata.height(), 4);
        assert_eq!(rawdata.data_size(), 16);
        assert!(rawdata.data8().is_some());
        assert_eq!(rawdata.active_area(), None);
    }
}

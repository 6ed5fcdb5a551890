// SPDX-License-Identifier: LGPL-3.0-or-later
/*
 * libopenraw - tiff/exif/generated.rs
 *
 * Copyright (C) 2023 Hubert Figuière
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

//! Leica MakerNote tag tables. Leica shipped several incompatible
//! MakerNote dialects across its DNG-based bodies; each numbered table
//! here corresponds to one of those dialects.

use std::collections::HashMap;

lazy_static::lazy_static! {
    /// Leica2: early digital compacts (Digilux, D-LUX).
    pub static ref MNOTE_LEICA2_TAG_NAMES: HashMap<u16, &'static str> = HashMap::from([
        (0x300, "PreviewImage"),
    ]);

    /// Leica4: M8/M9 rangefinders.
    pub static ref MNOTE_LEICA4_TAG_NAMES: HashMap<u16, &'static str> = HashMap::from([
        (0x303, "RawFormat"),
        (0x304, "OriginalFileName"),
        (0x305, "OriginalDirectory"),
        (0x308, "ExposureMode"),
        (0x309, "ShotInfo"),
        (0x310, "WBRGBLevels"),
        (0x311, "FilmMode"),
    ]);

    /// Leica5: S-series and V-Lux bodies.
    pub static ref MNOTE_LEICA5_TAG_NAMES: HashMap<u16, &'static str> = HashMap::from([
        (0x2, "CameraSettings"),
        (0x3, "WhiteBalance"),
        (0x7, "FocusInfo"),
        (0x8, "ShootingMode"),
        (0x300, "InternalSerialNumber"),
        (0x303, "ExposureMode"),
    ]);

    /// Leica6: T/TL/CL APS-C mirrorless.
    pub static ref MNOTE_LEICA6_TAG_NAMES: HashMap<u16, &'static str> = HashMap::from([
        (0x300, "InternalSerialNumber"),
        (0x303, "ExposureMode"),
        (0x304, "Shutter"),
        (0x305, "SerialNumber"),
        (0x306, "LensModel"),
    ]);

    /// Leica9: Q/SL full-frame mirrorless.
    pub static ref MNOTE_LEICA9_TAG_NAMES: HashMap<u16, &'static str> = HashMap::from([
        (0x300, "InternalSerialNumber"),
        (0x301, "FilterInfo"),
        (0x304, "LensModel"),
        (0x306, "Quality"),
        (0x311, "FacesDetected"),
    ]);
}

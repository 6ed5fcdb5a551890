/*
 * libopenraw - jpeg/container.rs
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

//! JPEG container

use std::cell::{RefCell, RefMut};
use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use jpeg_decoder::{Decoder, ImageInfo};
use once_cell::unsync::OnceCell;

use crate::container;
use crate::io::{View, Viewer};
use crate::tiff;
use crate::Type;

/// JFIF Container to just read a JPEG image.
pub(crate) struct Container {
    /// The `io::View`.
    view: RefCell<View>,
    /// The RAW file type this JPEG stream belongs to.
    raw_type: Type,
    /// JPEG image info
    image_info: OnceCell<Option<ImageInfo>>,
    /// JPEG decoder
    decoder: OnceCell<RefCell<Decoder<View>>>,
    /// The Exif data found in the APP1 segment, if any.
    exif: OnceCell<Option<tiff::Container>>,
}

impl container::GenericContainer for Container {
    fn endian(&self) -> container::Endian {
        container::Endian::Big
    }

    fn raw_type(&self) -> Type {
        self.raw_type
    }

    fn borrow_view_mut(&self) -> RefMut<'_, View> {
        self.view.borrow_mut()
    }

    fn dir_iterator(&self) -> crate::metadata::Iterator {
        self.exif()
            .map(|exif| crate::metadata::Iterator::from(exif.iter()))
            .unwrap_or_default()
    }
}

impl Container {
    pub(crate) fn new(view: View, raw_type: Type) -> Self {
        Self {
            view: RefCell::new(view),
            raw_type,
            image_info: OnceCell::new(),
            decoder: OnceCell::new(),
            exif: OnceCell::new(),
        }
    }

    /// Return the Exif data embedded in the APP1 `Exif\0\0` segment, if any.
    pub(crate) fn exif(&self) -> Option<&tiff::Container> {
        self.exif.get_or_init(|| self.find_exif()).as_ref()
    }

    /// Scan the JFIF markers for an APP1 Exif segment and parse it as a
    /// TIFF container.
    fn find_exif(&self) -> Option<tiff::Container> {
        let offset = {
            let mut view = self.view.borrow_mut();
            view.seek(SeekFrom::Start(0)).ok()?;
            if view.read_u16::<BigEndian>().ok()? != 0xffd8 {
                return None;
            }
            loop {
                let marker = view.read_u16::<BigEndian>().ok()?;
                // Start of scan: no more markers follow, no Exif found.
                if marker == 0xffda || (marker & 0xff00) != 0xff00 {
                    return None;
                }
                let len = view.read_u16::<BigEndian>().ok()? as u64;
                if len < 2 {
                    return None;
                }
                if marker == 0xffe1 {
                    let mut tag = [0_u8; 6];
                    if view.read_exact(&mut tag).is_ok() && &tag == b"Exif\0\0" {
                        break view.stream_position().ok()?;
                    }
                    view.seek(SeekFrom::Current(len as i64 - 2 - 6)).ok()?;
                } else {
                    view.seek(SeekFrom::Current(len as i64 - 2)).ok()?;
                }
            }
        };

        let subview = Viewer::create_subview(&self.view.borrow(), offset).ok()?;
        let mut container = tiff::Container::new(subview, vec![tiff::IfdType::Main], self.raw_type);
        container.load(None).ok()?;
        Some(container)
    }

    /// Initialize the JPEG decoder.
    fn decoder(&self) -> &RefCell<Decoder<View>> {
        self.decoder.get_or_init(|| {
            let view = &*self.view.borrow_mut();
            RefCell::new(Decoder::new(view.clone()))
        })
    }

    /// Load the image info.
    fn image_info(&self) -> &Option<ImageInfo> {
        self.image_info.get_or_init(|| {
            let decoder = self.decoder();
            decoder
                .borrow_mut()
                .read_info()
                .map_err(|err| {
                    log::error!("JPEG decoding error: {}", err);
                    err
                })
                .ok()?;
            decoder.borrow().info()
        })
    }

    /// Return the height of the JPEG image.
    pub fn height(&self) -> u16 {
        if let Some(info) = self.image_info() {
            info.height
        } else {
            0
        }
    }

    /// Return the width of the JPEG image.
    pub fn width(&self) -> u16 {
        if let Some(info) = self.image_info() {
            info.width
        } else {
            0
        }
    }
}

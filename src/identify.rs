/*
 * libopenraw - identify.rs
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

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use super::{Error, Result, Type};
use crate::raf;
use crate::rawfile::ReadAndSeek;
use crate::tiff::exif;

lazy_static::lazy_static! {
    static ref EXT_TO_TYPE: HashMap<OsString, Type> = {
        let mut m = HashMap::new();
        // The extension MUST be lowercase
        m.insert(OsString::from("cr2"), Type::Cr2);
        m.insert(OsString::from("cr3"), Type::Cr3);
        m.insert(OsString::from("crw"), Type::Crw);
        m.insert(OsString::from("dng"), Type::Dng);
        m.insert(OsString::from("erf"), Type::Erf);
        m.insert(OsString::from("mrw"), Type::Mrw);
        m.insert(OsString::from("nef"), Type::Nef);
        m.insert(OsString::from("nrw"), Type::Nrw);
        m.insert(OsString::from("orf"), Type::Orf);
        m.insert(OsString::from("pef"), Type::Pef);
        m.insert(OsString::from("raf"), Type::Raf);
        m.insert(OsString::from("rw2"), Type::Rw2);
        m.insert(OsString::from("arw"), Type::Arw);
        m.insert(OsString::from("sr2"), Type::Sr2);

        m
    };
}

/// Get the type associated to the extension.
/// `ext` must be lowercase ASCII.
pub(crate) fn type_for_extension(ext: &OsStr) -> Option<Type> {
    EXT_TO_TYPE.get(ext).cloned()
}

/// Return the `Type` based on the content of the file.
pub(crate) fn type_for_content(content: &mut dyn ReadAndSeek) -> Result<Option<Type>> {
    use crate::Type::*;

    // Buffer to read the content to identify
    // Size is max of (14, RAF_MAGIC.len())
    // Change as needed
    let mut buf = [0_u8; 16];

    let len = content.read(&mut buf)?;
    if len <= 4 {
        return Err(Error::BufferTooSmall);
    }

    if &buf[0..4] == b"\0MRM" {
        return Ok(Some(Mrw));
    }
    if len >= 12 && &buf[4..12] == b"ftypcrx " {
        return Ok(Some(Cr3));
    }
    if len >= 14 && &buf[0..14] == b"II\x1a\0\0\0HEAPCCDR" {
        return Ok(Some(Crw));
    }
    if &buf[0..4] == b"IIRO" {
        return Ok(Some(Orf));
    }
    if &buf[0..4] == b"IIU\0" {
        return Ok(Some(Rw2));
    }
    if len >= raf::RAF_MAGIC.len() && &buf[0..raf::RAF_MAGIC.len()] == raf::RAF_MAGIC {
        return Ok(Some(Raf));
    }
    if &buf[0..4] == b"II\x2a\0" || &buf[0..4] == b"MM\0\x2a" {
        // TIFF based format
        if len >= 12 && &buf[8..11] == b"CR\x02" {
            return Ok(Some(Cr2));
        }
        if len >= 8 {
            let big_endian = &buf[0..2] == b"MM";
            content.seek(SeekFrom::Start(0))?;
            if let Some(t) = type_for_tiff_content(content, big_endian)? {
                return Ok(Some(t));
            }
        }
    }

    Ok(None)
}

/// Sniff the IFD0 of a TIFF-derived file for the Make tag and the
/// presence of the DNGVersion tag, and map that to a `Type`.
/// `content` must be positioned at the start of the TIFF header.
fn type_for_tiff_content(content: &mut dyn ReadAndSeek, big_endian: bool) -> Result<Option<Type>> {
    use crate::Type::*;

    content.seek(SeekFrom::Start(4))?;
    let ifd_offset = if big_endian {
        content.read_u32::<BigEndian>()?
    } else {
        content.read_u32::<LittleEndian>()?
    };

    content.seek(SeekFrom::Start(ifd_offset as u64))?;
    let count = if big_endian {
        content.read_u16::<BigEndian>()?
    } else {
        content.read_u16::<LittleEndian>()?
    };

    let mut make: Option<String> = None;
    let mut has_dng_version = false;

    for _ in 0..count {
        let tag = if big_endian {
            content.read_u16::<BigEndian>()?
        } else {
            content.read_u16::<LittleEndian>()?
        };
        let type_ = if big_endian {
            content.read_u16::<BigEndian>()?
        } else {
            content.read_u16::<LittleEndian>()?
        };
        let value_count = if big_endian {
            content.read_u32::<BigEndian>()?
        } else {
            content.read_u32::<LittleEndian>()?
        };
        let value_offset_pos = content.stream_position()?;
        let value = if big_endian {
            content.read_u32::<BigEndian>()?
        } else {
            content.read_u32::<LittleEndian>()?
        };

        if tag == exif::TIFF_TAG_DNG_VERSION {
            has_dng_version = true;
        } else if tag == exif::EXIF_TAG_MAKE && type_ == 2 {
            // ASCII: inline if it fits in the 4-byte value field.
            let len = value_count as usize;
            let mut bytes = vec![0_u8; len];
            if len <= 4 {
                content.seek(SeekFrom::Start(value_offset_pos))?;
                content.read_exact(&mut bytes[..len.min(4)])?;
            } else {
                content.seek(SeekFrom::Start(value as u64))?;
                content.read_exact(&mut bytes)?;
            }
            while bytes.last() == Some(&0) {
                bytes.pop();
            }
            make = String::from_utf8(bytes).ok();
        }
        // Rewind to right after the 12-byte entry for the next iteration.
        content.seek(SeekFrom::Start(value_offset_pos + 4))?;
    }

    if has_dng_version {
        return Ok(Some(Dng));
    }

    Ok(make.and_then(|make| {
        if make == "Canon" {
            Some(Cr2)
        } else if make.starts_with("NIKON") {
            Some(Nef)
        } else if make == "SEIKO EPSON CORP." {
            Some(Erf)
        } else if make == "PENTAX Corporation " {
            Some(Pef)
        } else if make.starts_with("SONY") {
            Some(Arw)
        } else {
            None
        }
    }))
}

#[cfg(test)]
mod test {
    #[test]
    fn test_type_for_extension() {
        use std::ffi::OsString;

        use super::type_for_extension;
        use crate::Type;

        assert_eq!(type_for_extension(&OsString::from("CR3")), None);
        assert_eq!(type_for_extension(&OsString::from("cr3")), Some(Type::Cr3));
        assert_eq!(type_for_extension(&OsString::from("NOPE")), None);
    }

    #[test]
    fn test_type_for_content() {
        use super::type_for_content;
        use crate::{Error, Type};
        use std::io::Cursor;

        let mut four_bytes = Cursor::new([0_u8; 4].as_slice());
        assert_eq!(
            type_for_content(&mut four_bytes),
            Err(Error::BufferTooSmall)
        );

        // Canon
        let mut crw = Cursor::new(include_bytes!("../testdata/identify/content_crw").as_slice());
        assert_eq!(type_for_content(&mut crw), Ok(Some(Type::Crw)));

        let mut cr2 = Cursor::new(include_bytes!("../testdata/identify/content_cr2").as_slice());
        assert_eq!(type_for_content(&mut cr2), Ok(Some(Type::Cr2)));

        let mut cr3 = Cursor::new(include_bytes!("../testdata/identify/content_cr3").as_slice());
        assert_eq!(type_for_content(&mut cr3), Ok(Some(Type::Cr3)));

        let mut mrw = Cursor::new(include_bytes!("../testdata/identify/content_mrw").as_slice());
        assert_eq!(type_for_content(&mut mrw), Ok(Some(Type::Mrw)));

        let mut raf = Cursor::new(include_bytes!("../testdata/identify/content_raf").as_slice());
        assert_eq!(type_for_content(&mut raf), Ok(Some(Type::Raf)));
    }

    /// Build a minimal little-endian TIFF IFD0 with a single entry, either
    /// the Make tag (ASCII) or the DNGVersion tag (used to decide between
    /// the two in `type_for_tiff_content`).
    fn make_tiff_ifd0(make: Option<&str>, dng_version: bool) -> Vec<u8> {
        let mut entries = Vec::new();
        if let Some(make) = make {
            entries.push((crate::tiff::exif::EXIF_TAG_MAKE, make.as_bytes()));
        }
        let dng_payload = [1_u8, 4, 0, 0];
        if dng_version {
            entries.push((crate::tiff::exif::TIFF_TAG_DNG_VERSION, &dng_payload[..]));
        }

        let ifd_offset = 8_u32;
        let mut buf = Vec::new();
        buf.extend_from_slice(b"II\x2a\0");
        buf.extend_from_slice(&ifd_offset.to_le_bytes());

        let entry_count = entries.len() as u16;
        let header_len = 8 + 2 + entries.len() * 12 + 4;
        let mut string_area = Vec::new();
        let mut string_area_base = header_len;

        buf.extend_from_slice(&entry_count.to_le_bytes());
        for (tag, payload) in &entries {
            buf.extend_from_slice(&tag.to_le_bytes());
            let is_ascii = *tag == crate::tiff::exif::EXIF_TAG_MAKE;
            buf.extend_from_slice(&(if is_ascii { 2_u16 } else { 4_u16 }).to_le_bytes());
            buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            if payload.len() <= 4 {
                let mut inline = [0_u8; 4];
                inline[..payload.len()].copy_from_slice(payload);
                buf.extend_from_slice(&inline);
            } else {
                buf.extend_from_slice(&(string_area_base as u32).to_le_bytes());
                string_area.extend_from_slice(payload);
                string_area_base += payload.len();
            }
        }
        buf.extend_from_slice(&0_u32.to_le_bytes()); // next IFD
        buf.extend_from_slice(&string_area);
        buf
    }

    #[test]
    fn test_type_for_tiff_make() {
        use super::type_for_content;
        use crate::Type;
        use std::io::Cursor;

        let canon = make_tiff_ifd0(Some("Canon"), false);
        let mut canon = Cursor::new(canon.as_slice());
        assert_eq!(type_for_content(&mut canon), Ok(Some(Type::Cr2)));

        // Not an exact match for "Canon": must not be misidentified as CR2.
        let not_canon = make_tiff_ifd0(Some("Canonical Cameras Inc."), false);
        let mut not_canon = Cursor::new(not_canon.as_slice());
        assert_eq!(type_for_content(&mut not_canon), Ok(None));

        let nikon = make_tiff_ifd0(Some("NIKON CORPORATION"), false);
        let mut nikon = Cursor::new(nikon.as_slice());
        assert_eq!(type_for_content(&mut nikon), Ok(Some(Type::Nef)));

        let epson = make_tiff_ifd0(Some("SEIKO EPSON CORP."), false);
        let mut epson = Cursor::new(epson.as_slice());
        assert_eq!(type_for_content(&mut epson), Ok(Some(Type::Erf)));

        let pentax = make_tiff_ifd0(Some("PENTAX Corporation "), false);
        let mut pentax = Cursor::new(pentax.as_slice());
        assert_eq!(type_for_content(&mut pentax), Ok(Some(Type::Pef)));

        let sony = make_tiff_ifd0(Some("SONY"), false);
        let mut sony = Cursor::new(sony.as_slice());
        assert_eq!(type_for_content(&mut sony), Ok(Some(Type::Arw)));

        let dng = make_tiff_ifd0(Some("NIKON CORPORATION"), true);
        let mut dng = Cursor::new(dng.as_slice());
        assert_eq!(type_for_content(&mut dng), Ok(Some(Type::Dng)));
    }
}

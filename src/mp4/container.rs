/*
 * libopenraw - mp4/container.rs
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

//! ISO-BMFF box parsing, just enough of it to get at Canon CR3's
//! embedded Exif-like TIFF metadata, preview JPEGs and the CRAW track.

use std::cell::{RefCell, RefMut};
use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use once_cell::unsync::OnceCell;

use crate::container;
use crate::container::GenericContainer;
use crate::dump::Dump;
use crate::io::{View, Viewer};
use crate::thumbnail::{Data, DataOffset, ThumbDesc};
use crate::tiff;
use crate::{DataType, Error, Result, Type};

/// The Canon-specific `uuid` box carrying `CNCV`/`CCTP`/`CTBO`/`THMB`.
const CANON_CR3_UUID: [u8; 16] = [
    0x85, 0xc0, 0xb6, 0x87, 0x82, 0x0f, 0x11, 0xe0, 0x81, 0x11, 0xf4, 0xce, 0x46, 0x2b, 0x6a, 0x48,
];

/// The full size "PRVW" preview `uuid` box.
const CANON_PRVW_UUID: [u8; 16] = [
    0xea, 0xf4, 0x2b, 0x5e, 0x1c, 0x98, 0x4b, 0x88, 0xb9, 0xfb, 0xb7, 0xdc, 0x40, 0x6e, 0x4d, 0x16,
];

/// A box header: fourcc plus the byte range of its payload (after the
/// header, before any children are parsed). `uuid` boxes carry their
/// 16 byte extended type in `uuid`.
#[derive(Clone, Debug)]
struct BoxEntry {
    fourcc: [u8; 4],
    uuid: Option<[u8; 16]>,
    /// Offset of the payload, right after the box (and uuid) header.
    offset: u64,
    /// Length of the payload.
    len: u64,
}

impl BoxEntry {
    fn end(&self) -> u64 {
        self.offset + self.len
    }

    fn is(&self, fourcc: &[u8; 4]) -> bool {
        &self.fourcc == fourcc
    }
}

/// Thumbnail embedded in the Canon `CTBO`/`THMB` header.
pub(crate) struct CrawThumbnail {
    pub width: u16,
    pub height: u16,
    pub data: Vec<u8>,
}

/// The Canon-specific header carried in the `uuid` box under `moov`.
pub(crate) struct CrawHeader {
    pub thumbnail: CrawThumbnail,
}

/// A decoded track: either a JPEG preview or the CRAW raw image data.
pub(crate) struct RawTrack {
    pub is_jpeg: bool,
    pub image_width: u16,
    pub image_height: u16,
    pub offset: u64,
    pub len: u64,
}

/// A `trak` box, with just the info needed to fetch its one sample.
struct TrackInfo {
    is_video: bool,
    is_jpeg: bool,
    width: u16,
    height: u16,
    offset: u64,
    len: u64,
}

/// Read the boxes found between `start` and `end` in `view`.
fn read_boxes(view: &mut View, start: u64, end: u64) -> Result<Vec<BoxEntry>> {
    let mut boxes = vec![];
    let mut pos = start;
    while pos + 8 <= end {
        view.seek(SeekFrom::Start(pos))?;
        let mut size = view.read_u32::<BigEndian>()? as u64;
        let mut fourcc = [0_u8; 4];
        view.read_exact(&mut fourcc)?;
        let mut header_len = 8_u64;
        if size == 1 {
            size = view.read_u64::<BigEndian>()?;
            header_len += 8;
        } else if size == 0 {
            size = end - pos;
        }
        let uuid = if &fourcc == b"uuid" {
            let mut id = [0_u8; 16];
            view.read_exact(&mut id)?;
            header_len += 16;
            Some(id)
        } else {
            None
        };
        if size < header_len {
            break;
        }
        boxes.push(BoxEntry {
            fourcc,
            uuid,
            offset: pos + header_len,
            len: size - header_len,
        });
        pos += size;
    }
    Ok(boxes)
}

fn find_box<'a>(boxes: &'a [BoxEntry], fourcc: &[u8; 4]) -> Option<&'a BoxEntry> {
    boxes.iter().find(|b| b.is(fourcc))
}

/// ISO-BMFF (MP4) container, used for Canon CR3.
pub(crate) struct Container {
    /// The `io::View`.
    view: RefCell<View>,
    /// The RAW file type this container belongs to.
    raw_type: Type,
    /// Top-level boxes.
    boxes: OnceCell<Vec<BoxEntry>>,
    /// The Canon `CTBO`/`THMB` header, if found.
    craw_header: OnceCell<Option<CrawHeader>>,
    /// The full size "PRVW" preview, if found.
    preview: OnceCell<Option<ThumbDesc>>,
    /// The `trak` boxes under `moov`.
    tracks: OnceCell<Vec<TrackInfo>>,
    /// The Canon `CMT1`-`CMT4` TIFF blocks, indexed by their `CTBO`
    /// table index, lazily parsed as `tiff::Container`s.
    metadata_blocks: OnceCell<Vec<(u32, tiff::Container)>>,
}

impl GenericContainer for Container {
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
        self.metadata_block(0)
            .map(|(_, container)| crate::metadata::Iterator::from(container.iter()))
            .unwrap_or_default()
    }
}

impl Dump for Container {
    #[cfg(feature = "dump")]
    fn print_dump(&self, indent: u32) {
        dump_println!(indent, "<MP4 Container>");
        {
            let indent = indent + 1;
            dump_println!(indent, "Tracks: {}", self.tracks().len());
        }
        dump_println!(indent, "</MP4 Container>");
    }
}

impl Container {
    pub(crate) fn new(view: View, raw_type: Type) -> Self {
        Self {
            view: RefCell::new(view),
            raw_type,
            boxes: OnceCell::new(),
            craw_header: OnceCell::new(),
            preview: OnceCell::new(),
            tracks: OnceCell::new(),
            metadata_blocks: OnceCell::new(),
        }
    }

    /// Load the top-level boxes. `is_magic_ok` is unused: CR3 has no
    /// alternate magic check, kept for symmetry with `tiff::Container::load`.
    pub(crate) fn load(
        &mut self,
        _is_magic_ok: Option<fn(&[u8]) -> Result<container::Endian>>,
    ) -> Result<()> {
        let end = {
            let mut view = self.view.borrow_mut();
            let end = view.seek(SeekFrom::End(0))?;
            view.seek(SeekFrom::Start(0))?;
            end
        };
        let boxes = {
            let mut view = self.view.borrow_mut();
            read_boxes(&mut view, 0, end)?
        };
        if find_box(&boxes, b"ftyp").is_none() {
            log::error!("No ftyp box found");
            return Err(Error::FormatError);
        }
        self.boxes.set(boxes).ok();
        Ok(())
    }

    fn boxes(&self) -> &[BoxEntry] {
        self.boxes.get_or_init(Vec::new)
    }

    fn moov(&self) -> Option<&BoxEntry> {
        find_box(self.boxes(), b"moov")
    }

    /// Children of `moov`, read on demand.
    fn moov_children(&self) -> Vec<BoxEntry> {
        self.moov()
            .and_then(|moov| {
                let mut view = self.view.borrow_mut();
                read_boxes(&mut view, moov.offset, moov.end()).ok()
            })
            .unwrap_or_default()
    }

    /// Find the Canon `uuid` box with `id` directly under `moov`.
    fn canon_uuid(&self, id: &[u8; 16]) -> Option<BoxEntry> {
        self.moov_children()
            .into_iter()
            .find(|b| b.is(b"uuid") && b.uuid.as_ref() == Some(id))
    }

    /// Parse the `CNCV`/`CCTP`/`CTBO`/`THMB` header carried in the
    /// Canon-specific `uuid` box under `moov`.
    fn load_craw_header(&self) -> Option<CrawHeader> {
        let uuid_box = self.canon_uuid(&CANON_CR3_UUID)?;
        let mut view = self.view.borrow_mut();
        let children = read_boxes(&mut view, uuid_box.offset, uuid_box.end()).ok()?;
        let thmb = find_box(&children, b"THMB")?;

        view.seek(SeekFrom::Start(thmb.offset)).ok()?;
        let _version = view.read_u32::<BigEndian>().ok()?;
        let width = view.read_u16::<BigEndian>().ok()?;
        let height = view.read_u16::<BigEndian>().ok()?;
        let data_size = view.read_u32::<BigEndian>().ok()?;
        let _format = view.read_u32::<BigEndian>().ok()?;
        let mut data = vec![0_u8; data_size as usize];
        view.read_exact(&mut data).ok()?;

        Some(CrawHeader {
            thumbnail: CrawThumbnail {
                width,
                height,
                data,
            },
        })
    }

    pub(crate) fn craw_header(&self) -> Result<&CrawHeader> {
        self.craw_header
            .get_or_init(|| self.load_craw_header())
            .as_ref()
            .ok_or(Error::NotFound)
    }

    /// Parse the offset table (`CTBO`) in the Canon `uuid` box and
    /// build the `CMT1`-`CMT4` TIFF blocks it points to.
    fn load_metadata_blocks(&self) -> Vec<(u32, tiff::Container)> {
        let mut blocks = vec![];
        let uuid_box = match self.canon_uuid(&CANON_CR3_UUID) {
            Some(b) => b,
            None => return blocks,
        };
        let entries = {
            let mut view = self.view.borrow_mut();
            let children = match read_boxes(&mut view, uuid_box.offset, uuid_box.end()) {
                Ok(c) => c,
                Err(_) => return blocks,
            };
            let ctbo = match find_box(&children, b"CTBO") {
                Some(b) => b,
                None => return blocks,
            };
            let mut entries = vec![];
            // `CTBO` payload: 4 bytes version/flags, 4 bytes entry
            // count, then `count` entries of index:u32/offset:u64/size:u64.
            if view.seek(SeekFrom::Start(ctbo.offset + 4)).is_err() {
                return blocks;
            }
            let count = view.read_u32::<BigEndian>().unwrap_or(0);
            for _ in 0..count {
                let index = match view.read_u32::<BigEndian>() {
                    Ok(v) => v,
                    Err(_) => break,
                };
                let offset = match view.read_u64::<BigEndian>() {
                    Ok(v) => v,
                    Err(_) => break,
                };
                let size = match view.read_u64::<BigEndian>() {
                    Ok(v) => v,
                    Err(_) => break,
                };
                entries.push((index, offset, size));
            }
            entries
        };

        for (index, offset, _size) in entries {
            // Index 0 is the `CTBO` table itself, not a CMT TIFF block.
            if index == 0 {
                continue;
            }
            let subview = {
                let view = self.view.borrow();
                match Viewer::create_subview(&view, offset) {
                    Ok(v) => v,
                    Err(_) => continue,
                }
            };
            let mut container =
                tiff::Container::new(subview, vec![tiff::IfdType::Main], self.raw_type);
            if container.load(None).is_ok() {
                blocks.push((index, container));
            }
        }

        blocks
    }

    /// Get the `idx`th Canon metadata block (`CMT1` is 0, `CMT2` is 1,
    /// etc), as a pre-loaded `tiff::Container`.
    pub(crate) fn metadata_block(&self, idx: usize) -> Option<&(u32, tiff::Container)> {
        self.metadata_blocks
            .get_or_init(|| self.load_metadata_blocks())
            .get(idx)
    }

    /// Parse the `PRVW` full size preview `uuid` box.
    fn load_preview(&self) -> Option<ThumbDesc> {
        let uuid_box = self.canon_uuid(&CANON_PRVW_UUID)?;
        let mut view = self.view.borrow_mut();
        view.seek(SeekFrom::Start(uuid_box.offset)).ok()?;
        let _version = view.read_u32::<BigEndian>().ok()?;
        let width = view.read_u16::<BigEndian>().ok()?;
        let height = view.read_u16::<BigEndian>().ok()?;
        let data_size = view.read_u32::<BigEndian>().ok()?;
        let _format = view.read_u32::<BigEndian>().ok()?;
        let offset = view.stream_position().ok()?;

        Some(ThumbDesc {
            width: width as u32,
            height: height as u32,
            data_type: DataType::Jpeg,
            data: Data::Offset(DataOffset {
                offset,
                len: data_size as u64,
            }),
        })
    }

    pub(crate) fn preview_desc(&self) -> Result<ThumbDesc> {
        match self.preview.get_or_init(|| self.load_preview()) {
            Some(desc) => Ok(ThumbDesc {
                width: desc.width,
                height: desc.height,
                data_type: desc.data_type,
                data: match &desc.data {
                    Data::Offset(o) => Data::Offset(DataOffset {
                        offset: o.offset,
                        len: o.len,
                    }),
                    Data::Bytes(b) => Data::Bytes(b.clone()),
                },
            }),
            None => Err(Error::NotFound),
        }
    }

    /// Read a `VisualSampleEntry`-shaped `stsd` child: fourcc plus the
    /// width/height fields that follow its own 8 byte box header.
    fn sample_entry(&self, view: &mut View, stsd: &BoxEntry) -> Option<([u8; 4], u16, u16)> {
        // `stsd` payload: 4 bytes version/flags, 4 bytes entry_count,
        // then the sample entries.
        let entry = read_boxes(view, stsd.offset + 8, stsd.end())
            .ok()?
            .into_iter()
            .next()?;
        // `VisualSampleEntry`: 6+2 reserved/data_reference_index, then
        // 2+2+12 bytes of pre_defined/reserved, then width(2)/height(2).
        view.seek(SeekFrom::Start(entry.offset + 24)).ok()?;
        let width = view.read_u16::<BigEndian>().ok()?;
        let height = view.read_u16::<BigEndian>().ok()?;
        Some((entry.fourcc, width, height))
    }

    /// Parse one `trak` box into a `TrackInfo`.
    fn load_track(&self, trak: &BoxEntry) -> Option<TrackInfo> {
        let mut view = self.view.borrow_mut();
        let trak_children = read_boxes(&mut view, trak.offset, trak.end()).ok()?;
        let mdia = find_box(&trak_children, b"mdia")?;
        let mdia_children = read_boxes(&mut view, mdia.offset, mdia.end()).ok()?;
        let hdlr = find_box(&mdia_children, b"hdlr")?;
        view.seek(SeekFrom::Start(hdlr.offset + 8)).ok()?;
        let mut handler_type = [0_u8; 4];
        view.read_exact(&mut handler_type).ok()?;
        let is_video = &handler_type == b"vide";

        let minf = find_box(&mdia_children, b"minf")?;
        let minf_children = read_boxes(&mut view, minf.offset, minf.end()).ok()?;
        let stbl = find_box(&minf_children, b"stbl")?;
        let stbl_children = read_boxes(&mut view, stbl.offset, stbl.end()).ok()?;

        let stsd = find_box(&stbl_children, b"stsd")?;
        let (fourcc, width, height) = self.sample_entry(&mut view, stsd)?;
        let is_jpeg = &fourcc == b"JPEG" || &fourcc == b"jpeg" || &fourcc == b"Jpeg";

        let stsz = find_box(&stbl_children, b"stsz")?;
        view.seek(SeekFrom::Start(stsz.offset + 4)).ok()?;
        let sample_size = view.read_u32::<BigEndian>().ok()?;
        let len = if sample_size != 0 {
            sample_size as u64
        } else {
            let _count = view.read_u32::<BigEndian>().ok()?;
            view.read_u32::<BigEndian>().ok()? as u64
        };

        let offset = if let Some(co64) = find_box(&stbl_children, b"co64") {
            view.seek(SeekFrom::Start(co64.offset + 8)).ok()?;
            view.read_u64::<BigEndian>().ok()?
        } else {
            let stco = find_box(&stbl_children, b"stco")?;
            view.seek(SeekFrom::Start(stco.offset + 8)).ok()?;
            view.read_u32::<BigEndian>().ok()? as u64
        };

        Some(TrackInfo {
            is_video,
            is_jpeg,
            width,
            height,
            offset,
            len,
        })
    }

    fn tracks(&self) -> &[TrackInfo] {
        self.tracks.get_or_init(|| {
            self.moov_children()
                .iter()
                .filter(|b| b.is(b"trak"))
                .filter_map(|trak| self.load_track(trak))
                .collect()
        })
    }

    pub(crate) fn track_count(&self) -> Result<u32> {
        Ok(self.tracks().len() as u32)
    }

    pub(crate) fn is_track_video(&self, idx: u32) -> Result<bool> {
        self.tracks()
            .get(idx as usize)
            .map(|t| t.is_video)
            .ok_or(Error::NotFound)
    }

    pub(crate) fn raw_track(&self, idx: u32) -> Result<RawTrack> {
        self.tracks()
            .get(idx as usize)
            .map(|t| RawTrack {
                is_jpeg: t.is_jpeg,
                image_width: t.width,
                image_height: t.height,
                offset: t.offset,
                len: t.len,
            })
            .ok_or(Error::NotFound)
    }
}

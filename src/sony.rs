/*
 * libopenraw - sony.rs
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

//! Sony specific code.

use std::collections::HashMap;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::camera_ids::{sony, vendor};
use crate::colour::BuiltinMatrix;
use crate::container::GenericContainer;
use crate::io::Viewer;
use crate::rawfile::ReadAndSeek;
use crate::thumbnail;
use crate::tiff::{self, Dir, Ifd};
use crate::{DataType, Dump, Error, RawData, RawFile, RawFileImpl, Result, Type, TypeId};

macro_rules! sony {
    ($model:ident) => {
        TypeId(vendor::SONY, sony::$model)
    };
}

lazy_static::lazy_static! {
    /// Sony MakerNote tag names
    pub static ref MNOTE_TAG_NAMES: HashMap<u16, &'static str> = HashMap::from([
        (0x10, "CameraInfo"),
        (0x20, "FocusInfo"),
        (0x102, "Quality"),
        (0x104, "FlashExposureComp"),
        (0x105, "Teleconverter"),
        (0x112, "WhiteBalanceFineTune"),
        (0x114, "CameraSettings"),
        (0x115, "WhiteBalance"),
        (0x116, "ExtraInfo"),
        (0xe00, "PrintIM"),
        (0x1000, "MultiBurstMode"),
        (0x1001, "MultiBurstImageWidth"),
        (0x1002, "MultiBurstImageHeight"),
        (0x1003, "Panorama"),
        (0x2001, "PreviewImage"),
        (0x2002, "Rating"),
        (0x2004, "Contrast"),
        (0x2005, "Saturation"),
        (0x2006, "Sharpness"),
        (0x2007, "Brightness"),
        (0x2008, "LongExposureNoiseReduction"),
        (0x2009, "HighISONoiseReduction"),
        (0x200a, "HDR"),
        (0x200b, "MultiFrameNoiseReduction"),
        (0x200e, "PictureEffect"),
        (0x200f, "SoftSkinEffect"),
        (0x2010, "Tag2010a"),
        (0x2011, "VignettingCorrection"),
        (0x2012, "LateralChromaticAberration"),
        (0x2013, "DistortionCorrectionSetting"),
        (0x2014, "WBShiftAB_GM"),
        (0x2016, "AutoPortraitFramed"),
        (0x2017, "FlashAction"),
        (0x201a, "ElectronicFrontCurtainShutter"),
        (0x201b, "FocusMode"),
        (0x201c, "AFAreaModeSetting"),
        (0x201d, "FlexibleSpotPosition"),
        (0x201e, "AFPointSelected"),
        (0x2020, "AFPointsUsed"),
        (0x2021, "AFTracking"),
        (0x2022, "FocalPlaneAFPointsUsed"),
        (0x2023, "MultiFrameNREffect"),
        (0x2026, "WBShiftAB_GM_Precise"),
        (0x2027, "FocusLocation"),
        (0x2028, "VariableLowPassFilter"),
        (0x2029, "RAWFileType"),
        (0x202a, "Tag202a"),
        (0x202b, "PrioritySetInAWB"),
        (0x202c, "MeteringMode2"),
        (0x202d, "ExposureStandardAdjustment"),
        (0x202e, "Quality"),
        (0x202f, "PixelShiftInfo"),
        (0x2031, "SerialNumber"),
        (0x3000, "ShotInfo"),
        (0x900b, "Tag900b"),
        (0x9050, "Tag9050a"),
        (0x9400, "Tag9400a"),
        (0x9401, "Tag9401"),
        (0x9402, "Tag9402"),
        (0x9403, "Tag9403"),
        (0x9404, "Tag9404a"),
        (0x9405, "Tag9405a"),
        (0x9406, "Tag9406"),
        (0x9407, "Sony_0x9407"),
        (0x9408, "Sony_0x9408"),
        (0x9409, "Sony_0x9409"),
        (0x940a, "Tag940a"),
        (0x940b, "Sony_0x940b"),
        (0x940c, "Tag940c"),
        (0x940d, "Sony_0x940d"),
        (0x940e, "AFInfo"),
        (0x940f, "Sony_0x940f"),
        (0x9411, "Sony_0x9411"),
        (0xb000, "FileFormat"),
        (0xb001, "SonyModelID"),
        (0xb020, "CreativeStyle"),
        (0xb021, "ColorTemperature"),
        (0xb022, "ColorCompensationFilter"),
        (0xb023, "SceneMode"),
        (0xb024, "ZoneMatching"),
        (0xb025, "DynamicRangeOptimizer"),
        (0xb026, "ImageStabilization"),
        (0xb027, "LensType"),
        (0xb028, "MinoltaMakerNote"),
        (0xb029, "ColorMode"),
        (0xb02a, "LensSpec"),
        (0xb02b, "FullImageSize"),
        (0xb02c, "PreviewImageSize"),
        (0xb040, "Macro"),
        (0xb041, "ExposureMode"),
        (0xb042, "FocusMode"),
        (0xb043, "AFAreaMode"),
        (0xb044, "AFIlluminator"),
        (0xb047, "JPEGQuality"),
        (0xb048, "FlashLevel"),
        (0xb049, "ReleaseMode"),
        (0xb04a, "SequenceNumber"),
        (0xb04b, "Anti-Blur"),
        (0xb04e, "FocusMode"),
        (0xb04f, "DynamicRangeOptimizer"),
        (0xb050, "HighISONoiseReduction2"),
        (0xb052, "IntelligentAuto"),
        (0xb054, "WhiteBalance"),
    ]);

    static ref MAKE_TO_ID_MAP: tiff::MakeToIdMap = HashMap::from([
        ("DSLR-A100", sony!(A100)),
        ("DSLR-A200", sony!(A200)),
        ("DSLR-A380", sony!(A380)),
        ("DSLR-A390", sony!(A390)),
        ("DSLR-A550", sony!(A550)),
        ("DSLR-A560", sony!(A560)),
        ("DSLR-A580", sony!(A580)),
        ("DSLR-A700", sony!(A700)),
        ("DSLR-A850", sony!(A850)),
        ("DSLR-A900", sony!(A900)),
        ("SLT-A33", sony!(SLTA33)),
        // Likely a pre-release.
        ("SLT-A00", sony!(SLTA35)),
        ("SLT-A55V", sony!(SLTA55)),
        ("SLT-A57", sony!(SLTA57)),
        ("SLT-A58", sony!(SLTA58)),
        ("SLT-A65V", sony!(SLTA65)),
        ("SLT-A77V", sony!(SLTA77)),
        ("SLT-A99V", sony!(SLTA99)),
        ("NEX-3", sony!(NEX3)),
        ("NEX-5", sony!(NEX5)),
        ("NEX-5N", sony!(NEX5N)),
        // There are pre-production files with the type NEX-C00...
        ("NEX-C3", sony!(NEXC3)),
        ("NEX-F3", sony!(NEXF3)),
        ("NEX-7", sony!(NEX7)),
        ("NEX-6", sony!(NEX6)),
        ("NEX-5R", sony!(NEX5R)),
        ("NEX-5T", sony!(NEX5T)),
        ("DSC-RX10", sony!(RX10)),
        ("DSC-RX10M2", sony!(RX10M2)),
        ("DSC-RX10M3", sony!(RX10M3)),
        ("DSC-RX100", sony!(RX100)),
        ("DSC-RX100M2", sony!(RX100M2)),
        ("DSC-RX100M3", sony!(RX100M3)),
        ("DSC-RX100M4", sony!(RX100M4)),
        ("DSC-RX100M5", sony!(RX100M5)),
        ("DSC-RX1", sony!(RX1)),
        ("DSC-RX1R", sony!(RX1R)),
        ("DSC-RX1RM2", sony!(RX1RM2)),
        ("ILCA-99M2", sony!(ILCA99M2)),
        ("ILCE-3000", sony!(ILCE3000)),
        ("ILCE-6000", sony!(ILCE6000)),
        ("ILCE-6300", sony!(ILCE6300)),
        ("ILCE-6500", sony!(ILCE6500)),
        ("ILCE-7", sony!(ILCE7)),
        ("ILCE-7R", sony!(ILCE7R)),
        ("ILCE-7RM2", sony!(ILCE7RM2)),
        ("ILCE-7M2", sony!(ILCE7M2)),
        ("ILCE-7M3", sony!(ILCE7M3)),
        ("ILCE-7M4", sony!(ILCE7M4)),
        ("ILCE-7RM3", sony!(ILCE7RM3)),
        ("ILCE-7RM4", sony!(ILCE7RM4)),
        ("ILCE-7S", sony!(ILCE7S)),
        ("ILCE-7SM2", sony!(ILCE7SM2)),
        ("ILCE-7SM3", sony!(ILCE7SM3)),
        ("ILCE-7C", sony!(ILCE7C)),
        ("ILCE-9", sony!(ILCE9)),
        ("ILCE-9M2", sony!(ILCE9M2)),
        ("ILCE-5000", sony!(ILCE5000)),
        ("ILCE-5100", sony!(ILCE5100)),
        ("ILCE-6100", sony!(ILCE6100)),
        ("ILCE-6400", sony!(ILCE6400)),
        ("ILCE-6600", sony!(ILCE6600)),
        ("ILCA-68", sony!(ILCA68)),
        ("ILCA-77M2", sony!(ILCA77M2)),
    ]);

    static ref MATRICES: [BuiltinMatrix; 37] = [
        BuiltinMatrix::new(sony!(A100), 0, 0xfeb,
            [ 9437, -2811, -774, -8405, 16215, 2290, -710, 596, 7181 ]),
        BuiltinMatrix::new(sony!(A200), 0, 0,
            [ 9847, -3091, -928, -8485, 16345, 2225, -715, 595, 7103 ]),
        BuiltinMatrix::new(sony!(A380), 0, 0,
            [ 6038, -1484, -579, -9145, 16746, 2512, -875, 746, 7218 ]),
        BuiltinMatrix::new(sony!(A390), 0, 0,
            [ 6038, -1484, -579, -9145, 16746, 2512, -875, 746, 7218 ]),
        BuiltinMatrix::new(sony!(A550), 128, 0xfeb,
            [ 4950, -580, -103, -5228, 12542, 3029, -709, 1435, 7371 ]),
        BuiltinMatrix::new(sony!(A560), 128, 0xfeb,
            [ 4950, -580, -103, -5228, 12542, 3029, -709, 1435, 7371 ]),
        BuiltinMatrix::new(sony!(A700), 126, 0,
            [ 5775, -805, -359, -8574, 16295, 2391, -1943, 2341, 7249 ]),
        BuiltinMatrix::new(sony!(A850), 128, 0,
            [ 5413, -1162, -365, -5665, 13098, 2866, -608, 1179, 8440 ]),
        BuiltinMatrix::new(sony!(A900), 128, 0,
            [ 5209, -1072, -397, -8845, 16120, 2919, -1618, 1803, 8654 ]),
        BuiltinMatrix::new(sony!(SLTA33), 128, 0,
            [ 6069, -1221, -366, -5221, 12779, 2734, -1024, 2066, 6834 ]),
        BuiltinMatrix::new(sony!(SLTA35), 128, 0,
            [ 5986, -1618, -415, -4557, 11820, 3120, -681, 1404, 6971 ]),
        BuiltinMatrix::new(sony!(SLTA55), 128, 0,
            [ 5932, -1492, -411, -4813, 12285, 2856, -741, 1524, 6739 ]),
        BuiltinMatrix::new(sony!(SLTA57), 128, 0,
            [ 5991, -1456, -455, -4764, 12135, 2980, -707, 1425, 6701 ]),
        BuiltinMatrix::new(sony!(SLTA58), 128, 0,
            [ 5991, -1456, -455, -4764, 12135, 2980, -707, 1425, 6701 ]),
        BuiltinMatrix::new(sony!(SLTA65), 128, 0,
            [ 5491, -1192, -363, -4951, 12342, 2948, -911, 1722, 7192 ]),
        BuiltinMatrix::new(sony!(SLTA77), 128, 0,
            [ 5491, -1192, -363, -4951, 12342, 2948, -911, 1722, 7192 ]),
        BuiltinMatrix::new(sony!(SLTA99), 0, 0,
            [ 6344, -1612, -462, -4863, 12477, 2681, -865, 1786, 6899 ]),
        BuiltinMatrix::new(sony!(NEX3), 128, 0, // Adobe
            [ 6549, -1550, -436, -4880, 12435, 2753, -854, 1868, 6976 ]),
        BuiltinMatrix::new(sony!(NEX5), 128, 0, // Adobe
            [ 6549, -1550, -436, -4880, 12435, 2753, -854, 1868, 6976 ]),
        BuiltinMatrix::new(sony!(NEX5N), 128, 0,
            [ 5991, -1456, -455, -4764, 12135, 2980, -707, 1425, 6701 ]),
        BuiltinMatrix::new(sony!(NEX5R), 128, 0,
            [ 6129, -1545, -418, -4930, 12490, 2743, -977, 1693, 6615 ]),
        BuiltinMatrix::new(sony!(NEX5T), 128, 0,
            [ 6129, -1545, -418, -4930, 12490, 2743, -977, 1693, 6615 ]),
        BuiltinMatrix::new(sony!(NEXC3), 128, 0,
            [ 5991, -1456, -455, -4764, 12135, 2980, -707, 1425, 6701 ]),
        BuiltinMatrix::new(sony!(NEXF3), 128, 0,
            [ 5991, -1456, -455, -4764, 12135, 2980, -707, 1425, 6701 ]),
        BuiltinMatrix::new(sony!(NEX6), 128, 0,
            [ 6129, -1545, -418, -4930, 12490, 2743, -977, 1693, 6615 ]),
        BuiltinMatrix::new(sony!(NEX7), 128, 0,
            [ 5491, -1192, -363, -4951, 12342, 2948, -911, 1722, 7192 ]),
        BuiltinMatrix::new(sony!(RX100), 0, 0,
            [ 8651, -2754, -1057, -3464, 12207, 1373, -568, 1398, 4434 ]),
        BuiltinMatrix::new(sony!(RX100M2), 0, 0,
            [ 6596, -2079, -562, -4782, 13016, 1933, -970, 1581, 5181 ]),
        BuiltinMatrix::new(sony!(RX1), 0, 0,
            [ 6344, -1612, -462, -4863, 12477, 2681, -865, 1786, 6899 ]),
        BuiltinMatrix::new(sony!(RX1R), 0, 0,
            [ 6344, -1612, -462, -4863, 12477, 2681, -865, 1786, 6899 ]),
        BuiltinMatrix::new(sony!(RX1RM2), 0, 0,
            [ 6629, -1900, -483, -4618, 12349, 2550, -622, 1381, 6514 ]),
        BuiltinMatrix::new(sony!(ILCE7), 128, 0,
            [ 5271, -712, -347, -6153, 13653, 2763, -1601, 2366, 7242 ]),
        BuiltinMatrix::new(sony!(ILCE7R), 128, 0,
            [ 4913, -541, -202, -6130, 13513, 2906, -1564, 2151, 7183 ]),
        BuiltinMatrix::new(sony!(ILCE7RM2), 0, 0,
            [ 6629, -1900, -483, -4618, 12349, 2550, -622, 1381, 6514 ]),
        BuiltinMatrix::new(sony!(ILCE3000), 128, 0,
            [ 5991, -1456, -455, -4764, 12135, 2980, -707, 1425, 6701 ]),
        BuiltinMatrix::new(sony!(ILCE6000), 128, 0,
            [ 5991, -1456, -455, -4764, 12135, 2980, -707, 1425, 6701 ]),
        BuiltinMatrix::new(sony!(ILCE6300), 0, 0,
            [ 5973, -1695, -419, -3826, 11797, 2293, -639, 1398, 5789 ]),
    ];
}

/// Sony ARW (and SR2) files. TIFF/EP based, like NEF and DNG.
pub(crate) struct ArwFile {
    reader: Rc<Viewer>,
    type_id: OnceCell<TypeId>,
    container: OnceCell<tiff::Container>,
    thumbnails: OnceCell<Vec<(u32, thumbnail::ThumbDesc)>>,
}

impl ArwFile {
    pub fn factory(reader: Box<dyn ReadAndSeek>) -> Box<dyn RawFile> {
        let viewer = Viewer::new(reader, 0);
        Box::new(ArwFile {
            reader: viewer,
            type_id: OnceCell::new(),
            container: OnceCell::new(),
            thumbnails: OnceCell::new(),
        })
    }

    /// The A100 was the first Sony DSLR (a rebadged Konica-Minolta) and
    /// predates the TIFF/EP CFA SubIFD convention the other ARW files use.
    fn is_a100(&self) -> bool {
        self.type_id() == sony!(A100)
    }
}

impl RawFileImpl for ArwFile {
    fn identify_id(&self) -> TypeId {
        *self.type_id.get_or_init(|| {
            self.container();
            let container = self.container.get().unwrap();
            tiff::identify_with_exif(container, &MAKE_TO_ID_MAP)
                .unwrap_or(TypeId(vendor::SONY, sony::UNKNOWN))
        })
    }

    fn container(&self) -> &dyn GenericContainer {
        self.container.get_or_init(|| {
            let view = Viewer::create_view(&self.reader, 0).expect("Created view");
            let mut container = tiff::Container::new(view, vec![tiff::IfdType::Main], self.type_());
            container.load(None).expect("ARW container error");
            container
        })
    }

    fn thumbnails(&self) -> &Vec<(u32, thumbnail::ThumbDesc)> {
        self.thumbnails.get_or_init(|| {
            self.container();
            let container = self.container.get().unwrap();
            tiff::tiff_thumbnails(container)
        })
    }

    fn ifd(&self, ifd_type: tiff::IfdType) -> Option<Rc<Dir>> {
        self.container();
        let container = self.container.get().unwrap();
        match ifd_type {
            tiff::IfdType::Main => container.directory(0),
            tiff::IfdType::Raw | tiff::IfdType::Cfa => {
                if self.is_a100() {
                    container.directory(0)
                } else {
                    tiff::tiff_locate_cfa_ifd(container)
                }
            }
            tiff::IfdType::Exif => container.exif_dir(),
            tiff::IfdType::MakerNote => container.mnote_dir(),
            _ => None,
        }
    }

    fn load_rawdata(&self, skip_decompress: bool) -> Result<RawData> {
        if self.is_a100() {
            // The A100 predates the conventions the rest of this facade
            // relies on; its sensor data layout isn't handled here.
            log::error!("A100 RAW data extraction is not implemented");
            return Err(Error::NotSupported);
        }
        self.ifd(tiff::IfdType::Raw)
            .ok_or_else(|| {
                log::error!("CFA not found");
                Error::NotFound
            })
            .and_then(|ref dir| {
                tiff::tiff_get_rawdata(self.container.get().unwrap(), dir).map(|rawdata| {
                    let compression = rawdata.compression();
                    if skip_decompress || compression != tiff::Compression::Arw {
                        rawdata
                    } else {
                        // Sony's proprietary delta-compressed scheme isn't
                        // decoded; return the compressed payload untouched.
                        log::error!("Sony ARW compression unsupported");
                        rawdata
                    }
                })
            })
    }

    fn get_builtin_colour_matrix(&self) -> Result<Vec<f64>> {
        MATRICES
            .iter()
            .find(|m| m.camera == self.type_id())
            .map(|m| Vec::from(m.matrix))
            .ok_or(Error::NotFound)
    }
}

impl RawFile for ArwFile {
    fn type_(&self) -> Type {
        Type::Arw
    }
}

impl Dump for ArwFile {
    fn print_dump(&self, indent: u32) {
        dump_println!(indent, "<Sony ARW File>");
        {
            let indent = indent + 1;
            self.container().print_dump(indent);
        }
        dump_println!(indent, "</Sony ARW File>");
    }
}

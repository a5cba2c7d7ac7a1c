use std::{collections::BTreeMap, io};

use crate::{
    pdf::{CrossReference, CrossReferenceStream, CrossReferenceTable, FilterList, IndirectObject, Object, TrailerDictionary},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

const STARTXREF: &[u8] = b"startxref\n";
const EOF_MARKER: &[u8] = b"%%EOF\n";
/// Comment with high bytes after the header, announces binary content.
const BINARY_COMMENT: &[u8] = b"%\xe2\xe3\xcf\xd3\n";

/// The kind of cross-reference section written after the objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XrefKind {
    Table,
    /// Requires PDF 1.5. The stream is written with the object number that
    /// follows the highest object number of the section.
    Stream(FilterList),
}

/// A complete PDF file: header, uncompressed indirect objects, cross-reference
/// section and file trailer.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfSection {
    pub version: (u8, u8),
    pub objects: BTreeMap<u32, Object>,
    pub trailer: TrailerDictionary,
    pub xref_kind: XrefKind,
}

impl PdfSection {
    pub fn new(version: (u8, u8), xref_kind: XrefKind) -> Self {
        Self {
            version,
            objects: BTreeMap::new(),
            trailer: TrailerDictionary::new(),
            xref_kind,
        }
    }

    /// Add an object with generation 0. An object with the same number is
    /// replaced.
    pub fn insert(&mut self, number: u32, object: Object) -> &mut Self {
        if self.objects.insert(number, object).is_some() {
            log::debug!("object {} replaced", number);
        }
        self
    }

    fn highest_number(&self) -> u32 {
        self.objects.keys().next_back().copied().unwrap_or(0)
    }
}

impl Encoder<PdfSection> for SimpleEncoder {
    fn write_to(sec: &PdfSection, writer: &mut dyn Writer) -> io::Result<()> {
        log::trace!("write PDF Section");

        let version = match sec.xref_kind {
            XrefKind::Stream(_) if sec.version < (1, 5) => {
                log::debug!("raise version {}.{} to 1.5 for the xref stream", sec.version.0, sec.version.1);
                (1, 5)
            }
            _ => sec.version,
        };
        writer.write(format!("%PDF-{}.{}\n", version.0, version.1).as_bytes())?;
        writer.write(BINARY_COMMENT)?;

        let highest = sec.highest_number();
        let mut offsets = vec![None; highest as usize];

        // write objects in ascending order and remember where they start
        for (&number, obj) in sec.objects.iter() {
            if number == 0 {
                log::warn!("object number 0 is reserved, object skipped");
                continue;
            }
            offsets[number as usize - 1] = Some(writer.position() as u64);
            Self::write_to(&IndirectObject::new(number, 0, obj.clone()), writer)?;
        }

        let start_xref = writer.position() as u64;
        let xref: CrossReference = match &sec.xref_kind {
            XrefKind::Table => CrossReferenceTable::new(&sec.trailer, start_xref, offsets).into(),
            XrefKind::Stream(filters) => {
                CrossReferenceStream::new(&sec.trailer, highest + 1, start_xref, offsets, Vec::new())
                    .with_filters(filters.clone())
                    .into()
            }
        };
        xref.output(writer)?;

        writer.write(STARTXREF)?;
        writer.write(start_xref.to_string().as_bytes())?;
        writer.write(b"\n")?;
        writer.write(EOF_MARKER)
    }
}

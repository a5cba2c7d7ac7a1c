//! Cross-reference data.
//!
//! References in a cross-reference section locate every object number of a PDF
//! file. An uncompressed object can be accessed at its byte offset while a
//! compressed object is contained inside an object stream. Object numbers that
//! were never written are free.
use std::io;

use super::{FilterList, TrailerDictionary};
use crate::{
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

/// Denotes a free object reference in a xref stream.
pub const XREF_FREE: u8 = 0;
/// Denotes a used object reference in a xref stream.
pub const XREF_USED: u8 = 1;
/// Denotes a used and compressed object reference in a xref stream.
pub const XREF_COMPRESSED: u8 = 2;

/// Field widths of a xref stream record: type, offset or stream number,
/// generation or index.
pub const W: [usize; 3] = [1, 8, 2];

/// Length in bytes of a single xref stream record.
pub const RECORD_LEN: usize = W[0] + W[1] + W[2];

/// Generation of the head of the free list.
pub const FREE_HEAD_GENERATION: u16 = u16::MAX;

/// Entry for object 0. It starts the list of free objects, points to itself and
/// carries the maximal generation number.
pub const FREE_HEAD_RECORD: [u8; RECORD_LEN] = [XREF_FREE, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// Location of one object number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectReference {
    /// No object was written with this number.
    Free,
    /// The object starts at `byte_offset`, counted from the beginning of the
    /// file. The generation is always 0.
    Uncompressed { byte_offset: u64 },
    /// The object is the `index`th object inside the object stream with number
    /// `containing_stream`.
    Compressed { containing_stream: u32, index: u32 },
}

impl ObjectReference {
    pub fn type_num(&self) -> u8 {
        match self {
            ObjectReference::Free => XREF_FREE,
            ObjectReference::Uncompressed { .. } => XREF_USED,
            ObjectReference::Compressed { .. } => XREF_COMPRESSED,
        }
    }

    /// Encode as xref stream record using the widths [`W`].
    ///
    /// Free entries are all zero.
    ///
    /// # Panics
    ///
    /// If the index of a compressed object doesn't fit into two bytes.
    pub fn record(&self) -> [u8; RECORD_LEN] {
        let (field2, field3) = match *self {
            ObjectReference::Free => (0, 0),
            ObjectReference::Uncompressed { byte_offset } => (byte_offset, 0),
            ObjectReference::Compressed {
                containing_stream,
                index,
            } => {
                let index = u16::try_from(index).unwrap_or_else(|_| {
                    panic!(
                        "index {} within object stream {} doesn't fit into {} bytes",
                        index, containing_stream, W[2]
                    )
                });
                (u64::from(containing_stream), index)
            }
        };

        let mut record = [0u8; RECORD_LEN];
        record[0] = self.type_num();
        record[W[0]..W[0] + W[1]].copy_from_slice(&field2.to_be_bytes());
        record[W[0] + W[1]..].copy_from_slice(&field3.to_be_bytes());
        record
    }
}

impl From<Option<u64>> for ObjectReference {
    fn from(offset: Option<u64>) -> Self {
        match offset {
            Some(byte_offset) => ObjectReference::Uncompressed { byte_offset },
            None => ObjectReference::Free,
        }
    }
}

/// Locates object `number` inside an object stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedObjectReference {
    pub number: u32,
    pub containing_stream: u32,
    pub index: u32,
}

impl CompressedObjectReference {
    pub fn new(number: u32, containing_stream: u32, index: u32) -> Self {
        Self {
            number,
            containing_stream,
            index,
        }
    }
}

impl From<CompressedObjectReference> for ObjectReference {
    fn from(c: CompressedObjectReference) -> Self {
        ObjectReference::Compressed {
            containing_stream: c.containing_stream,
            index: c.index,
        }
    }
}

/// Resolve the reference of every object number.
///
/// `uncompressed[i]` is the byte offset of object `i + 1`. Compressed references
/// are placed at their object number, extending the list with free entries if
/// the number lies behind the uncompressed offsets.
///
/// # Panics
///
/// If a compressed reference names object 0 or an object number that already
/// has a location.
pub fn merge_references(
    uncompressed: Vec<Option<u64>>,
    compressed: &[CompressedObjectReference],
) -> Vec<ObjectReference> {
    let mut slots: Vec<Option<ObjectReference>> = uncompressed
        .into_iter()
        .map(|offset| offset.map(|byte_offset| ObjectReference::Uncompressed { byte_offset }))
        .collect();

    for reference in compressed {
        assert!(
            reference.number != 0,
            "object 0 heads the free list and can't be compressed"
        );
        let slot = reference.number as usize - 1;
        if slot >= slots.len() {
            slots.resize(slot + 1, None);
        }
        if let Some(existing) = slots[slot] {
            panic!("object {} is already located at {:?}", reference.number, existing);
        }
        slots[slot] = Some((*reference).into());
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or(ObjectReference::Free))
        .collect()
}

/// Classic `xref` table followed by the `trailer` dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossReferenceTable<'a> {
    pub(crate) trailer: &'a TrailerDictionary,
    pub(crate) startxref: u64,
    pub(crate) references: Vec<ObjectReference>,
}

impl<'a> CrossReferenceTable<'a> {
    /// `offsets[i]` is the byte offset of object `i + 1`, `None` marks a free
    /// object number.
    pub fn new(trailer: &'a TrailerDictionary, startxref: u64, offsets: Vec<Option<u64>>) -> Self {
        Self {
            trailer,
            startxref,
            references: offsets.into_iter().map(ObjectReference::from).collect(),
        }
    }

    pub fn trailer(&self) -> &TrailerDictionary {
        self.trailer
    }

    /// Byte offset the file's `startxref` keyword points at, where this table
    /// starts. The table bytes don't depend on it. The offset of a previous
    /// section goes into `/Prev`, see [`TrailerDictionary::set_previous`].
    pub fn startxref(&self) -> u64 {
        self.startxref
    }

    pub fn references(&self) -> &[ObjectReference] {
        &self.references
    }
}

/// Cross-reference stream, a single indirect stream object whose dictionary
/// doubles as trailer.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossReferenceStream<'a> {
    pub(crate) trailer: &'a TrailerDictionary,
    pub(crate) startxref: u64,
    pub(crate) object_number: u32,
    pub(crate) references: Vec<ObjectReference>,
    pub(crate) filters: FilterList,
}

impl<'a> CrossReferenceStream<'a> {
    /// The stream itself is written as object `object_number` at byte offset
    /// `startxref`. It is the object that follows the last referenced one.
    ///
    /// `startxref` is the offset of this section, not of a previous one: the
    /// trailing record of the stream is the entry of the stream object and
    /// readers locate the object through it. A previous section is chained
    /// with [`TrailerDictionary::set_previous`].
    ///
    /// # Panics
    ///
    /// See [`merge_references`].
    pub fn new(
        trailer: &'a TrailerDictionary,
        object_number: u32,
        startxref: u64,
        uncompressed: Vec<Option<u64>>,
        compressed: Vec<CompressedObjectReference>,
    ) -> Self {
        let references = merge_references(uncompressed, &compressed);
        if object_number as usize != references.len() + 1 {
            log::warn!(
                "xref stream written as object {} but its entry describes object {}",
                object_number,
                references.len() + 1
            );
        }

        Self {
            trailer,
            startxref,
            object_number,
            references,
            filters: FilterList::default(),
        }
    }

    /// Replace the default flate filter.
    pub fn with_filters(mut self, filters: FilterList) -> Self {
        self.filters = filters;
        self
    }

    pub fn trailer(&self) -> &TrailerDictionary {
        self.trailer
    }

    pub fn startxref(&self) -> u64 {
        self.startxref
    }

    pub fn object_number(&self) -> u32 {
        self.object_number
    }

    pub fn references(&self) -> &[ObjectReference] {
        &self.references
    }

    pub fn filters(&self) -> &FilterList {
        &self.filters
    }

    /// Value of the `/Size` entry: the free list head, all references and the
    /// stream itself.
    pub fn size(&self) -> usize {
        self.references.len() + 2
    }
}

/// A cross-reference section of either kind.
///
/// In both kinds `startxref` is the byte offset of the section itself, the
/// value written after the file's `startxref` keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossReference<'a> {
    Table(CrossReferenceTable<'a>),
    Stream(CrossReferenceStream<'a>),
}

impl<'a> CrossReference<'a> {
    pub fn output(&self, writer: &mut dyn Writer) -> io::Result<()> {
        SimpleEncoder::write_to(self, writer)
    }

    pub fn trailer(&self) -> &TrailerDictionary {
        match self {
            CrossReference::Table(t) => t.trailer,
            CrossReference::Stream(s) => s.trailer,
        }
    }

    pub fn startxref(&self) -> u64 {
        match self {
            CrossReference::Table(t) => t.startxref,
            CrossReference::Stream(s) => s.startxref,
        }
    }
}

impl<'a> From<CrossReferenceTable<'a>> for CrossReference<'a> {
    fn from(t: CrossReferenceTable<'a>) -> Self {
        Self::Table(t)
    }
}

impl<'a> From<CrossReferenceStream<'a>> for CrossReference<'a> {
    fn from(s: CrossReferenceStream<'a>) -> Self {
        Self::Stream(s)
    }
}

//! Cross-reference sections of PDF files.
//!
//! Once all indirect objects of a file are written, their byte offsets (and
//! the locations of objects packed into object streams) are turned into either
//! a classic `xref` table with `trailer` dictionary or a cross-reference stream
//! (PDF 1.5+).
//!
//! ```
//! use claybrick_xref::{CrossReferenceTable, Reference, TrailerDictionary};
//! use claybrick_xref::writer::Encoder;
//!
//! let mut trailer = TrailerDictionary::new();
//! trailer.set_root(Reference::new(1, 0));
//!
//! let mut out = Vec::new();
//! let table = CrossReferenceTable::new(&trailer, 0, vec![Some(15)]);
//! claybrick_xref::SimpleEncoder::write_to(&table, &mut out).unwrap();
//! assert!(out.starts_with(b"xref\n0 2\n0000000000 65535 f \n0000000015 00000 n \n"));
//! ```
use std::{fs::File, io::Read};

pub use error::CbError;
pub use parse::XrefRow;
pub use pdf::{
    CompressedObjectReference, CrossReference, CrossReferenceStream, CrossReferenceTable, Filter, FilterList,
    ObjectReference, Reference, TrailerDictionary,
};
pub use simple_encode::{PdfSection, SimpleEncoder, XrefKind};

mod error;
pub mod parse;
pub mod pdf;
pub mod simple_encode;
pub mod writer;

/// Read a PDF file and return the rows of the cross-reference table its
/// `startxref` entry points to.
pub fn read_xref_table(file_path: &std::path::Path) -> Result<Vec<XrefRow>, CbError> {
    let mut input_file = File::open(file_path)?;
    let mut buf = Vec::new();
    input_file.read_to_end(&mut buf)?;

    parse::last_xref_table(&buf)
}

//! Encoding of PDF objects and cross-reference sections.
//!
//! Every encodable type implements [`Encoder`](crate::writer::Encoder) for
//! [`SimpleEncoder`]. The encoder writes objects without any compression of
//! its own, filters are applied to stream data beforehand.
pub use section::{PdfSection, XrefKind};

pub(crate) mod object;
mod section;
pub(crate) mod xref;

pub struct SimpleEncoder;

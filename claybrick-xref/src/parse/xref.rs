use nom::{branch, bytes, character, combinator, multi, IResult};
use nom_tracable::tracable_parser;

use super::{
    backward_search,
    error::{CbParseError, CbParseErrorKind},
    CbParseResult, Span,
};
use crate::{error::CbError, pdf::ObjectReference};

const EOF_MARKER: &[u8] = b"%%EOF";
const STARTXREF: &[u8] = b"startxref";
const XREF: &[u8] = b"xref";
/// Readers look for the end-of-file marker within the last 1024 bytes.
const EOF_SEARCH_LIMIT: usize = 1024;

/// One row of a cross-reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefRow {
    pub number: u32,
    pub offset: u64,
    pub generation: u32,
    /// Marks objects that are not in use/deleted as free.
    pub free: bool,
}

#[tracable_parser]
pub fn startxref_tail(input: Span) -> CbParseResult<usize> {
    let (remainder, (trailing, _)) = backward_search(
        STARTXREF.len() + 2048,
        bytes::complete::tag_no_case(STARTXREF),
    )(input)?;
    let (trailing, _) = character::complete::multispace0(trailing)?;
    let (_, xref_pos) = character::complete::u64(trailing)?;
    let xref_pos: usize = xref_pos
        .try_into()
        .map_err(|_| nom::Err::Error(CbParseError::new(input, CbParseErrorKind::StartxrefInvalid)))?;

    Ok((remainder, xref_pos))
}

#[tracable_parser]
pub fn eof_marker_tail(input: Span) -> CbParseResult<()> {
    let (remainder, (trailing, _)) =
        backward_search(EOF_SEARCH_LIMIT, bytes::complete::tag_no_case(EOF_MARKER))(input)?;
    let (trailing, _) = character::complete::multispace0(trailing)?;
    if !trailing.fragment().is_empty() {
        log::warn!("{} unexpected bytes after %%EOF", trailing.fragment().len());
    }

    Ok((remainder, ()))
}

#[tracable_parser]
fn xref_subsection(input: Span) -> CbParseResult<Vec<XrefRow>> {
    let (remainder, first) = character::complete::u32(input)?;
    let (remainder, _) = character::complete::space1(remainder)?;
    let (remainder, count) = character::complete::u32(remainder)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;

    // the count is read from the file, don't let it decide how much memory we reserve
    let mut rows = Vec::<XrefRow>::with_capacity(count.min(1024) as usize);

    let mut remainder = remainder;
    for i in 0..count {
        let number = first
            .checked_add(i)
            .ok_or_else(|| nom::Err::Failure(CbParseError::new(input, CbParseErrorKind::XrefInvalid)))?;
        let (inner_rmndr, offset) = character::complete::u64(remainder)?;
        let (inner_rmndr, _) = character::complete::space1(inner_rmndr)?;
        let (inner_rmndr, generation) = character::complete::u32(inner_rmndr)?;
        let (inner_rmndr, _) = character::complete::space1(inner_rmndr)?;
        let (inner_rmndr, free) = branch::alt((
            combinator::value(false, bytes::complete::tag(&b"n"[..])),
            combinator::value(true, bytes::complete::tag(&b"f"[..])),
        ))(inner_rmndr)?;
        let (inner_rmndr, _) = character::complete::multispace0(inner_rmndr)?;

        rows.push(XrefRow {
            number,
            offset,
            generation,
            free,
        });
        remainder = inner_rmndr;
    }

    Ok((remainder, rows))
}

/// Parse a `xref` section with one or more subsections. Stops in front of the
/// `trailer` keyword.
#[tracable_parser]
pub fn xref_table(input: Span) -> CbParseResult<Vec<XrefRow>> {
    // xref keyword
    let (remainder, _) = character::complete::multispace0(input)?;
    let (remainder, _) = bytes::complete::tag(XREF)(remainder)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;
    let (remainder, subsections) = multi::many1(xref_subsection)(remainder)?;

    Ok((remainder, subsections.into_iter().flatten().collect()))
}

type RecordResult<'a, O> = IResult<&'a [u8], O, CbParseError<&'a [u8]>>;

/// Big endian number of `width` bytes. A width of zero yields `default`.
fn field<'a>(width: usize, default: u64) -> impl Fn(&'a [u8]) -> RecordResult<'a, u64> {
    move |input| {
        if width == 0 {
            return Ok((input, default));
        }
        let (remainder, bytes) = bytes::complete::take(width)(input)?;
        Ok((remainder, bytes.iter().fold(0u64, |acc, &b| acc << 8 | u64::from(b))))
    }
}

fn record<'a>(w: [usize; 3]) -> impl Fn(&'a [u8]) -> RecordResult<'a, ObjectReference> {
    move |input| {
        let invalid = || nom::Err::Failure(CbParseError::new(input, CbParseErrorKind::XrefInvalid));

        // the type defaults to 1 if its field is omitted
        let (remainder, type_num) = field(w[0], 1)(input)?;
        let (remainder, field2) = field(w[1], 0)(remainder)?;
        let (remainder, field3) = field(w[2], 0)(remainder)?;

        let reference = match type_num {
            0 => ObjectReference::Free,
            1 => {
                if field3 != 0 {
                    log::warn!("object at {} has generation {}", field2, field3);
                }
                ObjectReference::Uncompressed { byte_offset: field2 }
            }
            2 => ObjectReference::Compressed {
                containing_stream: field2.try_into().map_err(|_| invalid())?,
                index: field3.try_into().map_err(|_| invalid())?,
            },
            other => {
                // unknown types are references to the null object
                log::warn!("unknown xref record type {}", other);
                ObjectReference::Free
            }
        };

        Ok((remainder, reference))
    }
}

/// Decode the (unfiltered) data of a xref stream with field widths `w`.
///
/// The result holds one reference per record, in order. Free entries lose
/// their generation and next free object.
pub fn xref_stream_records(data: &[u8], w: [usize; 3]) -> Result<Vec<ObjectReference>, CbError> {
    let row_len: usize = w.iter().sum();
    if row_len == 0 || w.iter().any(|&width| width > 8) {
        return Err(CbError::Parse(CbParseErrorKind::XrefInvalid));
    }
    if data.len() % row_len != 0 {
        log::warn!("{} bytes after the last xref record", data.len() % row_len);
    }

    let (_, records) = multi::count(record(w), data.len() / row_len)(data)?;
    Ok(records)
}

//! Reading cross-reference data back.
//!
//! Used to chain incremental updates (`/Prev` needs the position of the previous
//! section) and to check what was written.
use nom::{bytes, IResult, InputTake};
use nom_locate::LocatedSpan;
use nom_tracable::TracableInfo;

use self::error::{CbParseError, CbParseErrorKind};
use crate::error::CbError;

pub use self::xref::{eof_marker_tail, startxref_tail, xref_stream_records, xref_table, XrefRow};

pub mod error;
mod xref;

pub type Span<'a> = LocatedSpan<&'a [u8], TracableInfo>;
pub type CbParseResult<'a, O> = IResult<Span<'a>, O, CbParseError<Span<'a>>>;

pub fn span(input: &[u8]) -> Span {
    let info = TracableInfo::new().forward(true).backward(true);
    LocatedSpan::new_extra(input, info)
}

/// Apply `parser` at every position of the last `limit` bytes, starting with
/// the position closest to the end.
///
/// Returns the input in front of the match, the input following the match and
/// the parser output.
pub(crate) fn backward_search<'a, O, P>(
    limit: usize,
    mut parser: P,
) -> impl FnMut(Span<'a>) -> CbParseResult<'a, (Span<'a>, O)>
where
    P: FnMut(Span<'a>) -> CbParseResult<'a, O>,
{
    move |input: Span<'a>| {
        let len = input.fragment().len();
        for start in (len.saturating_sub(limit)..len).rev() {
            let (tail, head) = input.take_split(start);
            if let Ok((trailing, out)) = parser(tail) {
                return Ok((head, (trailing, out)));
            }
        }
        Err(nom::Err::Error(CbParseError::new(
            input,
            CbParseErrorKind::BackwardSearchNotFound,
        )))
    }
}

/// Parse the cross-reference table the `startxref` entry at the end of `buf`
/// points to.
pub fn last_xref_table(buf: &[u8]) -> Result<Vec<XrefRow>, CbError> {
    let input = span(buf);

    // find start of the xref section
    let (remainder, _) = eof_marker_tail(input)?;
    let (_, startxref) = startxref_tail(remainder)?;
    log::debug!("xref section at {}", startxref);

    let (xref_input, _) = bytes::complete::take::<_, _, CbParseError<Span>>(startxref)(input)?;
    let (_, rows) = xref_table(xref_input)?;
    Ok(rows)
}

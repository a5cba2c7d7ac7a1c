use nom::error::ErrorKind;

use crate::{
    parse::error::{CbParseError, CbParseErrorKind},
    pdf::FilterError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CbError {
    Parse(CbParseErrorKind),
    Io(std::io::ErrorKind),
    Filter(FilterError),
}

impl<I> From<nom::Err<CbParseError<I>>> for CbError {
    fn from(err: nom::Err<CbParseError<I>>) -> Self {
        match err {
            nom::Err::Error(err) | nom::Err::Failure(err) => CbError::Parse(err.kind),
            nom::Err::Incomplete(_) => CbError::Parse(CbParseErrorKind::Nom(ErrorKind::Complete)),
        }
    }
}

impl From<std::io::Error> for CbError {
    fn from(err: std::io::Error) -> Self {
        CbError::Io(err.kind())
    }
}

impl From<FilterError> for CbError {
    fn from(err: FilterError) -> Self {
        CbError::Filter(err)
    }
}

//! Stream filters.
//!
//! A [`FilterList`] is applied in list order when a stream is written. The
//! `/Filter` entry lists the filters in the order a reader has to undo them,
//! which is the reverse of the list.
use std::io::{self, Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use super::{Dictionary, Name, Object, K_FILTER};

const FLATE_DECODE: &[u8] = b"FlateDecode";
const ASCII_HEX_DECODE: &[u8] = b"ASCIIHexDecode";
const ASCII85_DECODE: &[u8] = b"ASCII85Decode";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The filter name is not known or not supported.
    Unsupported(Name),
    /// `/Filter` is neither a name nor an array of names.
    InvalidFilterEntry,
    Flate(io::ErrorKind),
    InvalidHex,
    Ascii85(aw_ascii85::DecodeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Flate(Compression),
    AsciiHex,
    Ascii85,
}

impl Filter {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            FLATE_DECODE => Some(Filter::Flate(Compression::default())),
            ASCII_HEX_DECODE => Some(Filter::AsciiHex),
            ASCII85_DECODE => Some(Filter::Ascii85),
            _ => None,
        }
    }

    /// Name used in the `/Filter` entry.
    pub fn name(&self) -> &'static [u8] {
        match self {
            Filter::Flate(_) => FLATE_DECODE,
            Filter::AsciiHex => ASCII_HEX_DECODE,
            Filter::Ascii85 => ASCII85_DECODE,
        }
    }

    pub fn encode(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Filter::Flate(level) => {
                let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), *level);
                encoder.write_all(data)?;
                encoder.finish()
            }
            Filter::AsciiHex => {
                let mut out = hex::encode_upper(data).into_bytes();
                out.push(b'>');
                Ok(out)
            }
            Filter::Ascii85 => Ok(aw_ascii85::encode(data)),
        }
    }

    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>, FilterError> {
        match self {
            Filter::Flate(_) => {
                let mut out = Vec::with_capacity(data.len() * 2);
                ZlibDecoder::new(data)
                    .read_to_end(&mut out)
                    .map_err(|err| FilterError::Flate(err.kind()))?;
                Ok(out)
            }
            Filter::AsciiHex => {
                let mut digits: Vec<u8> = data
                    .iter()
                    .copied()
                    .take_while(|&c| c != b'>')
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                // an odd number of digits is completed with a trailing zero
                if digits.len() % 2 == 1 {
                    digits.push(b'0');
                }
                hex::decode(digits).map_err(|_| FilterError::InvalidHex)
            }
            Filter::Ascii85 => aw_ascii85::decode(data).map_err(FilterError::Ascii85),
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Flate(Compression::default())
    }
}

/// Filters applied to the data of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterList(Vec<Filter>);

impl FilterList {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self(filters)
    }

    /// Write stream data as it is.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.0
    }

    /// Read the filters declared by the `/Filter` entry of a stream dictionary.
    pub fn from_dictionary(dict: &Dictionary) -> Result<Self, FilterError> {
        let lookup = |obj: &Object| {
            let name = obj.name().ok_or(FilterError::InvalidFilterEntry)?;
            Filter::from_name(name).ok_or_else(|| FilterError::Unsupported(name.clone()))
        };

        let mut filters = match dict.get(K_FILTER) {
            None => Vec::new(),
            Some(Object::Array(names)) => names.iter().map(lookup).collect::<Result<_, _>>()?,
            Some(name) => vec![lookup(name)?],
        };
        filters.reverse();
        Ok(Self(filters))
    }

    pub fn encode(&self, data: Vec<u8>) -> io::Result<Vec<u8>> {
        self.0.iter().try_fold(data, |data, filter| filter.encode(&data))
    }

    pub fn decode(&self, data: Vec<u8>) -> Result<Vec<u8>, FilterError> {
        self.0.iter().rev().try_fold(data, |data, filter| filter.decode(&data))
    }

    /// Add the `/Filter` entry. One filter is written as a name, multiple as an
    /// array.
    pub fn put_filter_entries(&self, dict: &mut Dictionary) {
        let mut names = self.0.iter().rev().map(|f| Object::Name(Name::from(f.name())));
        match self.0.len() {
            0 => {}
            1 => {
                if let Some(name) = names.next() {
                    dict.insert(Name::from(K_FILTER), name);
                }
            }
            _ => {
                dict.insert(Name::from(K_FILTER), Object::Array(names.collect()));
            }
        }
    }
}

impl Default for FilterList {
    /// Flate with the default compression level.
    fn default() -> Self {
        Self(vec![Filter::default()])
    }
}

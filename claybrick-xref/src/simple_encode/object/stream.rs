use std::io;

use crate::{
    pdf::{Name, Object, Stream, K_LENGTH},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

const START_STREAM: &[u8] = b"\nstream\n";
pub(crate) const EOL_MARKER: &[u8] = b"\n";
const END_STREAM: &[u8] = b"endstream";

/// Write `s` with `length` as its `/Length` entry.
pub(crate) fn write_stream(s: &Stream, length: usize, writer: &mut dyn Writer) -> io::Result<()> {
    // update the dictionary to fit the new layout
    let mut updated_dict = s.dictionary.clone();
    updated_dict.insert(Name::from(K_LENGTH), Object::Integer(length as i64));
    SimpleEncoder::write_to(&updated_dict, writer)?;
    writer.write(START_STREAM)?;
    writer.write(&s.data)?;
    writer.write(EOL_MARKER)?;
    writer.write(END_STREAM)
}

impl Encoder<Stream> for SimpleEncoder {
    /// The end-of-line marker in front of `endstream` is not part of `/Length`.
    fn write_to(s: &Stream, writer: &mut dyn Writer) -> io::Result<()> {
        write_stream(s, s.data.len(), writer)
    }
}

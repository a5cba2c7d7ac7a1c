use std::io;

use crate::{
    pdf::Dictionary,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

const DICT_START: &[u8] = b"<<\n";
const DICT_END: &[u8] = b">>";
const INDENT: &[u8] = b"  ";

impl Encoder<Dictionary> for SimpleEncoder {
    /// One entry per line, indented by two spaces, in insertion order.
    fn write_to(o: &Dictionary, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(DICT_START)?;
        for (key, value) in o.iter() {
            writer.write(INDENT)?;
            Self::write_to(key, writer)?;
            writer.write(b" ")?;
            Self::write_to(value, writer)?;
            writer.write(b"\n")?;
        }
        writer.write(DICT_END)
    }
}

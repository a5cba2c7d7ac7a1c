use std::io;

use crate::{
    pdf::Object,
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

pub(crate) mod array;
pub(crate) mod dictionary;
pub(crate) mod indirect;
pub(crate) mod name;
pub(crate) mod stream;

pub(crate) const TRUE_OBJECT: &str = "true";
pub(crate) const FALSE_OBJECT: &str = "false";
pub(crate) const NULL_OBJECT: &str = "null";

/// Hex string literal, `<0123ABCD>`.
pub(crate) fn write_hex_string(bytes: &[u8], writer: &mut dyn Writer) -> io::Result<()> {
    writer.write(b"<")?;
    writer.write(hex::encode_upper(bytes).as_bytes())?;
    writer.write(b">")
}

impl Encoder<Object> for SimpleEncoder {
    fn write_to(obj: &Object, writer: &mut dyn Writer) -> io::Result<()> {
        match obj {
            Object::HexString(bytes) => write_hex_string(bytes, writer),
            Object::Integer(i) => writer.write(i.to_string().as_bytes()),
            Object::Bool(true) => writer.write(TRUE_OBJECT.as_bytes()),
            Object::Bool(false) => writer.write(FALSE_OBJECT.as_bytes()),
            Object::Name(n) => Self::write_to(n, writer),
            Object::Array(a) => Self::write_to(a, writer),
            Object::Dictionary(d) => Self::write_to(d, writer),
            Object::Stream(s) => Self::write_to(s, writer),
            Object::Null => writer.write(NULL_OBJECT.as_bytes()),
            Object::Indirect(i) => Self::write_to(i, writer),
            Object::Reference(r) => Self::write_to(r, writer),
        }
    }
}

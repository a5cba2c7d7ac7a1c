use std::io;

use crate::{
    pdf::{IndirectObject, Reference},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

const START_OBJ: &[u8] = b"obj\n";
const END_OBJ: &[u8] = b"\nendobj\n";

/// Frame the output of `body` as indirect object `number` `generation`.
pub(crate) fn write_indirect(
    number: u32,
    generation: u32,
    writer: &mut dyn Writer,
    body: impl FnOnce(&mut dyn Writer) -> io::Result<()>,
) -> io::Result<()> {
    writer.write(number.to_string().as_bytes())?;
    writer.write(b" ")?;
    writer.write(generation.to_string().as_bytes())?;
    writer.write(b" ")?;
    writer.write(START_OBJ)?;
    body(writer)?;
    writer.write(END_OBJ)
}

impl Encoder<IndirectObject> for SimpleEncoder {
    fn write_to(o: &IndirectObject, writer: &mut dyn Writer) -> io::Result<()> {
        write_indirect(o.number, o.generation, writer, |writer| Self::write_to(&*o.object, writer))
    }
}

impl Encoder<Reference> for SimpleEncoder {
    fn write_to(r: &Reference, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(r.number.to_string().as_bytes())?;
        writer.write(b" ")?;
        writer.write(r.generation.to_string().as_bytes())?;
        writer.write(b" R")
    }
}

use std::io;

use crate::{
    pdf::Array,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

impl Encoder<Array> for SimpleEncoder {
    fn write_to(array: &Array, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(b"[")?;
        for (i, item) in array.iter().enumerate() {
            if i != 0 {
                writer.write(b" ")?;
            }
            Self::write_to(item, writer)?;
        }
        writer.write(b"]")
    }
}

#[cfg(test)]
mod tests {
    use crate::pdf::{Name, Object};

    use super::*;

    #[test]
    fn empty_array() {
        let array = Array::from(vec![]);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&array, &mut out).unwrap();
        assert_eq!(b"[]", &out[..]);
    }

    #[test]
    fn array_with_numbers() {
        let array = Array::from(vec![Object::Integer(1), Object::Integer(8), Object::Integer(2)]);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&array, &mut out).unwrap();
        assert_eq!(b"[1 8 2]", &out[..]);
    }

    #[test]
    fn array_with_names() {
        let array = Array::from(vec![
            Object::Name(Name::from("ASCII85Decode")),
            Object::Name(Name::from("FlateDecode")),
        ]);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&array, &mut out).unwrap();
        assert_eq!(b"[/ASCII85Decode /FlateDecode]", &out[..]);
    }
}

use std::io;

use crate::{
    pdf::{
        trailer::{K_SIZE, TRAILER},
        xref::{CrossReference, CrossReferenceStream, CrossReferenceTable, ObjectReference, FREE_HEAD_RECORD, RECORD_LEN, W},
        Dictionary, Name, Object, Stream, K_TYPE,
    },
    simple_encode::{
        object::{
            indirect::write_indirect,
            stream::{write_stream, EOL_MARKER},
        },
        SimpleEncoder,
    },
    writer::{Encoder, Writer},
};

const XREF: &[u8] = b"xref\n";
const T_XREF: &[u8] = b"XRef";
const K_W: &[u8] = b"W";

/// Table row of object 0, the head of the free list.
pub(crate) const FREE_HEAD_ROW: &[u8] = b"0000000000 65535 f \n";
/// Table row of an object number without object.
pub(crate) const FREE_ROW: &[u8] = b"0000000000 00000 f \n";
/// Offsets in a table row have exactly ten digits.
const MAX_TABLE_OFFSET: u64 = 9_999_999_999;

impl Encoder<ObjectReference> for SimpleEncoder {
    /// Writes the binary xref stream record.
    fn write_to(reference: &ObjectReference, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(&reference.record())
    }
}

fn write_table_row(reference: &ObjectReference, writer: &mut dyn Writer) -> io::Result<()> {
    match *reference {
        ObjectReference::Free => writer.write(FREE_ROW),
        ObjectReference::Uncompressed { byte_offset } if byte_offset > MAX_TABLE_OFFSET => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("offset {} doesn't fit into a xref table row", byte_offset),
        )),
        ObjectReference::Uncompressed { byte_offset } => {
            writer.write(format!("{:010} 00000 n \n", byte_offset).as_bytes())
        }
        ObjectReference::Compressed { .. } => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "compressed objects can only be located by a xref stream",
        )),
    }
}

impl<'a> Encoder<CrossReferenceTable<'a>> for SimpleEncoder {
    fn write_to(table: &CrossReferenceTable<'a>, writer: &mut dyn Writer) -> io::Result<()> {
        log::trace!("write XRef table");

        let size = table.references.len() + 1;
        writer.write(XREF)?;
        writer.write(format!("0 {}\n", size).as_bytes())?;
        writer.write(FREE_HEAD_ROW)?;
        for reference in table.references.iter() {
            write_table_row(reference, writer)?;
        }

        log::trace!("write Trailer");
        let mut trailer_dict = table.trailer.dictionary().clone();
        trailer_dict.insert(Name::from(K_SIZE), Object::Integer(size as i64));
        writer.write(TRAILER)?;
        writer.write(b"\n")?;
        Self::write_to(&trailer_dict, writer)?;
        writer.write(b"\n")
    }
}

/// `/Length` of a xref stream with `len` bytes of filtered data. Unlike other
/// streams it counts the end-of-line marker in front of `endstream`.
pub(crate) fn xref_stream_length(len: usize) -> usize {
    len + EOL_MARKER.len()
}

/// Binary body of a xref stream: the free list head, every reference and the
/// entry of the stream object itself.
pub(crate) fn xref_stream_data(references: &[ObjectReference], startxref: u64) -> Vec<u8> {
    let mut data = Vec::<u8>::with_capacity((references.len() + 2) * RECORD_LEN);
    data.extend_from_slice(&FREE_HEAD_RECORD);
    for reference in references {
        data.extend_from_slice(&reference.record());
    }
    data.extend_from_slice(&ObjectReference::Uncompressed { byte_offset: startxref }.record());
    data
}

impl<'a> Encoder<CrossReferenceStream<'a>> for SimpleEncoder {
    fn write_to(xref: &CrossReferenceStream<'a>, writer: &mut dyn Writer) -> io::Result<()> {
        log::trace!("write XRef stream");

        let data = xref_stream_data(&xref.references, xref.startxref);
        log::debug!(
            "xref stream object {} with {} records",
            xref.object_number,
            data.len() / RECORD_LEN
        );

        let mut dictionary: Dictionary = xref.trailer.dictionary().clone();
        dictionary.insert(Name::from(K_TYPE), Object::Name(Name::from(T_XREF)));
        dictionary.insert(Name::from(K_SIZE), Object::Integer(xref.size() as i64));
        dictionary.insert(
            Name::from(K_W),
            Object::from(W.iter().map(|&w| Object::Integer(w as i64)).collect::<Vec<_>>()),
        );

        let stream = Stream::filtered(dictionary, data, &xref.filters)?;
        write_indirect(xref.object_number, 0, writer, |writer| {
            write_stream(&stream, xref_stream_length(stream.data.len()), writer)
        })
    }
}

impl<'a> Encoder<CrossReference<'a>> for SimpleEncoder {
    fn write_to(xref: &CrossReference<'a>, writer: &mut dyn Writer) -> io::Result<()> {
        match xref {
            CrossReference::Table(table) => Self::write_to(table, writer),
            CrossReference::Stream(stream) => Self::write_to(stream, writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        parse,
        pdf::{CompressedObjectReference, FilterList, Reference, TrailerDictionary},
    };

    fn trailer() -> TrailerDictionary {
        let mut trailer = TrailerDictionary::new();
        trailer
            .set_root(Reference::new(1, 0))
            .set_info(Reference::new(2, 0))
            .set_file_id(
                [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef],
                [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef],
            );
        trailer
    }

    /// Length of a table row including the two byte end-of-line.
    const ROW_LEN: usize = 20;

    const TRAILER_ENTRIES: &str = "  /Root 1 0 R\n  /Info 2 0 R\n  /ID [<0123456789ABCDEF> <0123456789ABCDEF>]\n";

    fn assert_bytes(expected: &[u8], out: &[u8]) {
        assert_eq!(
            expected,
            out,
            "expected: {} got: {}",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(out)
        );
    }

    fn table_output(offsets: Vec<Option<u64>>) -> io::Result<Vec<u8>> {
        let trailer = trailer();
        let mut out = Vec::new();
        CrossReference::from(CrossReferenceTable::new(&trailer, 0, offsets)).output(&mut out)?;
        Ok(out)
    }

    /// Split the data of a xref stream object written without filters.
    fn stream_object_parts(out: &[u8]) -> (&[u8], &[u8]) {
        let start = out
            .windows(8)
            .position(|w| w == b"\nstream\n")
            .expect("stream keyword")
            + 8;
        let end = out.len() - b"\nendstream\nendobj\n".len();
        (&out[..start], &out[start..end])
    }

    #[test]
    fn empty_table() {
        let out = table_output(vec![]).unwrap();
        let expected = format!(
            "xref\n0 1\n0000000000 65535 f \ntrailer\n<<\n{}  /Size 1\n>>\n",
            TRAILER_ENTRIES
        );
        assert_bytes(expected.as_bytes(), &out);
    }

    #[test]
    fn table_with_five_objects() {
        let out = table_output((0..5).map(Some).collect()).unwrap();
        let expected = format!(
            "xref\n0 6\n0000000000 65535 f \n\
             0000000000 00000 n \n\
             0000000001 00000 n \n\
             0000000002 00000 n \n\
             0000000003 00000 n \n\
             0000000004 00000 n \n\
             trailer\n<<\n{}  /Size 6\n>>\n",
            TRAILER_ENTRIES
        );
        assert_bytes(expected.as_bytes(), &out);
    }

    #[test]
    fn table_with_free_objects() {
        let out = table_output(vec![Some(15), None, Some(80)]).unwrap();
        assert!(out.starts_with(
            b"xref\n0 4\n0000000000 65535 f \n0000000015 00000 n \n0000000000 00000 f \n0000000080 00000 n \n"
        ));
    }

    #[test]
    fn table_big_offsets() {
        let out = table_output(vec![Some(0x7fff_ffff), Some(0xff)]).unwrap();
        assert!(out.starts_with(b"xref\n0 3\n0000000000 65535 f \n2147483647 00000 n \n0000000255 00000 n \n"));
    }

    #[test]
    fn table_offset_too_big() {
        let err = table_output(vec![Some(10_000_000_000)]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let out = table_output(vec![Some(MAX_TABLE_OFFSET)]).unwrap();
        assert!(out.starts_with(b"xref\n0 2\n0000000000 65535 f \n9999999999 00000 n \n"));
    }

    #[test]
    fn table_with_encryption_and_previous() {
        let mut trailer = trailer();
        trailer.set_encryption(Reference::new(5, 0)).set_previous(1234);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&CrossReferenceTable::new(&trailer, 0, vec![Some(9)]), &mut out).unwrap();
        let expected = "xref\n0 2\n0000000000 65535 f \n0000000009 00000 n \n\
             trailer\n<<\n  /Root 1 0 R\n  /Info 2 0 R\n  /Encrypt 5 0 R\n\
             \x20 /ID [<0123456789ABCDEF> <0123456789ABCDEF>]\n  /Prev 1234\n  /Size 2\n>>\n";
        assert_bytes(expected.as_bytes(), &out);
    }

    fn trailer_set_in_reverse() -> TrailerDictionary {
        let mut trailer = TrailerDictionary::new();
        trailer
            .set_file_id([0x01], [0x02])
            .set_info(Reference::new(2, 0))
            .set_root(Reference::new(1, 0));
        trailer
    }

    #[test]
    fn table_trailer_order_is_fixed() {
        let trailer = trailer_set_in_reverse();
        let mut out = Vec::new();
        SimpleEncoder::write_to(&CrossReferenceTable::new(&trailer, 0, vec![]), &mut out).unwrap();
        assert_bytes(
            b"xref\n0 1\n0000000000 65535 f \ntrailer\n<<\n  /Root 1 0 R\n  /Info 2 0 R\n  /ID [<01> <02>]\n  /Size 1\n>>\n",
            &out,
        );
    }

    #[test]
    fn stream_dictionary_order_is_fixed() {
        let trailer = trailer_set_in_reverse();
        let xref = CrossReferenceStream::new(&trailer, 1, 9, vec![], vec![]).with_filters(FilterList::none());
        let mut out = Vec::new();
        SimpleEncoder::write_to(&xref, &mut out).unwrap();
        let (head, _) = stream_object_parts(&out);
        assert_bytes(
            b"1 0 obj\n<<\n  /Root 1 0 R\n  /Info 2 0 R\n  /ID [<01> <02>]\n  /Type /XRef\n  /Size 2\n  /W [1 8 2]\n  /Length 23\n>>\nstream\n",
            head,
        );
    }

    #[test]
    fn table_doesnt_alter_trailer() {
        let trailer = trailer();
        let before = trailer.clone();
        let mut out = Vec::new();
        SimpleEncoder::write_to(&CrossReferenceTable::new(&trailer, 0, vec![Some(9)]), &mut out).unwrap();
        assert_eq!(trailer, before);
    }

    #[test]
    fn stream_with_one_compressed_object() {
        let trailer = trailer();
        let startxref = 100;
        let xref = CrossReferenceStream::new(
            &trailer,
            3,
            startxref,
            vec![Some(0), None],
            vec![CompressedObjectReference::new(2, 1, 0)],
        )
        .with_filters(FilterList::none());

        let mut out = Vec::new();
        CrossReference::from(xref).output(&mut out).unwrap();
        let (head, data) = stream_object_parts(&out);

        let expected_head = format!(
            "3 0 obj\n<<\n{}  /Type /XRef\n  /Size 4\n  /W [1 8 2]\n  /Length {}\n>>\nstream\n",
            TRAILER_ENTRIES,
            4 * RECORD_LEN + 1
        );
        assert_bytes(expected_head.as_bytes(), head);

        let mut expected = Vec::new();
        expected.extend_from_slice(&FREE_HEAD_RECORD);
        expected.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0]);
        expected.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 100, 0, 0]);
        assert_eq!(data, &expected[..]);
        assert!(out.ends_with(b"\nendstream\nendobj\n"));
    }

    #[test]
    fn stream_absent_objects_are_zero_records() {
        let trailer = trailer();
        let xref = CrossReferenceStream::new(&trailer, 3, 64, vec![None, Some(30)], vec![])
            .with_filters(FilterList::none());
        let mut out = Vec::new();
        SimpleEncoder::write_to(&xref, &mut out).unwrap();
        let (_, data) = stream_object_parts(&out);
        assert_eq!(&data[RECORD_LEN..2 * RECORD_LEN], &[0; RECORD_LEN]);
    }

    #[test]
    fn stream_is_flate_compressed_by_default() {
        let trailer = trailer();
        let offsets: Vec<Option<u64>> = (0..50).map(|i| Some(15 + i * 40)).collect();
        let xref = CrossReferenceStream::new(&trailer, 51, 2015, offsets, vec![]);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&xref, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("  /Filter /FlateDecode\n"), "{}", text);
        assert!(text.contains("  /Size 52\n"), "{}", text);

        let raw = xref_stream_data(xref.references(), 2015);
        let (_, data) = stream_object_parts(&out);
        let decoded = FilterList::default().decode(data.to_vec()).unwrap();
        assert_eq!(decoded, raw);

        let records = parse::xref_stream_records(&decoded, W).unwrap();
        assert_eq!(records.len(), 52);
        assert_eq!(records[0], ObjectReference::Free);
        assert_eq!(records[1], ObjectReference::Uncompressed { byte_offset: 15 });
        assert_eq!(records[51], ObjectReference::Uncompressed { byte_offset: 2015 });
    }

    proptest! {
        #[test]
        fn table_shape(offsets in proptest::collection::vec(proptest::option::of(0u64..=MAX_TABLE_OFFSET), 0..64)) {
            let out = table_output(offsets.clone()).unwrap();
            let header = format!("xref\n0 {}\n", offsets.len() + 1);
            prop_assert!(out.starts_with(header.as_bytes()));

            let rows = &out[header.len()..];
            prop_assert_eq!(&rows[..ROW_LEN], FREE_HEAD_ROW);
            for (i, offset) in offsets.iter().enumerate() {
                let row = &rows[(i + 1) * ROW_LEN..(i + 2) * ROW_LEN];
                let expected = match offset {
                    Some(offset) => format!("{:010} 00000 n \n", offset).into_bytes(),
                    None => FREE_ROW.to_vec(),
                };
                prop_assert_eq!(row, &expected[..]);
            }
            prop_assert!(rows[(offsets.len() + 1) * ROW_LEN..].starts_with(b"trailer\n<<\n"));

            let parsed = match parse::xref_table(parse::span(&out)) {
                Ok((_, parsed)) => parsed,
                Err(_) => panic!("written table can't be parsed"),
            };
            prop_assert_eq!(parsed.len(), offsets.len() + 1);
            for (row, offset) in parsed[1..].iter().zip(&offsets) {
                prop_assert_eq!(row.free, offset.is_none());
                prop_assert_eq!(row.offset, offset.unwrap_or(0));
            }
        }

        #[test]
        fn stream_size_invariant(
            offsets in proptest::collection::vec(proptest::option::of(any::<u64>()), 0..64),
            startxref in any::<u64>(),
        ) {
            let trailer = trailer();
            let object_number = offsets.len() as u32 + 1;
            let xref = CrossReferenceStream::new(&trailer, object_number, startxref, offsets.clone(), vec![])
                .with_filters(FilterList::none());
            let mut out = Vec::new();
            SimpleEncoder::write_to(&xref, &mut out).unwrap();
            let (head, data) = stream_object_parts(&out);

            let records = offsets.len() + 2;
            prop_assert_eq!(data.len(), records * RECORD_LEN);
            let head = String::from_utf8_lossy(head);
            let expected_size = format!("  /Size {}\n", records);
            let expected_length = format!("  /Length {}\n", xref_stream_length(records * RECORD_LEN));
            prop_assert!(head.contains(&expected_size));
            prop_assert!(head.contains(&expected_length));

            let parsed = parse::xref_stream_records(data, W).unwrap();
            prop_assert_eq!(parsed[records - 1], ObjectReference::Uncompressed { byte_offset: startxref });
            for (offset, reference) in offsets.iter().zip(&parsed[1..]) {
                prop_assert_eq!(ObjectReference::from(*offset), *reference);
            }
        }
    }
}

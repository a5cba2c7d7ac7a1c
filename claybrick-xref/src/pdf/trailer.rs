use super::{Bytes, Dictionary, Name, Object, Reference};

pub const TRAILER: &[u8] = b"trailer";
pub const K_SIZE: &[u8] = b"Size";
pub const K_PREVIOUS: &[u8] = b"Prev";
pub const K_ENCRYPT: &[u8] = b"Encrypt";
pub const K_ROOT: &[u8] = b"Root";
pub const K_INFO: &[u8] = b"Info";
pub const K_ID: &[u8] = b"ID";

/// Order of the entries in a written trailer.
const ENTRY_ORDER: [&[u8]; 5] = [K_ROOT, K_INFO, K_ENCRYPT, K_ID, K_PREVIOUS];

fn entry_rank(key: &[u8]) -> usize {
    ENTRY_ORDER.iter().position(|&k| k == key).unwrap_or(ENTRY_ORDER.len())
}

/// Document wide entries shared by the trailer of a cross-reference table and
/// the dictionary of a cross-reference stream.
///
/// Entries are kept in a fixed order (`/Root`, `/Info`, `/Encrypt`, `/ID`,
/// `/Prev`) no matter in which order they were set. Setting an entry again
/// replaces the value. Nothing is validated here: a trailer without `/Root` is
/// written as it is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrailerDictionary {
    dictionary: Dictionary,
}

impl TrailerDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference to the document catalog.
    pub fn set_root(&mut self, root: Reference) -> &mut Self {
        self.put(K_ROOT, Object::Reference(root))
    }

    /// Reference to the document information dictionary.
    pub fn set_info(&mut self, info: Reference) -> &mut Self {
        self.put(K_INFO, Object::Reference(info))
    }

    /// Reference to the encryption dictionary.
    pub fn set_encryption(&mut self, encryption: Reference) -> &mut Self {
        self.put(K_ENCRYPT, Object::Reference(encryption))
    }

    /// The file identifier pair.
    ///
    /// Both identifiers are kept as hex strings. They are written as hex
    /// literals even if the document is encrypted, readers need the ID before
    /// they can decrypt anything.
    pub fn set_file_id(&mut self, original: impl Into<Bytes>, updated: impl Into<Bytes>) -> &mut Self {
        self.put(
            K_ID,
            Object::from(vec![
                Object::HexString(original.into()),
                Object::HexString(updated.into()),
            ]),
        )
    }

    /// Byte offset of the previous cross-reference section of an incrementally
    /// updated file.
    pub fn set_previous(&mut self, startxref: u64) -> &mut Self {
        // offsets beyond i64 can't be written as PDF integers anyway
        self.put(K_PREVIOUS, Object::Integer(startxref as i64))
    }

    fn put(&mut self, key: &[u8], value: Object) -> &mut Self {
        self.dictionary.insert(Name::from(key), value);
        self.dictionary.sort_by(|a, _, b, _| entry_rank(a).cmp(&entry_rank(b)));
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn root(&self) -> Option<&Reference> {
        self.dictionary.get(K_ROOT).and_then(Object::reference)
    }

    pub fn info(&self) -> Option<&Reference> {
        self.dictionary.get(K_INFO).and_then(Object::reference)
    }

    pub fn encryption(&self) -> Option<&Reference> {
        self.dictionary.get(K_ENCRYPT).and_then(Object::reference)
    }

    pub fn file_id(&self) -> Option<[&Bytes; 2]> {
        let id = self.dictionary.get(K_ID).and_then(Object::array)?;
        match &id[..] {
            [original, updated] => Some([original.hex_string()?, updated.hex_string()?]),
            _ => None,
        }
    }

    pub fn previous(&self) -> Option<u64> {
        self.dictionary
            .get(K_PREVIOUS)
            .and_then(Object::integer)
            .and_then(|prev| prev.try_into().ok())
    }
}

use super::Object;

/// An object together with the number and generation it is addressed by.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    pub(crate) number: u32,
    pub(crate) generation: u32,
    pub(crate) object: Box<Object>,
}

impl IndirectObject {
    pub fn new(number: u32, generation: u32, object: Object) -> Self {
        Self {
            number,
            generation,
            object: Box::new(object),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn object(&self) -> &Object {
        &self.object
    }
}

/// `N G R`, points to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    pub(crate) number: u32,
    pub(crate) generation: u32,
}

impl Reference {
    pub const fn new(number: u32, generation: u32) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl From<u32> for Reference {
    /// Reference to generation 0 of the given object number.
    fn from(number: u32) -> Self {
        Self::new(number, 0)
    }
}

use std::io;

/// Byte sink the encoders write into.
///
/// The sink keeps track of the number of bytes written so far. Writers of PDF
/// sections use this to record the byte offset of each indirect object and the
/// start of the cross-reference section.
pub trait Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Number of bytes written into this sink.
    fn position(&self) -> usize;
}

impl Writer for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn position(&self) -> usize {
        self.len()
    }
}

/// Wraps any [`io::Write`] and counts the bytes that went through it.
#[derive(Debug)]
pub struct PositionWriter<W> {
    inner: W,
    position: usize,
}

impl<W: io::Write> PositionWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Continue counting from `position`, e.g. when appending an update to an
    /// existing file.
    pub fn starting_at(inner: W, position: usize) -> Self {
        Self { inner, position }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Writer for PositionWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.position += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.position
    }
}

pub trait Encoder<T: ?Sized> {
    fn write_to(obj: &T, writer: &mut dyn Writer) -> io::Result<()>;
}

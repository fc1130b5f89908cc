use std::io::{self, Write};

/// Destination for produced bytes.
///
/// `Buffer` is the internally owned growable buffer whose content is handed
/// back at finalization. `Stream` forwards every byte to a caller-supplied
/// writer; the caller keeps ownership of whatever backs it and the engine
/// never closes it.
#[derive(Debug)]
pub enum Sink<W: Write> {
    Buffer(Vec<u8>),
    Stream(W),
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Buffer(vec) => vec.write(buf),
            Sink::Stream(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Buffer(_) => Ok(()),
            Sink::Stream(writer) => writer.flush(),
        }
    }
}

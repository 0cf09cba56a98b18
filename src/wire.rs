//! Length-prefixed vector serialisation shared by the binary record formats.
//!
//! A vector is written as a `u32` element count followed by the elements.
//! Strings are a `u32` byte length followed by UTF-8 bytes; floats are 4-byte
//! IEEE-754 values. Everything is written in host byte order, so readers pass
//! `reverse_bytes` when the data came from a machine of the opposite
//! endianness.

use std::io::{self, Read, Write};

/// A value that can appear as an element of a serialised vector.
pub trait WireValue: Sized {
    /// Write the value in host byte order.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `writer`.
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()>;

    /// Read a value, swapping byte order first when `reverse_bytes` is set.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `reader`, including unexpected end of input.
    fn read_from<R: Read + ?Sized>(reader: &mut R, reverse_bytes: bool) -> io::Result<Self>;
}

fn write_len<W: Write + ?Sized>(writer: &mut W, len: usize) -> io::Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "vector too long"))?;
    writer.write_all(&len.to_ne_bytes())
}

fn read_u32<R: Read + ?Sized>(reader: &mut R, reverse_bytes: bool) -> io::Result<u32> {
    let mut bytes = [0_u8; 4];
    reader.read_exact(&mut bytes)?;
    let value = u32::from_ne_bytes(bytes);
    Ok(if reverse_bytes { value.swap_bytes() } else { value })
}

impl WireValue for f32 {
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_ne_bytes())
    }

    fn read_from<R: Read + ?Sized>(reader: &mut R, reverse_bytes: bool) -> io::Result<Self> {
        read_u32(reader, reverse_bytes).map(f32::from_bits)
    }
}

impl WireValue for String {
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write_len(writer, self.len())?;
        writer.write_all(self.as_bytes())
    }

    fn read_from<R: Read + ?Sized>(reader: &mut R, reverse_bytes: bool) -> io::Result<Self> {
        let len = read_u32(reader, reverse_bytes)?;
        let mut bytes = Vec::new();
        reader.take(u64::from(len)).read_to_end(&mut bytes)?;
        if bytes.len() != len as usize {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "string shorter than its length prefix",
            ));
        }
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Write `items` as a length-prefixed vector.
///
/// # Errors
///
/// Returns an error if the vector has more than `u32::MAX` elements or the
/// writer fails.
pub fn write_vector<W, T>(writer: &mut W, items: &[T]) -> io::Result<()>
where
    W: Write + ?Sized,
    T: WireValue,
{
    write_len(writer, items.len())?;
    items.iter().try_for_each(|item| item.write_to(writer))
}

/// Read a length-prefixed vector written by [`write_vector`].
///
/// # Errors
///
/// Returns an error if the input ends early or an element is malformed.
pub fn read_vector<R, T>(reader: &mut R, reverse_bytes: bool) -> io::Result<Vec<T>>
where
    R: Read + ?Sized,
    T: WireValue,
{
    let len = read_u32(reader, reverse_bytes)?;
    // Cap the preallocation; a corrupt prefix must not trigger a huge allocation.
    let mut items = Vec::with_capacity((len as usize).min(1024));
    for _ in 0..len {
        items.push(T::read_from(reader, reverse_bytes)?);
    }
    Ok(items)
}

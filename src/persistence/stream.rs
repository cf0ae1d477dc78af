//! Little-endian field streams handed to objects during save/load
//!
//! Objects only ever see these wrappers, never the underlying reader or
//! writer, so every payload uses the same fixed byte order.

use std::io::{self, Read, Write};

use glam::Vec2;

/// Field sink for [`GameObject::write_state`](crate::sim::GameObject::write_state)
pub struct StateWriter<'a> {
    inner: &'a mut dyn Write,
    written: u64,
}

impl<'a> StateWriter<'a> {
    pub fn new(inner: &'a mut dyn Write) -> Self {
        Self { inner, written: 0 }
    }

    /// Total bytes written through this sink
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    fn put(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> io::Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.put(&value.to_le_bytes())
    }

    /// x then y
    pub fn write_vec2(&mut self, value: Vec2) -> io::Result<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)
    }
}

/// Field source for [`GameObject::read_state`](crate::sim::GameObject::read_state)
///
/// Running out of bytes surfaces as [`io::ErrorKind::UnexpectedEof`].
pub struct StateReader<'a> {
    inner: &'a mut dyn Read,
    consumed: u64,
}

impl<'a> StateReader<'a> {
    pub fn new(inner: &'a mut dyn Read) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Total bytes consumed through this source
    pub fn bytes_read(&self) -> u64 {
        self.consumed
    }

    fn take<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        self.consumed += N as u64;
        Ok(buf)
    }

    pub fn read_u64(&mut self) -> io::Result<u64> {
        self.take().map(u64::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> io::Result<i32> {
        self.take().map(i32::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> io::Result<f32> {
        self.take().map(f32::from_le_bytes)
    }

    pub fn read_vec2(&mut self) -> io::Result<Vec2> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        Ok(Vec2::new(x, y))
    }
}

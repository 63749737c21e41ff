use serde::Serialize;
use std::{
    fmt,
    ops::{Add, Sub},
};

/// A host address handed out by a memory pool.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ByteAddr(pub usize);

impl ByteAddr {
    pub fn of(ptr: *const u8) -> Self {
        ByteAddr(ptr as usize)
    }
}

impl fmt::Debug for ByteAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for ByteAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Add<usize> for ByteAddr {
    type Output = ByteAddr;

    fn add(self, rhs: usize) -> ByteAddr {
        ByteAddr(self.0 + rhs)
    }
}

impl Sub for ByteAddr {
    type Output = usize;

    fn sub(self, rhs: ByteAddr) -> usize {
        self.0 - rhs.0
    }
}

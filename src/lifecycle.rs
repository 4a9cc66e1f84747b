//! Open/closed gate around a cursor's result source

use crate::error::{Error, Result};

/// Owns the result source while the cursor is open.
///
/// Closing releases the source; every later access through the gate
/// fails with [`Error::CursorClosed`].
#[derive(Debug)]
pub struct Lifecycle<S> {
    source: Option<S>,
}

impl<S> Lifecycle<S> {
    /// Open the gate over a source
    pub fn open(source: S) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// Check if the gate has been closed
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Borrow the source, or fail if closed
    pub fn source(&self) -> Result<&S> {
        self.source.as_ref().ok_or(Error::CursorClosed)
    }

    /// Mutably borrow the source, or fail if closed
    pub fn source_mut(&mut self) -> Result<&mut S> {
        self.source.as_mut().ok_or(Error::CursorClosed)
    }

    /// Close the gate.
    ///
    /// The first call hands back the released source; later calls return `None`.
    pub fn close(&mut self) -> Option<S> {
        self.source.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_then_close() {
        let mut gate = Lifecycle::open(7u32);
        assert!(!gate.is_closed());
        assert_eq!(*gate.source().unwrap(), 7);

        assert_eq!(gate.close(), Some(7));
        assert!(gate.is_closed());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut gate = Lifecycle::open("rows");
        gate.close();
        assert_eq!(gate.close(), None);
        assert!(gate.is_closed());
    }

    #[test]
    fn test_access_after_close() {
        let mut gate = Lifecycle::open(1u8);
        gate.close();
        assert!(matches!(gate.source(), Err(Error::CursorClosed)));
        assert!(matches!(gate.source_mut(), Err(Error::CursorClosed)));
    }
}

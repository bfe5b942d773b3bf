/// Transaction - scoped host transaction.
///
/// Opened on creation and rolled back on drop unless `commit()` succeeded,
/// so an early `?` return inside a restore never leaves a partial change.

use std::ops::{Deref, DerefMut};
use crate::error::Result;
use super::document::HostDocument;

/// Open host transaction borrowing the document mutably.
pub struct Transaction<'a, H: HostDocument + ?Sized> {
    host: &'a mut H,
    open: bool,
}

impl<'a, H: HostDocument + ?Sized> Transaction<'a, H> {
    /// Begin a named transaction.
    ///
    /// # Errors
    ///
    /// Returns the host's error if the transaction could not be started.
    pub fn start(host: &'a mut H, name: &str) -> Result<Self> {
        host.begin_transaction(name)?;
        Ok(Self { host, open: true })
    }

    /// Commit. A failed commit is rolled back before the error is returned.
    pub fn commit(mut self) -> Result<()> {
        self.open = false;
        if let Err(err) = self.host.commit_transaction() {
            self.host.rollback_transaction();
            return Err(err);
        }
        Ok(())
    }
}

impl<H: HostDocument + ?Sized> Deref for Transaction<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: HostDocument + ?Sized> DerefMut for Transaction<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: HostDocument + ?Sized> Drop for Transaction<'_, H> {
    fn drop(&mut self) {
        if self.open {
            self.host.rollback_transaction();
        }
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;

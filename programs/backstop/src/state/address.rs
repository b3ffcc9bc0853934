use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

/// Opaque 32 byte identity of a depositor, collaborator or custody account
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub fn new(bytes: [u8; 32]) -> Self {
        Address(bytes)
    }

    #[cfg(test)]
    pub fn new_unique() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};

        static UNIQUE_ADDRESS: AtomicU64 = AtomicU64::new(1);

        let n = UNIQUE_ADDRESS.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0_u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        Address(bytes)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // last 8 bytes are enough to tell addresses apart in logs
        write!(f, "Address(..")?;
        for byte in self.0[24..].iter() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

//! An owned bit string of arbitrary length, the general purpose [`Key`].

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use bitvec::prelude::*;

use crate::{Error, Key};

/// A sequence of bits of arbitrary length, not necessarily byte aligned.
///
/// Ordering is lexicographic on the bits, where a prefix sorts before any of its extensions.
///
/// ```
/// # use patricia_bits::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let k: Bits = "0000_0001_1".parse()?;
/// assert_eq!(k.len(), 9);
/// assert_eq!(k, Bits::from_bytes_len(&[1, 0xff], 9));
/// assert!(Bits::from_bytes(&[1]).is_prefix_of(&k));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bits(BitVec<u8, Msb0>);

impl Bits {
    /// The empty bit string.
    pub fn new() -> Self {
        Self(BitVec::new())
    }

    /// All bits of `bytes`, i.e., a key of `8 * bytes.len()` bits.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(BitVec::from_slice(bytes))
    }

    /// The first `len` bits of `bytes`. If `bytes` holds less than `len` bits, the key is padded
    /// with zeros.
    pub fn from_bytes_len(bytes: &[u8], len: usize) -> Self {
        let mut bits = BitVec::from_slice(bytes);
        bits.resize(len, false);
        Self(bits)
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        self.0.push(bit)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this is the empty bit string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the underlying bits.
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        self.0.as_bitslice()
    }
}

impl Key for Bits {
    fn bit_len(&self) -> usize {
        self.0.len()
    }

    fn is_bit_set(&self, pos: usize) -> bool {
        self.0.get(pos).map(|b| *b).unwrap_or(false)
    }

    fn truncate(&self, len: usize) -> Self {
        Self(self.0[..len].to_bitvec())
    }

    fn with_bit(&self, pos: usize, set: bool) -> Self {
        let mut bits = self.0.clone();
        bits.set(pos, set);
        Self(bits)
    }

    fn eq_bits(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn is_prefix_of(&self, other: &Self) -> bool {
        let len = self.0.len();
        len <= other.0.len() && self.0.as_bitslice() == &other.0[..len]
    }
}

impl From<&[u8]> for Bits {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Bits {
    fn from(bytes: [u8; N]) -> Self {
        Self::from_bytes(&bytes)
    }
}

impl From<Vec<u8>> for Bits {
    fn from(bytes: Vec<u8>) -> Self {
        Self(BitVec::from_vec(bytes))
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse a string of `0` and `1` digits. `_` may be used as a separator.
impl FromStr for Bits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| *c != '_')
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(Error::InvalidBit { position, found }),
            })
            .collect()
    }
}

impl Display for Bits {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Debug for Bits {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0b{}/{}", self, self.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        let k: Bits = "1011".parse().unwrap();
        assert_eq!(k.len(), 4);
        assert!(k.is_bit_set(0));
        assert!(!k.is_bit_set(1));
        assert!(k.is_bit_set(3));
        assert!(!k.is_bit_set(4));
        assert_eq!("".parse::<Bits>().unwrap(), Bits::new());
        assert_eq!("0000_0001".parse::<Bits>().unwrap(), Bits::from([1u8]));
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(
            "10_2".parse::<Bits>(),
            Err(Error::InvalidBit {
                position: 2,
                found: '2'
            })
        ));
    }

    #[test]
    fn from_bytes_len() {
        assert_eq!(Bits::from_bytes_len(&[0xff], 3), "111".parse().unwrap());
        assert_eq!(Bits::from_bytes_len(&[0xff], 10), "1111_1111_00".parse().unwrap());
        assert_eq!(Bits::from_bytes_len(&[], 0), Bits::new());
    }

    #[test]
    fn fmt() {
        let k = Bits::from_bytes_len(&[0xa0], 4);
        assert_eq!(format!("{k}"), "1010");
        assert_eq!(format!("{k:?}"), "0b1010/4");
        assert_eq!(format!("{:?}", Bits::new()), "0b/0");
    }

    #[test]
    fn ordering() {
        let a: Bits = "01".parse().unwrap();
        let b: Bits = "010".parse().unwrap();
        let c: Bits = "1".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn truncate_and_flip() {
        let k: Bits = "1101".parse().unwrap();
        assert_eq!(k.truncate(2), "11".parse().unwrap());
        assert_eq!(k.with_bit(3, false), "1100".parse().unwrap());
        assert_eq!(k.sibling(), Some("1100".parse().unwrap()));
        assert_eq!(k.parent(), Some("110".parse().unwrap()));
    }
}

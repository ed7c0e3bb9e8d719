//! Description of the generic type `Key`.

#[cfg(feature = "ipnet")]
use ipnet::{Ipv4Net, Ipv6Net};
#[cfg(feature = "ipnetwork")]
use ipnetwork::{Ipv4Network, Ipv6Network};
use num_traits::{CheckedShr, PrimInt, Unsigned, Zero};

/// Trait for keys stored in a [`crate::RadixTree`]: finite sequences of bits.
///
/// Bits are counted from the left, i.e., position 0 is the most significant bit of the first
/// byte. Every position at or beyond [`Key::bit_len`] reads as a zero bit (virtual-zero
/// extension), which is what allows keys of different length to share one tree.
pub trait Key: Sized + Clone {
    /// Number of bits in the key.
    fn bit_len(&self) -> usize;

    /// Check if a specific bit is set. Must return `false` for any `pos >= self.bit_len()`.
    fn is_bit_set(&self, pos: usize) -> bool;

    /// The first `len` bits of the key. `len` never exceeds `self.bit_len()`.
    fn truncate(&self, len: usize) -> Self;

    /// The key with the bit at `pos` set or cleared. `pos` is always below `self.bit_len()`.
    fn with_bit(&self, pos: usize, set: bool) -> Self;

    /// Exact equality: same length, identical bits.
    fn eq_bits(&self, other: &Self) -> bool {
        self.bit_len() == other.bit_len() && self.is_prefix_of(other)
    }

    /// Check if `self` is a prefix of `other`. This function also returns `true` if both keys are
    /// identical.
    fn is_prefix_of(&self, other: &Self) -> bool {
        let len = self.bit_len();
        len <= other.bit_len() && (0..len).all(|i| self.is_bit_set(i) == other.is_bit_set(i))
    }

    /// First bit position at which the two keys differ, using virtual-zero extension on both
    /// sides. If they agree up to the length of the longer key, the last valid position of the
    /// longer key is returned (0 if both are empty).
    fn first_diff_bit(&self, other: &Self) -> usize {
        let end = self.bit_len().max(other.bit_len());
        (0..end)
            .find(|&i| self.is_bit_set(i) != other.is_bit_set(i))
            .unwrap_or_else(|| end.saturating_sub(1))
    }

    /// The key without its last bit, or `None` for the empty key.
    fn parent(&self) -> Option<Self> {
        self.bit_len().checked_sub(1).map(|len| self.truncate(len))
    }

    /// The key with its last bit flipped, or `None` for the empty key.
    fn sibling(&self) -> Option<Self> {
        self.bit_len()
            .checked_sub(1)
            .map(|last| self.with_bit(last, !self.is_bit_set(last)))
    }
}

pub(crate) fn mask_from_prefix_len<R>(len: usize) -> R
where
    R: PrimInt + Zero,
{
    if len as u32 >= R::zero().count_zeros() {
        !R::zero()
    } else if len == 0 {
        R::zero()
    } else {
        !((!R::zero()) >> len)
    }
}

#[inline(always)]
fn width<R: PrimInt + Zero>() -> usize {
    R::zero().count_zeros() as usize
}

#[inline(always)]
fn single_bit<R: PrimInt>(pos: usize) -> R {
    R::one() << (width::<R>() - 1 - pos)
}

/// Integers with an explicit length, e.g., `(0xc0a80000u32, 16)`. Bits of the representation
/// beyond the length are ignored. A length beyond the width of the integer is clamped to the
/// width, so `(x, 200u8)` and `(x, 128u8)` are the same `u128` key.
impl<R> Key for (R, u8)
where
    R: Unsigned + PrimInt + Zero + CheckedShr,
{
    fn bit_len(&self) -> usize {
        (self.1 as usize).min(width::<R>())
    }

    fn is_bit_set(&self, pos: usize) -> bool {
        pos < self.bit_len() && self.0 & single_bit::<R>(pos) != R::zero()
    }

    fn truncate(&self, len: usize) -> Self {
        (self.0 & mask_from_prefix_len(len), len as u8)
    }

    fn with_bit(&self, pos: usize, set: bool) -> Self {
        let bit = single_bit::<R>(pos);
        let repr = if set { self.0 | bit } else { self.0 & !bit };
        (repr, self.bit_len() as u8)
    }

    fn eq_bits(&self, other: &Self) -> bool {
        let len = self.bit_len();
        len == other.bit_len()
            && self.0 & mask_from_prefix_len(len) == other.0 & mask_from_prefix_len(len)
    }

    fn is_prefix_of(&self, other: &Self) -> bool {
        let len = self.bit_len();
        len <= other.bit_len()
            && self.0 & mask_from_prefix_len(len) == other.0 & mask_from_prefix_len(len)
    }

    fn first_diff_bit(&self, other: &Self) -> usize {
        let a = self.0 & mask_from_prefix_len(self.bit_len());
        let b = other.0 & mask_from_prefix_len(other.bit_len());
        let end = self.bit_len().max(other.bit_len());
        let diff = a ^ b;
        if diff == R::zero() {
            end.saturating_sub(1)
        } else {
            diff.leading_zeros() as usize
        }
    }
}

#[cfg(feature = "ipnet")]
impl Key for Ipv4Net {
    fn bit_len(&self) -> usize {
        self.prefix_len() as usize
    }

    fn is_bit_set(&self, pos: usize) -> bool {
        (u32::from(self.network()), self.prefix_len()).is_bit_set(pos)
    }

    fn truncate(&self, len: usize) -> Self {
        let (repr, len) = (u32::from(self.network()), self.prefix_len()).truncate(len);
        Ipv4Net::new(repr.into(), len).expect("truncated length never exceeds 32")
    }

    fn with_bit(&self, pos: usize, set: bool) -> Self {
        let (repr, len) = (u32::from(self.network()), self.prefix_len()).with_bit(pos, set);
        Ipv4Net::new(repr.into(), len).expect("length is unchanged")
    }

    fn eq_bits(&self, other: &Self) -> bool {
        self.network() == other.network() && self.prefix_len() == other.prefix_len()
    }

    fn is_prefix_of(&self, other: &Self) -> bool {
        self.contains(other)
    }
}

#[cfg(feature = "ipnet")]
impl Key for Ipv6Net {
    fn bit_len(&self) -> usize {
        self.prefix_len() as usize
    }

    fn is_bit_set(&self, pos: usize) -> bool {
        (u128::from(self.network()), self.prefix_len()).is_bit_set(pos)
    }

    fn truncate(&self, len: usize) -> Self {
        let (repr, len) = (u128::from(self.network()), self.prefix_len()).truncate(len);
        Ipv6Net::new(repr.into(), len).expect("truncated length never exceeds 128")
    }

    fn with_bit(&self, pos: usize, set: bool) -> Self {
        let (repr, len) = (u128::from(self.network()), self.prefix_len()).with_bit(pos, set);
        Ipv6Net::new(repr.into(), len).expect("length is unchanged")
    }

    fn eq_bits(&self, other: &Self) -> bool {
        self.network() == other.network() && self.prefix_len() == other.prefix_len()
    }

    fn is_prefix_of(&self, other: &Self) -> bool {
        self.contains(other)
    }
}

#[cfg(feature = "ipnetwork")]
impl Key for Ipv4Network {
    fn bit_len(&self) -> usize {
        self.prefix() as usize
    }

    fn is_bit_set(&self, pos: usize) -> bool {
        (u32::from(self.network()), self.prefix()).is_bit_set(pos)
    }

    fn truncate(&self, len: usize) -> Self {
        let (repr, len) = (u32::from(self.network()), self.prefix()).truncate(len);
        Ipv4Network::new(repr.into(), len).expect("truncated length never exceeds 32")
    }

    fn with_bit(&self, pos: usize, set: bool) -> Self {
        let (repr, len) = (u32::from(self.network()), self.prefix()).with_bit(pos, set);
        Ipv4Network::new(repr.into(), len).expect("length is unchanged")
    }
}

#[cfg(feature = "ipnetwork")]
impl Key for Ipv6Network {
    fn bit_len(&self) -> usize {
        self.prefix() as usize
    }

    fn is_bit_set(&self, pos: usize) -> bool {
        (u128::from(self.network()), self.prefix()).is_bit_set(pos)
    }

    fn truncate(&self, len: usize) -> Self {
        let (repr, len) = (u128::from(self.network()), self.prefix()).truncate(len);
        Ipv6Network::new(repr.into(), len).expect("truncated length never exceeds 128")
    }

    fn with_bit(&self, pos: usize, set: bool) -> Self {
        let (repr, len) = (u128::from(self.network()), self.prefix()).with_bit(pos, set);
        Ipv6Network::new(repr.into(), len).expect("length is unchanged")
    }
}

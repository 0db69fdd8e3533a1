//! Fixed-capacity bit-packed vector with sub-word field access.

use crate::errors::{Result, SieveError};

mod sealed {
    pub trait Sealed {}
}

/// Backing storage unit for [`BitVec`]. Implemented for the unsigned
/// integer widths; narrow blocks (e.g. `u8`) exercise the straddling
/// field paths, `u64` is the default.
pub trait Block: Copy + Eq + sealed::Sealed + 'static {
    const BITS: usize;
    const ZERO: Self;

    /// Truncates a word to the block width.
    fn from_word(word: u64) -> Self;
    fn to_word(self) -> u64;
}

macro_rules! impl_block {
    ($($ty:ty),*) => {$(
        impl sealed::Sealed for $ty {}
        impl Block for $ty {
            const BITS: usize = <$ty>::BITS as usize;
            const ZERO: Self = 0;

            #[inline]
            fn from_word(word: u64) -> Self {
                word as $ty
            }

            #[inline]
            fn to_word(self) -> u64 {
                self as u64
            }
        }
    )*};
}

impl_block!(u8, u16, u32, u64);

/// Width of the word type used by the field accessors.
const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-size run of bits packed into `B`-width blocks.
///
/// Bit `i` lives in block `i / B::BITS` at offset `i % B::BITS`, and fields
/// grow least-significant-bit-first: bit `index` of the vector becomes bit 0
/// of the value returned by [`get_field`](Self::get_field).
///
/// The single-bit and field accessors do not bounds-check in release builds;
/// an in-range index is a caller obligation (`debug_assert!`ed). Use
/// [`try_get`](Self::try_get) / [`try_set`](Self::try_set) where a checked
/// path is worth the branch.
#[derive(Debug, Clone)]
pub struct BitVec<B: Block = u64> {
    bits: usize,
    blocks: Vec<B>,
}

impl<B: Block> BitVec<B> {
    /// Allocates `bits` addressable bits, all zero.
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            blocks: vec![B::ZERO; bits.div_ceil(B::BITS)],
        }
    }

    /// Capacity in bits, fixed at construction.
    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    fn split(bit: usize) -> (usize, usize) {
        (bit / B::BITS, bit % B::BITS)
    }

    /// All ones across one block width, as a word.
    #[inline]
    fn ones() -> u64 {
        u64::MAX >> (WORD_BITS - B::BITS)
    }

    #[inline]
    pub fn get(&self, bit: usize) -> bool {
        debug_assert!(bit < self.bits, "bit {bit} out of range");
        let (blk, off) = Self::split(bit);
        self.blocks[blk].to_word() & (1u64 << off) != 0
    }

    #[inline]
    pub fn set(&mut self, bit: usize, value: bool) {
        debug_assert!(bit < self.bits, "bit {bit} out of range");
        let (blk, off) = Self::split(bit);
        let mask = 1u64 << off;
        let word = self.blocks[blk].to_word();
        self.blocks[blk] = B::from_word(if value { word | mask } else { word & !mask });
    }

    /// Checked [`get`](Self::get).
    pub fn try_get(&self, bit: usize) -> Result<bool> {
        self.check(bit)?;
        Ok(self.get(bit))
    }

    /// Checked [`set`](Self::set).
    pub fn try_set(&mut self, bit: usize, value: bool) -> Result<()> {
        self.check(bit)?;
        self.set(bit, value);
        Ok(())
    }

    fn check(&self, bit: usize) -> Result<()> {
        if bit < self.bits {
            Ok(())
        } else {
            Err(SieveError::BitOutOfRange {
                index: bit,
                capacity: self.bits,
            })
        }
    }

    /// Reads `len` consecutive bits starting at `bit`, LSB-first.
    ///
    /// `len` is silently clamped to 64 (the word width); callers asking for
    /// more get only the low 64 bits of the range. That clamp is a
    /// compatibility hazard, not robustness: size fields to the word width.
    pub fn get_field(&self, bit: usize, len: usize) -> u64 {
        let len = len.min(WORD_BITS);
        debug_assert!(len > 0, "zero-length field");
        debug_assert!(bit + len <= self.bits, "field [{bit}, {bit}+{len}) out of range");

        let ones = Self::ones();
        let (lo_blk, lo_bit) = Self::split(bit);
        let (hi_blk, hi_bit) = Self::split(bit + len - 1);

        // Field inside one block: mask and shift down.
        if lo_blk == hi_blk {
            let mask = (ones >> (B::BITS - 1 - hi_bit)) & (ones << lo_bit);
            return (self.blocks[lo_blk].to_word() & mask) >> lo_bit;
        }

        // Straddling: high bits of the low block first.
        let mut value = (self.blocks[lo_blk].to_word() & (ones << lo_bit)) >> lo_bit;

        // Offset in the value of the next bit to place.
        let mut pos = B::BITS - lo_bit;

        for blk in lo_blk + 1..hi_blk {
            value |= self.blocks[blk].to_word() << pos;
            pos += B::BITS;
        }

        // Low bits of the high block last.
        value | ((self.blocks[hi_blk].to_word() & (ones >> (B::BITS - 1 - hi_bit))) << pos)
    }

    /// Writes the low `len` bits of `value` starting at `bit`, LSB-first.
    ///
    /// Same clamp as [`get_field`](Self::get_field). Bits of the partial
    /// first and last blocks outside the field keep their values; middle
    /// blocks are overwritten whole.
    pub fn set_field(&mut self, bit: usize, len: usize, value: u64) {
        let len = len.min(WORD_BITS);
        debug_assert!(len > 0, "zero-length field");
        debug_assert!(bit + len <= self.bits, "field [{bit}, {bit}+{len}) out of range");

        let ones = Self::ones();
        let (lo_blk, lo_bit) = Self::split(bit);
        let (hi_blk, hi_bit) = Self::split(bit + len - 1);

        if lo_blk == hi_blk {
            let field = (ones >> (B::BITS - 1 - hi_bit)) & (ones << lo_bit);
            let word = (self.blocks[lo_blk].to_word() & !field) | ((value << lo_bit) & field);
            self.blocks[lo_blk] = B::from_word(word);
            return;
        }

        let lo_mask = ones << lo_bit;
        let word = (self.blocks[lo_blk].to_word() & !lo_mask) | ((value << lo_bit) & ones);
        self.blocks[lo_blk] = B::from_word(word);

        // Offset in the value of the next bit to take.
        let mut pos = B::BITS - lo_bit;

        for blk in lo_blk + 1..hi_blk {
            self.blocks[blk] = B::from_word((value >> pos) & ones);
            pos += B::BITS;
        }

        let field = ones >> (B::BITS - 1 - hi_bit);
        let word = (self.blocks[hi_blk].to_word() & !field & ones) | ((value >> pos) & field);
        self.blocks[hi_blk] = B::from_word(word);
    }

    /// Sets every block to all-ones or all-zeros. Padding bits past
    /// [`len`](Self::len) in the last block are included.
    pub fn fill(&mut self, value: bool) {
        let word = if value { B::from_word(u64::MAX) } else { B::ZERO };
        self.blocks.fill(word);
    }
}

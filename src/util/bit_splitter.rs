/// A structure for easily splitting an opcode
/// into the fixed fields used by the CHIP-8 instruction set,
/// such as the four nibbles, the low byte or the low 12 bits.
pub struct BitSplitter(u8, u8);

impl BitSplitter {

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The opcode nibble followed by the x, y and n fields.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        let four_last_bits_mask = 0x0F;
        (
            (self.0 >> 4) & four_last_bits_mask,
            self.0 & four_last_bits_mask,
            (self.1 >> 4) & four_last_bits_mask,
            self.1 & four_last_bits_mask
        )
    }

    /// The `nn` field.
    pub fn last_8_bits(&self) -> u8 {
        self.1
    }

    /// The `nnn` field.
    pub fn last_12_bits(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_u16_joins_both_bytes() {
        assert_eq!(BitSplitter::new(0xAB, 0xCD).as_u16(), 0xABCD);
        assert_eq!(BitSplitter::new(0x00, 0xFF).as_u16(), 0x00FF);
    }

    #[test]
    fn get_components() {
        assert_eq!((0xA, 0xB, 0xC, 0xD), BitSplitter::new(0xAB, 0xCD).as_four_u8());
        assert_eq!((0x0, 0x0, 0xE, 0x0), BitSplitter::new(0x00, 0xE0).as_four_u8());
    }

    #[test]
    fn fields_are_masked() {
        assert_eq!(0xCD, BitSplitter::new(0xAB, 0xCD).last_8_bits());
        assert_eq!(0xBCD, BitSplitter::new(0xAB, 0xCD).last_12_bits());
        assert_eq!(0xFFF, BitSplitter::new(0xFF, 0xFF).last_12_bits());
    }
}

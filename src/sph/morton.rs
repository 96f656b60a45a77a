// via https://fgiesen.wordpress.com/2009/12/13/decoding-morton-codes/

// "Insert" a 0 bit after each of the 16 low bits of x
// Example: input 0b1011_1100_1011_1101, output 0b01000101_01010000_01000101_01010001
#[inline]
fn part_1by1(x: u16) -> u32 {
    let mut x = x as u32; // x = ---- ---- ---- ---- fedc ba98 7654 3210
    x = (x ^ (x << 8)) & 0x00ff_00ff; // x = ---- ---- fedc ba98 ---- ---- 7654 3210
    x = (x ^ (x << 4)) & 0x0f0f_0f0f; // x = ---- fedc ---- ba98 ---- 7654 ---- 3210
    x = (x ^ (x << 2)) & 0x3333_3333; // x = --fe --dc --ba --98 --76 --54 --32 --10
    x = (x ^ (x << 1)) & 0x5555_5555; // x = -f-e -d-c -b-a -9-8 -7-6 -5-4 -3-2 -1-0
    x
}

// encodes two 16 bit cell coordinates into a single 32bit number by interleaving the bits.
#[inline]
pub(super) fn encode(x: u16, y: u16) -> u32 {
    (part_1by1(y) << 1) | part_1by1(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_1by1_spreads_bits() {
        assert_eq!(part_1by1(0b1011_1100_1011_1101), 0b01000101_01010000_01000101_01010001);
        assert_eq!(part_1by1(0xffff), 0x5555_5555);
    }

    #[test]
    fn encode_interleaves_x_then_y() {
        assert_eq!(encode(0, 0), 0);
        assert_eq!(encode(1, 0), 0b01);
        assert_eq!(encode(0, 1), 0b10);
        assert_eq!(encode(0b11, 0b01), 0b0111);
        assert_eq!(encode(u16::MAX, u16::MAX), u32::MAX);
    }

    #[test]
    fn encode_is_unique_on_small_grid() {
        let mut codes: Vec<u32> = (0..64).flat_map(|y| (0..64).map(move |x| encode(x, y))).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 64 * 64);
    }
}

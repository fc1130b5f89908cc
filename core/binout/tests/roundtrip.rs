use binout::{BinBuilder, BinConfig, BitInput, BitOrder, BitWidth, ByteOrder};
use proptest::prelude::*;

fn reader(data: &[u8], config: BinConfig) -> BitInput<&[u8]> {
    BitInput::new(data, config.byte_order, config.bit_order)
}

#[test]
fn test_mixed_message_reads_back() {
    let config = BinConfig::new(ByteOrder::LittleEndian, BitOrder::Lsb0);
    let mut builder = BinBuilder::with_config(config);
    builder
        .bits(BitWidth::Bits3, 0x05)
        .unwrap()
        .bit(1)
        .unwrap()
        .align()
        .unwrap()
        .short(0xBEEF)
        .unwrap()
        .utf8("JFIF")
        .unwrap();
    let data = builder.end().unwrap().expect("internal buffer");

    let mut input = reader(&data, config);
    assert_eq!(input.read_bits(BitWidth::Bits3).unwrap(), 0x05);
    assert!(input.read_bit().unwrap());
    input.align();
    assert_eq!(input.read_u16().unwrap(), 0xBEEF);
    assert_eq!(input.read_bytes(4).unwrap(), b"JFIF".to_vec());
    assert_eq!(input.bytes_read(), data.len() as u64);
}

#[test]
fn test_msb0_message_reads_back() {
    let config = BinConfig::new(ByteOrder::BigEndian, BitOrder::Msb0);
    let mut builder = BinBuilder::with_config(config);
    builder
        .bits(BitWidth::Bits5, 0x13)
        .unwrap()
        .align()
        .unwrap()
        .int(0xDEADBEEF)
        .unwrap();
    let data = builder.end().unwrap().expect("internal buffer");

    let mut input = reader(&data, config);
    assert_eq!(input.read_bits(BitWidth::Bits5).unwrap(), 0x13);
    input.align();
    assert_eq!(input.read_u32().unwrap(), 0xDEADBEEF);
}

#[test]
fn test_floats_read_back() {
    for byte_order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let config = BinConfig::new(byte_order, BitOrder::Lsb0);
        let mut builder = BinBuilder::with_config(config);
        builder.float(core::f32::consts::PI).unwrap();
        builder.double(core::f64::consts::E).unwrap();
        let data = builder.end().unwrap().expect("internal buffer");

        let mut input = reader(&data, config);
        assert_eq!(input.read_f32().unwrap(), core::f32::consts::PI);
        assert_eq!(input.read_f64().unwrap(), core::f64::consts::E);
    }
}

#[test]
fn test_skip_region_reads_back_as_zeros() {
    let config = BinConfig::default();
    let mut builder = BinBuilder::with_config(config);
    builder.byte(0xA5).unwrap().skip(3).unwrap().byte(0x5A).unwrap();
    let data = builder.end().unwrap().expect("internal buffer");

    let mut input = reader(&data, config);
    assert_eq!(input.read_byte().unwrap(), 0xA5);
    assert_eq!(input.read_bytes(3).unwrap(), vec![0, 0, 0]);
    assert_eq!(input.read_byte().unwrap(), 0x5A);
}

proptest! {
    #[test]
    fn roundtrip_reproduces_logical_values(
        groups in proptest::collection::vec((1u8..=8, any::<u8>()), 0..16),
        shorts in proptest::collection::vec(any::<u16>(), 0..8),
        word in any::<u32>(),
        quad in any::<u64>(),
        little_endian in any::<bool>(),
        msb0 in any::<bool>(),
    ) {
        let config = BinConfig::new(
            if little_endian { ByteOrder::LittleEndian } else { ByteOrder::BigEndian },
            if msb0 { BitOrder::Msb0 } else { BitOrder::Lsb0 },
        );

        let mut builder = BinBuilder::with_config(config);
        for &(width, value) in &groups {
            builder.bits(BitWidth::try_from(width).unwrap(), value).unwrap();
        }
        builder.align().unwrap();
        for &value in &shorts {
            builder.short(value).unwrap();
        }
        builder.int(word).unwrap();
        builder.long(quad).unwrap();
        let data = builder.end().unwrap().expect("internal buffer");

        let mut input = reader(&data, config);
        for &(width, value) in &groups {
            let mask = if width == 8 { 0xFF } else { (1u8 << width) - 1 };
            prop_assert_eq!(
                input.read_bits(BitWidth::try_from(width).unwrap()).unwrap(),
                value & mask
            );
        }
        input.align();
        for &value in &shorts {
            prop_assert_eq!(input.read_u16().unwrap(), value);
        }
        prop_assert_eq!(input.read_u32().unwrap(), word);
        prop_assert_eq!(input.read_u64().unwrap(), quad);
    }
}

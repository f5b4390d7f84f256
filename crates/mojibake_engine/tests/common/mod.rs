#![allow(dead_code)]

use encoding_rs::{GBK, WINDOWS_1252};
use mojibake_core::ByteOrder;

pub fn init_logging() {
    engine_logging::initialize_for_tests();
}

/// GBK text that was read as windows-1252 and saved as UTF-8.
pub fn garble(text: &str) -> Vec<u8> {
    garbled_text(text).into_bytes()
}

/// The same mis-decoding, saved as UTF-16 without a BOM.
pub fn garble_utf16(text: &str, order: ByteOrder) -> Vec<u8> {
    garbled_text(text)
        .encode_utf16()
        .flat_map(|unit| order.unit_bytes(unit))
        .collect()
}

/// GBK text that was read as true ISO-8859-1, so bytes 0x80..=0x9F
/// became C1 controls, and saved as UTF-8.
pub fn garble_latin1(text: &str) -> Vec<u8> {
    let (gbk, _, unmappable) = GBK.encode(text);
    assert!(!unmappable, "fixture must be representable in GBK");
    gbk.iter()
        .map(|&b| char::from(b))
        .collect::<String>()
        .into_bytes()
}

fn garbled_text(text: &str) -> String {
    let (gbk, _, unmappable) = GBK.encode(text);
    assert!(!unmappable, "fixture must be representable in GBK");
    let (latin, _) = WINDOWS_1252.decode_without_bom_handling(&gbk);
    latin.into_owned()
}

/// Mixed prose with long stretches that contain no ASCII byte at all.
pub fn sample_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        text.push_str(&format!("第{i}行: 中文测试, mixed with ASCII.\n"));
        text.push_str("乱码修复测试中文字符串没有空格的长句子就是这样。\n");
    }
    text
}

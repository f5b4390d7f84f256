use std::borrow::Cow;

use encoding_rs::mem::decode_latin1;
use encoding_rs::{
    DecoderResult, Encoder, EncoderResult, Encoding, REPLACEMENT, UTF_16BE, UTF_16LE, UTF_8,
};
use mojibake_core::{Alignment, ByteOrder, BYTE_ORDER_WITHOUT_BOM};

/// A resolved encoding identifier.
///
/// `encoding_rs` has no UTF-16 encoder and folds the BOM-less `utf-16` label
/// into little-endian, so wide encodings are modelled separately with an
/// optional byte order. It also maps every ISO-8859-1 label to windows-1252,
/// whose encoder rejects U+0080..=U+009F, so true Latin-1 gets its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Native(&'static Encoding),
    /// Bytes 0x00..=0xFF are code points U+0000..=U+00FF.
    Latin1,
    Utf16(Option<ByteOrder>),
}

const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso8859-1",
    "iso88591",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
    "iso-ir-100",
];

/// What to do with characters the target encoding cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmappable {
    Drop,
    Substitute(char),
}

impl Charset {
    /// Resolve a WHATWG label or one of the common Java-style aliases.
    pub fn for_label(label: &str) -> Option<Self> {
        let label = canonical_label(label);
        if LATIN1_LABELS.contains(&label.as_str()) {
            return Some(Charset::Latin1);
        }
        let encoding = Encoding::for_label(label.as_bytes())?;
        if encoding == REPLACEMENT {
            return None;
        }
        let charset = if encoding == UTF_16LE {
            Charset::Utf16((label == "utf-16le").then_some(ByteOrder::Little))
        } else if encoding == UTF_16BE {
            Charset::Utf16(Some(ByteOrder::Big))
        } else {
            Charset::Native(encoding)
        };
        Some(charset)
    }

    pub fn alignment(self) -> Alignment {
        match self {
            Charset::Native(_) | Charset::Latin1 => Alignment::Ascii,
            Charset::Utf16(order) => Alignment::Wide(order),
        }
    }

    /// Settle the byte order of an unresolved UTF-16 charset. Other charsets are unchanged.
    pub fn with_byte_order(self, order: ByteOrder) -> Self {
        match self {
            Charset::Utf16(None) => Charset::Utf16(Some(order)),
            other => other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Native(encoding) => encoding.name(),
            Charset::Latin1 => "ISO-8859-1",
            Charset::Utf16(Some(ByteOrder::Little)) => "UTF-16LE",
            Charset::Utf16(Some(ByteOrder::Big)) => "UTF-16BE",
            Charset::Utf16(None) => "UTF-16",
        }
    }

    fn decoding_encoding(self) -> Option<&'static Encoding> {
        match self {
            Charset::Native(encoding) => Some(encoding),
            Charset::Latin1 => None,
            Charset::Utf16(order) => match order.unwrap_or(BYTE_ORDER_WITHOUT_BOM) {
                ByteOrder::Little => Some(UTF_16LE),
                ByteOrder::Big => Some(UTF_16BE),
            },
        }
    }

    /// Decode with U+FFFD substitution. Never sniffs a BOM: a chunk may start
    /// with bytes that merely look like one.
    pub fn decode(self, bytes: &[u8]) -> (Cow<'_, str>, bool) {
        match self.decoding_encoding() {
            Some(encoding) => encoding.decode_without_bom_handling(bytes),
            None => (decode_latin1(bytes), false),
        }
    }

    /// Decode `bytes` as a stream prefix and return the text only if the
    /// decoder is left without a pending partial sequence.
    pub fn decode_complete(self, bytes: &[u8]) -> Option<String> {
        let Some(encoding) = self.decoding_encoding() else {
            return Some(decode_latin1(bytes).into_owned());
        };
        let mut decoder = encoding.new_decoder_without_bom_handling();
        let mut text = String::with_capacity(decoder.max_utf8_buffer_length(bytes.len())?);
        let _ = decoder.decode_to_string(bytes, &mut text, false);

        let mut tail =
            String::with_capacity(decoder.max_utf8_buffer_length_without_replacement(0)?);
        match decoder.decode_to_string_without_replacement(&[], &mut tail, true) {
            (DecoderResult::InputEmpty, _) => Some(text),
            _ => None,
        }
    }

    /// Encode `text`, returning the bytes and how many characters were unmappable.
    pub fn encode(self, text: &str, unmappable: Unmappable) -> (Vec<u8>, usize) {
        match self {
            Charset::Utf16(order) => {
                let order = order.unwrap_or(BYTE_ORDER_WITHOUT_BOM);
                let bytes = text
                    .encode_utf16()
                    .flat_map(|unit| order.unit_bytes(unit))
                    .collect();
                (bytes, 0)
            }
            Charset::Latin1 => encode_latin1(text, unmappable),
            Charset::Native(encoding) if encoding == UTF_8 => (text.as_bytes().to_vec(), 0),
            Charset::Native(encoding) => encode_native(encoding, text, unmappable),
        }
    }
}

fn canonical_label(label: &str) -> String {
    let lower = label.trim().to_ascii_lowercase();
    let alias = match lower.as_str() {
        "utf8" => "utf-8",
        "utf16" => "utf-16",
        "utf16le" => "utf-16le",
        "utf16be" => "utf-16be",
        "cp936" | "ms936" => "gbk",
        "iso8859_1" => "iso-8859-1",
        _ => {
            if let Some(page) = lower.strip_prefix("cp") {
                if matches!(page.parse::<u16>(), Ok(1250..=1258)) {
                    return format!("windows-{page}");
                }
            }
            return lower;
        }
    };
    alias.to_string()
}

fn encode_latin1(text: &str, unmappable: Unmappable) -> (Vec<u8>, usize) {
    let substitute = match unmappable {
        Unmappable::Substitute(c) => u8::try_from(c).ok(),
        Unmappable::Drop => None,
    };
    let mut out = Vec::with_capacity(text.len());
    let mut misses = 0;
    for c in text.chars() {
        match u8::try_from(c) {
            Ok(byte) => out.push(byte),
            Err(_) => {
                misses += 1;
                out.extend(substitute);
            }
        }
    }
    (out, misses)
}

fn encode_native(
    encoding: &'static Encoding,
    text: &str,
    unmappable: Unmappable,
) -> (Vec<u8>, usize) {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(
        encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .unwrap_or(text.len()),
    );
    let mut misses = 0;
    let mut pending = text;
    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(pending, &mut out, true);
        pending = &pending[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => out.reserve(pending.len().max(16)),
            EncoderResult::Unmappable(_) => {
                misses += 1;
                if let Unmappable::Substitute(substitute) = unmappable {
                    push_substitute(&mut encoder, substitute, &mut out);
                }
            }
        }
    }
    (out, misses)
}

// Goes through the encoder so stateful encodings stay in a consistent mode.
fn push_substitute(encoder: &mut Encoder, substitute: char, out: &mut Vec<u8>) {
    let mut buf = [0u8; 4];
    let mut pending: &str = substitute.encode_utf8(&mut buf);
    while !pending.is_empty() {
        out.reserve(16);
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(pending, out, false);
        pending = &pending[read..];
        if let EncoderResult::Unmappable(_) = result {
            break;
        }
    }
}

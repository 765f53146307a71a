//! Framing for a single ratchet message. On wire, a message is a version byte followed by a stream
//! of tagged fields, followed by a MAC of externally agreed length. A tag byte combines a field
//! number in its upper bits with a wire type in its lowest three; only wire types 0 (bare varint)
//! and 2 (length-prefixed bytes) exist in this format. The codec never touches the key, ciphertext
//! or MAC bytes themselves: the encoder lays out the frame and hands back the slots to copy into,
//! the decoder hands back borrowed spans to feed into MAC verification and decryption.

use crate::error::{DecodeError, DecoderError};
use crate::varint;

/// Field 1, wire type 2: the sender's current ratchet public key.
pub const RATCHET_KEY_TAG: u8 = 0x0a;
/// Field 2, wire type 0: the send counter within the current chain.
pub const COUNTER_TAG: u8 = 0x10;
/// Field 4, wire type 2: the ciphertext blob.
pub const CIPHERTEXT_TAG: u8 = 0x22;

const VERSION_LENGTH: usize = 1;
const WIRE_TYPE_MASK: u8 = 0x7;
const WIRE_VARINT: u8 = 0;
const WIRE_LENGTH_DELIMITED: u8 = 2;

/// The slots of an encoded message that the caller still has to fill in. Both slices are disjoint
/// views into the output buffer passed to [`encode_message`], so the bytes land exactly where the
/// frame reserved them and cannot overrun neighbouring fields.
#[derive(Debug)]
pub struct MessageWriter<'a> {
    pub ratchet_key: &'a mut [u8],
    pub ciphertext: &'a mut [u8],
}

/// A decoded message. All slices borrow from the input buffer; the reader owns nothing.
#[derive(Debug, PartialEq)]
pub struct MessageReader<'a> {
    pub version: u8,
    pub counter: u32,
    pub ratchet_key: &'a [u8],
    pub ciphertext: &'a [u8],
    /// The entire received buffer, trailing MAC included, for the caller's MAC verification.
    pub input: &'a [u8],
}

/// Returns the exact number of bytes a message with the given field sizes occupies on wire,
/// trailing MAC included. Callers must size their output buffer from this before calling
/// [`encode_message`].
pub fn encode_message_length(
    counter: u32,
    ratchet_key_length: usize,
    ciphertext_length: usize,
    mac_length: usize,
) -> usize {
    VERSION_LENGTH
        + 1 + varstring_length(ratchet_key_length)
        + 1 + varint::length(counter as u64)
        + 1 + varstring_length(ciphertext_length)
        + mac_length
}

fn varstring_length(length: usize) -> usize {
    varint::length(length as u64) + length
}

/// Writes the version byte and the field headers into `output` and returns the reserved key and
/// ciphertext slots for the caller to copy into. The MAC goes after the last reserved slot, which
/// ends at `encode_message_length(..) - mac_length`.
///
/// `output` must hold at least `encode_message_length(counter, ratchet_key_length,
/// ciphertext_length, 0)` bytes; a smaller buffer panics.
pub fn encode_message(
    version: u8,
    counter: u32,
    ratchet_key_length: usize,
    ciphertext_length: usize,
    output: &mut [u8],
) -> MessageWriter<'_> {
    let mut pos = 0;
    output[pos] = version;
    pos += 1;
    output[pos] = COUNTER_TAG;
    pos += 1;
    pos += varint::encode(&mut output[pos..], counter as u64);
    output[pos] = RATCHET_KEY_TAG;
    pos += 1;
    pos += varint::encode(&mut output[pos..], ratchet_key_length as u64);
    let (ratchet_key, rest) = output[pos..].split_at_mut(ratchet_key_length);
    rest[0] = CIPHERTEXT_TAG;
    let count = varint::encode(&mut rest[1..], ciphertext_length as u64);
    let (ciphertext, _) = rest[1 + count..].split_at_mut(ciphertext_length);
    MessageWriter { ratchet_key, ciphertext }
}

/// Decodes a received message. The last `mac_length` bytes of `input` are left to the caller; the
/// rest is parsed as the version byte and the field stream. Unknown fields of either supported
/// wire type are skipped, repeated fields overwrite earlier occurrences, and the counter, ratchet
/// key and ciphertext must all be present. Returns the reader and the number of parsed bytes,
/// which on success always equals `input.len() - mac_length` since parsing only stops at the
/// boundary to the MAC.
pub fn decode_message(input: &[u8], mac_length: usize) -> Result<(MessageReader<'_>, usize), DecoderError> {
    let tlv_length = input.len().checked_sub(mac_length).ok_or_else(|| DecodeError::Eof.at(0))?;
    let mut decoder = Decoder { buf: &input[..tlv_length], pos: 0 };
    let (version, counter, ratchet_key, ciphertext) = decoder.decode_fields().map_err(|e| e.at(decoder.pos))?;
    Ok((MessageReader { version, counter, ratchet_key, ciphertext, input }, decoder.pos))
}

struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {

    fn decode_fields(&mut self) -> Result<(u8, u32, &'a [u8], &'a [u8]), DecodeError> {
        let version = self.take_byte()?;
        let mut counter = None;
        let mut ratchet_key = None;
        let mut ciphertext = None;
        while self.pos != self.buf.len() {
            match self.take_byte()? {
                COUNTER_TAG => {
                    let value = self.take_varint()?;
                    counter = Some(u32::try_from(value).map_err(|_| DecodeError::Counter(value))?);
                },
                RATCHET_KEY_TAG => { ratchet_key = Some(self.take_varstring()?); },
                CIPHERTEXT_TAG => { ciphertext = Some(self.take_varstring()?); },
                tag => match tag & WIRE_TYPE_MASK {
                    WIRE_VARINT => { self.pos = varint::skip(self.buf, self.pos)?; },
                    WIRE_LENGTH_DELIMITED => { self.take_varstring()?; },
                    wire => { return Err(DecodeError::WireType(wire)); },
                },
            }
        }
        Ok((
            version,
            counter.ok_or(DecodeError::MissingField("counter"))?,
            ratchet_key.ok_or(DecodeError::MissingField("ratchet key"))?,
            ciphertext.ok_or(DecodeError::MissingField("ciphertext"))?,
        ))
    }

    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        if self.pos == self.buf.len() {
            Err(DecodeError::Eof)
        } else {
            self.pos += 1;
            Ok(self.buf[self.pos - 1])
        }
    }

    fn take_varint(&mut self) -> Result<u64, DecodeError> {
        let start = self.pos;
        self.pos = varint::skip(self.buf, self.pos)?;
        varint::decode(&self.buf[start..self.pos])
    }

    fn take_varstring(&mut self) -> Result<&'a [u8], DecodeError> {
        let length = self.take_varint()?;
        let length = usize::try_from(length).map_err(|_| DecodeError::Length(length))?;
        if length > self.buf.len() - self.pos {
            Err(DecodeError::Eof)
        } else {
            self.pos += length;
            Ok(&self.buf[self.pos - length..self.pos])
        }
    }

}

//! Wire codec for the messages of a double-ratchet secure messaging protocol. A message carries a
//! version byte, a send counter, the sender's current ratchet public key and a ciphertext blob,
//! followed by a MAC of externally agreed length. The codec computes exact buffer sizes before
//! allocation, lays out frames with reserved slots the caller copies the key and ciphertext into,
//! and parses received buffers back into borrowed field views. It performs no cryptography and no
//! allocation of its own: key agreement, AEAD and MAC verification live in the layer above, which
//! hands this codec opaque bytes and gets opaque spans back.
//!
//! Unrecognized fields of the two supported wire types are skipped on decode, so newer peers can
//! add fields without breaking older ones.
//!
//! # Examples
//!
//! ```
//! use ratchet_wire::{encode_message_length, encode_message, decode_message};
//!
//! let mac = [0xfe, 0xff];
//! let length = encode_message_length(1, 2, 3, mac.len());
//! let mut buf = vec![0u8; length];
//! let writer = encode_message(3, 1, 2, 3, &mut buf);
//! writer.ratchet_key.copy_from_slice(&[0xaa, 0xbb]);
//! writer.ciphertext.copy_from_slice(&[0x01, 0x02, 0x03]);
//! buf[length - mac.len()..].copy_from_slice(&mac);
//! assert_eq!(buf, [
//!     0x03, // version
//!     0x10, // counter tag
//!     0x01, // counter 1
//!     0x0a, // ratchet key tag
//!     0x02, // key length 2
//!     0xaa, // key bytes, copied in through the writer
//!     0xbb,
//!     0x22, // ciphertext tag
//!     0x03, // ciphertext length 3
//!     0x01, // ciphertext bytes
//!     0x02,
//!     0x03,
//!     0xfe, // MAC, appended by the caller
//!     0xff,
//! ]);
//! let (reader, parsed) = decode_message(&buf, mac.len()).unwrap();
//! assert_eq!(3, reader.version);
//! assert_eq!(1, reader.counter);
//! assert_eq!(&[0xaau8, 0xbb], reader.ratchet_key);
//! assert_eq!(&[0x01u8, 0x02, 0x03], reader.ciphertext);
//! assert_eq!(length - mac.len(), parsed);
//! ```

mod error;
mod message;
pub mod varint;

pub use error::*;
pub use message::*;

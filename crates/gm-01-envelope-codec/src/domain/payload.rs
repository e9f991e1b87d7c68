//! # Messenger Payloads
//!
//! The application layer carried inside envelope payloads by the messenger.
//!
//! | Id | Variant | Body |
//! |----|---------|------|
//! | 0 | `Alive` | program id (32 bytes) |
//! | 1 | `Hello` | length (u16 BE) + message bytes |

use serde::{Deserialize, Serialize};

use super::errors::PayloadError;

const PAYLOAD_ID_ALIVE: u8 = 0;
const PAYLOAD_ID_HELLO: u8 = 1;

/// Longest message a `Hello` may carry.
pub const MAX_HELLO_LENGTH: usize = 512;

/// Messages exchanged by the messenger application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessengerPayload {
    /// Announced once when a messenger is initialized.
    Alive {
        /// Identity of the announcing program
        program_id: [u8; 32],
    },
    /// A user message.
    Hello {
        /// Message bytes, at most [`MAX_HELLO_LENGTH`]
        message: Vec<u8>,
    },
}

impl MessengerPayload {
    /// Payload id byte.
    pub fn id(&self) -> u8 {
        match self {
            MessengerPayload::Alive { .. } => PAYLOAD_ID_ALIVE,
            MessengerPayload::Hello { .. } => PAYLOAD_ID_HELLO,
        }
    }

    /// Encode to bytes.
    pub fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        match self {
            MessengerPayload::Alive { program_id } => {
                let mut out = Vec::with_capacity(33);
                out.push(PAYLOAD_ID_ALIVE);
                out.extend_from_slice(program_id);
                Ok(out)
            }
            MessengerPayload::Hello { message } => {
                if message.len() > MAX_HELLO_LENGTH {
                    return Err(PayloadError::MessageTooLong {
                        len: message.len(),
                        max: MAX_HELLO_LENGTH,
                    });
                }
                let mut out = Vec::with_capacity(3 + message.len());
                out.push(PAYLOAD_ID_HELLO);
                out.extend_from_slice(&(message.len() as u16).to_be_bytes());
                out.extend_from_slice(message);
                Ok(out)
            }
        }
    }

    /// Decode from bytes. The whole input must be consumed.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let (&id, body) = bytes.split_first().ok_or(PayloadError::Empty)?;
        let (payload, consumed) = match id {
            PAYLOAD_ID_ALIVE => {
                let program_id: [u8; 32] = body
                    .get(..32)
                    .and_then(|s| s.try_into().ok())
                    .ok_or(PayloadError::Truncated {
                        needed: 33,
                        available: bytes.len(),
                    })?;
                (MessengerPayload::Alive { program_id }, 32)
            }
            PAYLOAD_ID_HELLO => {
                let len_bytes: [u8; 2] = body
                    .get(..2)
                    .and_then(|s| s.try_into().ok())
                    .ok_or(PayloadError::Truncated {
                        needed: 3,
                        available: bytes.len(),
                    })?;
                let len = u16::from_be_bytes(len_bytes) as usize;
                if len > MAX_HELLO_LENGTH {
                    return Err(PayloadError::MessageTooLong {
                        len,
                        max: MAX_HELLO_LENGTH,
                    });
                }
                let message = body.get(2..2 + len).ok_or(PayloadError::Truncated {
                    needed: 3 + len,
                    available: bytes.len(),
                })?;
                (
                    MessengerPayload::Hello {
                        message: message.to_vec(),
                    },
                    2 + len,
                )
            }
            other => return Err(PayloadError::UnknownPayloadId(other)),
        };

        if body.len() > consumed {
            return Err(PayloadError::TrailingBytes(body.len() - consumed));
        }
        Ok(payload)
    }
}

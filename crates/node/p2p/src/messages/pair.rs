//! Request id framing.

use alloy_rlp::{BufMut, Decodable, Encodable, Header};

/// A request or response payload paired with the request id it belongs to.
///
/// Encoded as the RLP list `[request_id, message]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestPair<T> {
    /// Id chosen by the requester and echoed by the responder.
    pub request_id: u64,
    /// The payload.
    pub message: T,
}

impl<T> RequestPair<T> {
    /// Pairs a payload with a request id.
    pub const fn new(request_id: u64, message: T) -> Self {
        Self { request_id, message }
    }

    /// Keeps the request id, replacing the payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestPair<U> {
        RequestPair { request_id: self.request_id, message: f(self.message) }
    }
}

impl<T: Encodable> RequestPair<T> {
    fn payload_length(&self) -> usize {
        self.request_id.length() + self.message.length()
    }
}

impl<T: Encodable> Encodable for RequestPair<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_length() }.encode(out);
        self.request_id.encode(out);
        self.message.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

impl<T: Decodable> Decodable for RequestPair<T> {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString);
        }
        let started = buf.len();
        let request_id = u64::decode(buf)?;
        let message = T::decode(buf)?;
        let consumed = started - buf.len();
        if consumed != header.payload_length {
            return Err(alloy_rlp::Error::ListLengthMismatch {
                expected: header.payload_length,
                got: consumed,
            });
        }
        Ok(Self { request_id, message })
    }
}

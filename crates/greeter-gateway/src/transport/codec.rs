//! Body codec shared by the adapters.
//!
//! Decoding failures are returned raw so the adapter decides how to surface
//! them (status 500 with the message, or folded into the response envelope).

use bytes::Bytes;
use serde::de::DeserializeOwned;

pub fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::protocol::http::GreetRequest;

    #[test]
    fn decodes_and_defaults() {
        let req: GreetRequest = decode_json(&Bytes::from_static(b"{}")).unwrap();
        assert_eq!(req.s, "");
    }

    #[test]
    fn truncated_json_fails() {
        let err = decode_json::<GreetRequest>(&Bytes::from_static(b"{\"s\":")).unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn wrong_type_fails() {
        let err = decode_json::<GreetRequest>(&Bytes::from_static(b"{\"s\":1}")).unwrap_err();
        assert!(err.is_data());
    }
}

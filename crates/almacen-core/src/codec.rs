//! Item-name tokens for action identifiers.
//!
//! Action identifiers are split on `_`, and item names may contain spaces,
//! accents and underscores. Names are therefore carried as standard base64,
//! whose alphabet never contains `_`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Encodes an item name into an identifier-safe token.
pub fn encode(name: &str) -> String {
    STANDARD.encode(name.as_bytes())
}

/// Decodes a token produced by [`encode`].
///
/// Never fails: a token that is not valid base64 of UTF-8 text is treated
/// as a hand-written name whose spaces were replaced by underscores.
pub fn decode(token: &str) -> String {
    STANDARD
        .decode(token.as_bytes())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| token.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_every_catalog_item_round_trips() {
        for item in catalog::all_items() {
            let token = encode(item.name);
            assert!(!token.contains('_'), "token for {} has '_'", item.name);
            assert_eq!(decode(&token), item.name);
        }
    }

    #[test]
    fn test_spaces_and_accents_round_trip() {
        for name in ["cargador pistolas", "arquitectónico", "ñandú_raro"] {
            assert_eq!(decode(&encode(name)), name);
        }
    }

    #[test]
    fn test_malformed_token_falls_back() {
        assert_eq!(decode("cargador_pistolas"), "cargador pistolas");
        assert_eq!(decode("!!!"), "!!!");
    }

    #[test]
    fn test_known_token() {
        assert_eq!(encode("glock"), "Z2xvY2s=");
    }
}

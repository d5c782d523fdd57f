// ── Credential encoding for smbclient and queue URLs ──

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::Credentials;

/// Everything except RFC 3986 unreserved characters gets escaped, so the
/// password survives both the `user%pass` smbclient syntax and the
/// `user:pass@host` userinfo of a queue URL.
const PASSWORD: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a password for embedding in a URL or credential string.
pub fn encode_password(password: &str) -> String {
    utf8_percent_encode(password, PASSWORD).to_string()
}

/// `DOMAIN\auid%password` as accepted by `smbclient -U`.
pub fn smb_user_spec(domain: &str, credentials: &Credentials) -> String {
    format!(
        "{domain}\\{}%{}",
        credentials.auid,
        encode_password(credentials.expose_password())
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(encode_password("Abc-1.2_3~"), "Abc-1.2_3~");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode_password("p@ss/w:rd"), "p%40ss%2Fw%3Ard");
        assert_eq!(encode_password("a b%c"), "a%20b%25c");
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(encode_password("æ"), "%C3%A6");
    }

    #[test]
    fn user_spec_layout() {
        let creds = Credentials::new("au123", "p@ss");
        assert_eq!(smb_user_spec("uni", &creds), "uni\\au123%p%40ss");
    }
}

//! Key-value-list-with-message (KVLM) codec for commit and tag payloads.
//!
//! Wire form: one `key SP value LF` line per value occurrence, with embedded
//! newlines in a value escaped as `LF SP` (continuation lines); a single
//! blank line separates the header section from the free-text message, which
//! runs verbatim to the end of the buffer.
//!
//! In memory, values carry real newlines. The escaping is purely a wire
//! detail, reversed on parse and reapplied on serialize. Key order is
//! first-seen order; a key that repeats is promoted from a single value to a
//! list preserving value order. Round-trip law: `parse(serialize(k)) == k`
//! for any `Kvlm` produced by a successful parse.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::find_byte;

/// The value(s) bound to one KVLM key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A key seen once.
    Single(Vec<u8>),
    /// A key seen more than once (e.g. multiple `parent` headers), in
    /// first-seen order.
    Many(Vec<Vec<u8>>),
}

impl Value {
    /// Append a later occurrence, promoting `Single` to `Many`.
    fn push(&mut self, value: Vec<u8>) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(values) => values.push(value),
        }
    }

    /// Iterate the value occurrences in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        // A one-element slice view keeps the two shapes uniform.
        match self {
            Self::Single(v) => std::slice::from_ref(v).iter().map(Vec::as_slice),
            Self::Many(vs) => vs.as_slice().iter().map(Vec::as_slice),
        }
    }
}

/// An ordered multimap of byte-string headers plus a trailing message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kvlm {
    /// Header fields in first-seen key order.
    pub fields: Vec<(Vec<u8>, Value)>,
    /// The free-text message body. Always present after a successful parse,
    /// possibly empty.
    pub message: Vec<u8>,
}

impl Kvlm {
    /// Create an empty KVLM (no headers, empty message).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode wire bytes. Single pass, explicit offset; terminates when the
    /// blank-line message boundary is reached.
    pub fn parse(raw: &[u8]) -> CodecResult<Self> {
        let mut fields: Vec<(Vec<u8>, Value)> = Vec::new();
        let mut pos = 0;

        loop {
            let spc = find_byte(raw, b' ', pos);
            let nl = find_byte(raw, b'\n', pos);

            // Message boundary: no space before the next newline (or no
            // space at all). The offset must sit exactly on that newline,
            // else the input is malformed.
            let at_boundary = match (spc, nl) {
                (None, _) => true,
                (Some(s), Some(n)) => n < s,
                (Some(_), None) => false,
            };
            if at_boundary {
                return match nl {
                    Some(n) if n == pos => Ok(Self {
                        fields,
                        message: raw[pos + 1..].to_vec(),
                    }),
                    _ => Err(CodecError::MalformedCommit {
                        offset: pos,
                        reason: "expected blank line before message".into(),
                    }),
                };
            }

            let spc = spc.expect("boundary check guarantees a space");
            let key = raw[pos..spc].to_vec();

            // The value ends at the first newline not followed by a space;
            // an intervening `LF SP` marks a continuation line.
            let mut end = spc;
            loop {
                end = find_byte(raw, b'\n', end + 1).ok_or_else(|| CodecError::MalformedCommit {
                    offset: spc + 1,
                    reason: "unterminated header value".into(),
                })?;
                if raw.get(end + 1) != Some(&b' ') {
                    break;
                }
            }
            let value = unescape(&raw[spc + 1..end]);

            match fields.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => existing.push(value),
                None => fields.push((key, Value::Single(value))),
            }

            pos = end + 1;
        }
    }

    /// Encode to wire bytes: headers in first-seen order, then a blank line
    /// and the message verbatim.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, value) in &self.fields {
            for v in value.iter() {
                out.extend_from_slice(key);
                out.push(b' ');
                out.extend_from_slice(&escape(v));
                out.push(b'\n');
            }
        }
        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }

    /// First value bound to `key`, if any.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.iter().next())
    }

    /// All values bound to `key`, in order.
    pub fn get_all(&self, key: &[u8]) -> Vec<&[u8]> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.iter().collect())
            .unwrap_or_default()
    }

    /// Bind one more value to `key`: inserts fresh in last position for a new
    /// key, promotes to a list for a repeated one.
    pub fn push(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.push(value.into()),
            None => self.fields.push((key, Value::Single(value.into()))),
        }
    }

    /// The free-text message body.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Replace the message body.
    pub fn set_message(&mut self, message: impl Into<Vec<u8>>) {
        self.message = message.into();
    }
}

/// Reverse the continuation convention: `LF SP` becomes a bare `LF`.
fn unescape(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'\n' && raw.get(i + 1) == Some(&b' ') {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(raw[i]);
            i += 1;
        }
    }
    out
}

/// Apply the continuation convention: a bare `LF` becomes `LF SP`.
fn escape(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for &b in value {
        out.push(b);
        if b == b'\n' {
            out.push(b' ');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parses_a_realistic_commit() {
        let raw = b"tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147\n\
                    parent 206941306e8a8af65b66eaaaea388a7ae24d49a0\n\
                    author Thibault Polge <thibault@thb.lt> 1527025023 +0200\n\
                    committer Thibault Polge <thibault@thb.lt> 1527025044 +0200\n\
                    \n\
                    Create first draft";
        let kvlm = Kvlm::parse(raw).unwrap();
        assert_eq!(
            kvlm.get(b"tree").unwrap(),
            b"29ff16c9c14e2652b22f8b78bb08a5a07930c147"
        );
        assert_eq!(kvlm.message(), b"Create first draft");
        assert_eq!(kvlm.fields.len(), 4);
        // first-seen key order preserved
        assert_eq!(kvlm.fields[0].0, b"tree");
        assert_eq!(kvlm.fields[3].0, b"committer");
    }

    #[test]
    fn repeated_key_promotes_to_list() {
        let raw = b"parent A\nparent B\n\nmerge";
        let kvlm = Kvlm::parse(raw).unwrap();
        assert_eq!(kvlm.get_all(b"parent"), vec![&b"A"[..], &b"B"[..]]);
        // get() returns the first occurrence
        assert_eq!(kvlm.get(b"parent").unwrap(), b"A");
    }

    #[test]
    fn continuation_lines_unescape_to_real_newlines() {
        let raw = b"gpgsig -----BEGIN-----\n line2\n line3\n\nmsg\n";
        let kvlm = Kvlm::parse(raw).unwrap();
        assert_eq!(
            kvlm.get(b"gpgsig").unwrap(),
            b"-----BEGIN-----\nline2\nline3"
        );
        assert_eq!(kvlm.message(), b"msg\n");
    }

    #[test]
    fn message_only_input() {
        let kvlm = Kvlm::parse(b"\njust a message\n").unwrap();
        assert!(kvlm.fields.is_empty());
        assert_eq!(kvlm.message(), b"just a message\n");
    }

    #[test]
    fn empty_message_after_blank_line() {
        let kvlm = Kvlm::parse(b"tree abc\n\n").unwrap();
        assert_eq!(kvlm.message(), b"");
    }

    #[test]
    fn misplaced_message_boundary_is_rejected() {
        // A line with no space that is not the blank separator.
        let err = Kvlm::parse(b"tree abc\nnospace\n\nmsg").unwrap_err();
        assert!(matches!(err, CodecError::MalformedCommit { .. }));
    }

    #[test]
    fn input_without_message_section_is_rejected() {
        let err = Kvlm::parse(b"tree abc\n").unwrap_err();
        assert!(matches!(err, CodecError::MalformedCommit { .. }));
    }

    #[test]
    fn unterminated_value_is_rejected() {
        let err = Kvlm::parse(b"tree abc").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedCommit { offset: 5, .. }
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(Kvlm::parse(b"").is_err());
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    #[test]
    fn serialization_layout_is_exact() {
        let mut kvlm = Kvlm::new();
        kvlm.push(b"tree".as_slice(), b"29ff16c9c14e2652b22f8b78bb08a5a07930c147".as_slice());
        kvlm.push(b"author".as_slice(), b"A <a@x> 0 +0000".as_slice());
        kvlm.set_message(b"Initial commit\n".as_slice());
        assert_eq!(
            kvlm.serialize(),
            b"tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147\n\
              author A <a@x> 0 +0000\n\
              \n\
              Initial commit\n"
        );
    }

    #[test]
    fn embedded_newline_serializes_as_continuation() {
        let mut kvlm = Kvlm::new();
        kvlm.push(b"sig".as_slice(), b"line1\nline2".as_slice());
        let wire = kvlm.serialize();
        assert_eq!(wire, b"sig line1\n line2\n\n");
        assert_eq!(Kvlm::parse(&wire).unwrap(), kvlm);
    }

    #[test]
    fn multi_value_serializes_one_line_per_occurrence() {
        let mut kvlm = Kvlm::new();
        kvlm.push(b"parent".as_slice(), b"A".as_slice());
        kvlm.push(b"parent".as_slice(), b"B".as_slice());
        kvlm.set_message(b"m".as_slice());
        assert_eq!(kvlm.serialize(), b"parent A\nparent B\n\nm");
    }

    #[test]
    fn roundtrip_of_realistic_commit_is_identity() {
        let raw: &[u8] = b"tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147\n\
            parent 206941306e8a8af65b66eaaaea388a7ae24d49a0\n\
            parent 66023e6f4c4ad44eb47797771e5e2b77d0eb0bf8\n\
            gpgsig -----BEGIN PGP SIGNATURE-----\n \n iQIzBAAB\n -----END PGP SIGNATURE-----\n\
            \n\
            Merge branch 'feature'\n";
        let kvlm = Kvlm::parse(raw).unwrap();
        assert_eq!(kvlm.serialize(), raw);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[test]
    fn get_on_missing_key_is_none() {
        let kvlm = Kvlm::parse(b"\nmsg").unwrap();
        assert!(kvlm.get(b"tree").is_none());
        assert!(kvlm.get_all(b"parent").is_empty());
    }

    #[test]
    fn push_preserves_first_seen_order() {
        let mut kvlm = Kvlm::new();
        kvlm.push(b"b".as_slice(), b"1".as_slice());
        kvlm.push(b"a".as_slice(), b"2".as_slice());
        kvlm.push(b"b".as_slice(), b"3".as_slice());
        assert_eq!(kvlm.fields[0].0, b"b");
        assert_eq!(kvlm.fields[1].0, b"a");
        assert_eq!(kvlm.get_all(b"b"), vec![&b"1"[..], &b"3"[..]]);
    }

    // -----------------------------------------------------------------------
    // Round-trip property
    // -----------------------------------------------------------------------

    prop_compose! {
        // Keys: non-empty, no space/newline/NUL. Values: no NUL; newlines
        // allowed (they exercise the continuation convention).
        fn arb_kvlm()(
            keys in proptest::collection::vec("[a-z]{1,10}", 0..6),
            values in proptest::collection::vec(
                proptest::collection::vec(prop_oneof![Just(b'\n'), 32u8..=126], 0..24),
                0..12,
            ),
            message in proptest::collection::vec(prop_oneof![Just(b'\n'), 32u8..=126], 0..64),
        ) -> Kvlm {
            let mut kvlm = Kvlm::new();
            for (i, value) in values.into_iter().enumerate() {
                if keys.is_empty() { break; }
                let key = keys[i % keys.len()].clone().into_bytes();
                kvlm.push(key, value);
            }
            kvlm.set_message(message);
            kvlm
        }
    }

    proptest! {
        #[test]
        fn kvlm_roundtrip(kvlm in arb_kvlm()) {
            let parsed = Kvlm::parse(&kvlm.serialize()).unwrap();
            prop_assert_eq!(parsed, kvlm);
        }
    }
}

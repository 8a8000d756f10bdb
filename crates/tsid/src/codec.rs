use crate::{Error, Tsid};
use core::fmt;

const ALPHABET: &[u8; 16] = b"0123456789ABCDEF";
const NO_VALUE: u8 = 255;

/// Lookup table for case-insensitive hex decoding.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 16 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    lut
};

/// Byte offsets of the group separators in the canonical form.
const fn is_separator(index: usize) -> bool {
    matches!(index, 4 | 9 | 14)
}

/// Renders `raw` as 16 uppercase hex digits with a hyphen after every block
/// of four. `buf` must be pre-filled with `b'-'`.
fn write_canonical(raw: u64, buf: &mut [u8; Tsid::ENCODED_LEN]) {
    let mut out = 0;
    for i in 0..16 {
        if is_separator(out) {
            out += 1;
        }
        let nibble = (raw >> (60 - 4 * i)) & 0xF;
        buf[out] = ALPHABET[nibble as usize];
        out += 1;
    }
}

impl Tsid {
    /// Length of the canonical string form: 16 hex digits plus 3 hyphens.
    pub const ENCODED_LEN: usize = 19;

    /// Encodes this ID into its canonical string form.
    ///
    /// The canonical form is 16 uppercase hexadecimal digits, zero-padded and
    /// grouped as `HHHH-HHHH-HHHH-HHHH`. Encoding preserves ordering: the
    /// canonical strings of two valid IDs compare the same way as the IDs
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Negative`] if the raw value has its sign bit set.
    /// Generators never produce such values; they can only be introduced via
    /// [`Tsid::from_raw`].
    ///
    /// # Example
    ///
    /// ```
    /// use tsid::Tsid;
    ///
    /// let id = Tsid::from_raw(0x0123_4567_89AB_CDEF);
    /// assert_eq!(id.encode().unwrap(), "0123-4567-89AB-CDEF");
    /// assert!(Tsid::from_raw(-1).encode().is_err());
    /// ```
    pub fn encode(&self) -> Result<String, Error> {
        if !self.is_valid() {
            return Err(Error::Negative { raw: self.to_raw() });
        }
        let mut buf = [b'-'; Self::ENCODED_LEN];
        write_canonical(self.to_raw() as u64, &mut buf);

        // SAFETY: the buffer holds only hex digits and hyphens, always ASCII.
        Ok(unsafe { String::from_utf8_unchecked(buf.to_vec()) })
    }

    /// Parses a canonical string back into an ID.
    ///
    /// The match is strict: exactly 19 ASCII characters, hyphens after every
    /// block of four hex digits, nothing else - no surrounding or embedded
    /// whitespace of any kind. Hex digits are accepted case-insensitively.
    /// Strings whose top bit would be set (first byte above `7F`) decode to
    /// `None`, mirroring the non-negative domain of [`Tsid::encode`].
    ///
    /// All failures are reported uniformly as `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use tsid::Tsid;
    ///
    /// let id = Tsid::decode("0123-4567-89ab-cdef").unwrap();
    /// assert_eq!(id.to_raw(), 0x0123_4567_89AB_CDEF);
    ///
    /// assert!(Tsid::decode("0123456789ABCDEF").is_none());
    /// assert!(Tsid::decode("FFFF-FFFF-FFFF-FFFF").is_none());
    /// ```
    #[must_use]
    pub fn decode(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != Self::ENCODED_LEN {
            return None;
        }

        let mut acc = 0_u64;
        for (i, &b) in bytes.iter().enumerate() {
            if is_separator(i) {
                if b != b'-' {
                    return None;
                }
                continue;
            }
            let val = LOOKUP[b as usize];
            if val == NO_VALUE {
                return None;
            }
            acc = (acc << 4) | u64::from(val);
        }

        // Reject would-be-negative values.
        if acc > i64::MAX as u64 {
            return None;
        }

        Some(Self::from_raw(acc as i64))
    }
}

impl fmt::Display for Tsid {
    /// Writes the canonical form. A raw value with the sign bit set (never
    /// produced by a generator) is rendered with the bit cleared.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [b'-'; Self::ENCODED_LEN];
        write_canonical(self.into_valid().to_raw() as u64, &mut buf);

        // SAFETY: the buffer holds only hex digits and hyphens, always ASCII.
        f.write_str(unsafe { core::str::from_utf8_unchecked(&buf) })
    }
}

impl PartialEq<str> for Tsid {
    fn eq(&self, other: &str) -> bool {
        Self::decode(other).is_some_and(|id| id == *self)
    }
}

impl PartialEq<&str> for Tsid {
    fn eq(&self, other: &&str) -> bool {
        self.eq(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTORS: &[(i64, &str)] = &[
        (0, "0000-0000-0000-0000"),
        (1, "0000-0000-0000-0001"),
        (0xCDEF, "0000-0000-0000-CDEF"),
        (0x0123_4567_89AB_CDEF, "0123-4567-89AB-CDEF"),
        (i64::MAX - 1, "7FFF-FFFF-FFFF-FFFE"),
        (i64::MAX, "7FFF-FFFF-FFFF-FFFF"),
    ];

    #[test]
    fn encode_produces_canonical_vectors() {
        for &(raw, canonical) in VECTORS {
            assert_eq!(Tsid::from_raw(raw).encode().unwrap(), canonical);
        }
    }

    #[test]
    fn decode_accepts_canonical_vectors() {
        for &(raw, canonical) in VECTORS {
            assert_eq!(Tsid::decode(canonical).unwrap().to_raw(), raw);
        }
    }

    #[test]
    fn roundtrip_preserves_the_value() {
        for &(raw, _) in VECTORS {
            let id = Tsid::from_raw(raw);
            assert_eq!(Tsid::decode(&id.encode().unwrap()), Some(id));
        }
    }

    #[test]
    fn decode_is_case_insensitive() {
        for input in [
            "0000-0000-0000-cdef",
            "0000-0000-0000-CDEF",
            "0000-0000-0000-CdEf",
        ] {
            assert_eq!(Tsid::decode(input).unwrap().to_raw(), 0xCDEF);
        }
        assert_eq!(
            Tsid::decode("0123-4567-89Ab-CdEf").unwrap().to_raw(),
            0x0123_4567_89AB_CDEF
        );
    }

    #[test]
    fn accepted_input_canonicalizes_to_uppercase() {
        for input in ["0123-4567-89ab-cdef", "7fff-ffff-ffff-fffe"] {
            let id = Tsid::decode(input).unwrap();
            assert_eq!(id.encode().unwrap(), input.to_uppercase());
        }
    }

    #[test]
    fn encode_rejects_negative_values() {
        for raw in [-1, -0xCDEF, i64::MIN, i64::MIN + 1] {
            assert_eq!(
                Tsid::from_raw(raw).encode(),
                Err(Error::Negative { raw }),
                "expected range error for {raw}"
            );
        }
    }

    #[test]
    fn decode_rejects_malformed_input() {
        let cases: &[&str] = &[
            "",
            "0",
            "0000",
            "0000-0000-0000",           // too few groups
            "0000-0000-0000-0000-0000", // too many groups
            " 0000-0000-0000-0000",     // leading space
            "\t0000-0000-0000-0000",    // leading tab
            "\n0000-0000-0000-0000",    // leading newline
            "\r\n0000-0000-0000-0000",  // leading windows newline
            "0000-0000 0000-0000",      // space in the middle
            "0000-0000\t0000-0000",     // tab in the middle
            "0000-0000\n0000-0000",     // newline in the middle
            "0000-0000\r\n0000-0000",   // windows newline in the middle
            "0000-0000-0000-0000 ",     // trailing space
            "0000-0000-0000-0000\t",    // trailing tab
            "0000-0000-0000-0000\n",    // trailing newline
            "8000-0000-0000-0000",      // top bit set (i64::MIN)
            "FFFF-FFFF-FFFF-FFFF",      // top bit set (-1)
            "0000-0000-0000-000N",      // non-hex digit
            "01234567890123456789",     // 20 chars, no separators
            "0000_0000_0000_0000",      // wrong separator
            "0000-0000-0000-000",       // one digit short
            "00000-0000-0000-000",      // separator misplaced
        ];
        for case in cases {
            assert_eq!(Tsid::decode(case), None, "expected rejection of {case:?}");
        }
    }

    #[test]
    fn display_matches_the_canonical_form() {
        assert_eq!(
            Tsid::from_raw(0xCDEF).to_string(),
            "0000-0000-0000-CDEF"
        );
        // Sign-bit inputs render with the guard cleared.
        assert_eq!(
            Tsid::from_raw(-1).to_string(),
            "7FFF-FFFF-FFFF-FFFF"
        );
    }

    #[test]
    fn compares_against_canonical_strings() {
        let id = Tsid::from_raw(0xCDEF);
        assert!(id == "0000-0000-0000-CDEF");
        assert!(id == "0000-0000-0000-cdef");
        assert!(id != "0000-0000-0000-0001");
        assert!(id != "not a tsid");
    }
}

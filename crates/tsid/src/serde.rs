use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes a [`Tsid`] as its raw `i64` value.
///
/// Deserialization validates the sign guard: negative numbers are rejected.
///
/// [`Tsid`]: crate::Tsid
pub mod as_raw {
    use super::*;
    use crate::{Error, Tsid};

    pub fn serialize<S>(id: &Tsid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Tsid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(d)?;
        let id = Tsid::from_raw(raw);
        if !id.is_valid() {
            return Err(serde::de::Error::custom(Error::Negative { raw }));
        }
        Ok(id)
    }
}

/// Serializes a [`Tsid`] as its canonical `HHHH-HHHH-HHHH-HHHH` string.
///
/// Deserialization applies the strict codec grammar via [`Tsid::decode`].
///
/// [`Tsid`]: crate::Tsid
/// [`Tsid::decode`]: crate::Tsid::decode
pub mod as_canonical {
    use super::*;
    use crate::Tsid;

    pub fn serialize<S>(id: &Tsid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = id.encode().map_err(serde::ser::Error::custom)?;
        s.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Tsid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CanonicalVisitor;

        impl serde::de::Visitor<'_> for CanonicalVisitor {
            type Value = Tsid;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a canonical HHHH-HHHH-HHHH-HHHH tsid string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Tsid::decode(v).ok_or_else(|| E::custom("malformed tsid"))
            }
        }

        d.deserialize_str(CanonicalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tsid;

    #[test]
    fn raw_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_raw")]
            event_id: Tsid,
        }
        let row = Row {
            event_id: Tsid::from_raw(0xCDEF),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":52719}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn raw_rejects_negative_values() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_raw")]
            event_id: Tsid,
        }

        let err = serde_json::from_str::<Row>(r#"{"event_id":-1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn canonical_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_canonical")]
            event_id: Tsid,
        }
        let row = Row {
            event_id: Tsid::from_raw(0x0123_4567_89AB_CDEF),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":"0123-4567-89AB-CDEF"}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn canonical_rejects_malformed_strings() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_canonical")]
            event_id: Tsid,
        }

        for input in [
            r#"{"event_id":"0123456789ABCDEF"}"#,
            r#"{"event_id":"FFFF-FFFF-FFFF-FFFF"}"#,
            r#"{"event_id":" 0000-0000-0000-0000"}"#,
        ] {
            assert!(serde_json::from_str::<Row>(input).is_err(), "{input}");
        }
    }
}

//! Request signature for the upstream catalog API.
//!
//! Every call carries `apikey`, `ts` and `hash` query parameters, where
//! the hash is the md5 digest of `ts + private_key + public_key` as
//! mandated by the upstream contract.

use chrono::{DateTime, Utc};

/// Build the three authentication query parameters for a request issued
/// at `now`.
pub fn signature_params(
    public_key: &str,
    private_key: &str,
    now: DateTime<Utc>,
) -> [(String, String); 3] {
    let ts = now.timestamp().to_string();
    let digest = md5::compute(format!("{ts}{private_key}{public_key}"));

    [
        ("apikey".to_string(), public_key.to_string()),
        ("ts".to_string(), ts),
        ("hash".to_string(), format!("{digest:x}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_signature_is_md5_of_ts_private_public() {
        let now = Utc.with_ymd_and_hms(2009, 2, 13, 23, 31, 30).unwrap();
        let params = signature_params("1234", "abcd", now);

        assert_eq!(params[0], ("apikey".to_string(), "1234".to_string()));
        assert_eq!(params[1], ("ts".to_string(), "1234567890".to_string()));

        let expected = format!("{:x}", md5::compute("1234567890abcd1234"));
        assert_eq!(params[2], ("hash".to_string(), expected));
    }

    #[test]
    fn test_signature_changes_with_timestamp() {
        let t1 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 1).unwrap();

        let a = signature_params("pub", "priv", t1);
        let b = signature_params("pub", "priv", t2);
        assert_ne!(a[2], b[2]);
    }
}

/// Question ids are PostgreSQL BIGSERIAL values (the in-memory store mirrors them).
pub type DbId = i64;

/// Parse an id taken from a path segment or request body.
///
/// Anything that is not a plain integer (an old ObjectId string, say) has no
/// matching row, so callers treat `None` as "not found".
pub fn parse_id(raw: &str) -> Option<DbId> {
    raw.trim().parse().ok()
}

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("64f1c2e9a1b2c3d4e5f60718"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
    }
}

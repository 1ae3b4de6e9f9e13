use chrono::Utc;

/// Build a `<prefix>-<unix millis>` identifier.
///
/// Two creations inside the same millisecond would collide, so the
/// millisecond component is bumped until `taken` reports the id as free.
pub fn timestamp_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let id = format!("{prefix}-{millis}");
        if !taken(&id) {
            return id;
        }
        millis += 1;
    }
}

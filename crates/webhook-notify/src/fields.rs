use std::collections::BTreeMap;

/// Key seeded into every field set before input lines are applied.
pub const TYPE_KEY: &str = "type";
pub const DEFAULT_TYPE: &str = "application/json";

/// Flat key/value pairs that become the notification body.
pub type FieldSet = BTreeMap<String, String>;

/// Parse newline-delimited `key|value` pairs.
///
/// Each line is split on its first `|`. Lines without a pipe, or with an
/// empty key or value, are skipped. A later duplicate key overwrites an
/// earlier one, including the seeded `type` entry.
pub fn parse_fields(input: &str) -> FieldSet {
    let mut fields = FieldSet::new();
    fields.insert(TYPE_KEY.to_string(), DEFAULT_TYPE.to_string());

    for line in input.split('\n') {
        if let Some((key, value)) = line.split_once('|') {
            if !key.is_empty() && !value.is_empty() {
                fields.insert(key.to_string(), value.to_string());
            }
        }
    }

    fields
}

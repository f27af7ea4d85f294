/// Canonical key form used for all trie and lookup-map keys.
///
/// Lowercases and strips every non-alphanumeric character so that hyphenated,
/// camel-cased and snake-cased spellings of one logical name collide to a
/// single key (`host-name`, `hostName`, `host_name` -> `hostname`). Two
/// *different* fields may also collide this way; the engines resolve that
/// with a first-seen-wins policy.
pub fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

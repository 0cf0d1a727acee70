use std::collections::BTreeMap;

/// Return the first `prefix{n}` key (counting from 0) that `map` does not
/// contain.
///
/// Gaps are filled before the sequence is extended: with `p0` and `p2`
/// present the result is `p1`.
pub fn next_suffixed_key<V>(map: &BTreeMap<String, V>, prefix: &str) -> String {
    let mut index = 0usize;
    loop {
        let key = format!("{prefix}{index}");
        if !map.contains_key(&key) {
            return key;
        }
        index += 1;
    }
}

/// Returns the longest prefix shared by both strings, borrowed from `s1`.
pub fn longest_common_prefix<'a>(s1: &'a str, s2: &str) -> &'a str {
    let mut end = 0;
    for (c1, c2) in s1.chars().zip(s2.chars()) {
        if c1 != c2 {
            break;
        }
        end += c1.len_utf8();
    }
    &s1[..end]
}

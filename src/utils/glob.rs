//! # Glob 패턴 매칭
//!
//! Redis `KEYS` / `SCAN MATCH` 와 같은 규칙으로 키를 패턴에 매칭합니다.
//!
//! | 패턴 | 의미 | 예제 |
//! |------|------|------|
//! | `*` | 0개 이상의 임의 문자 | `user:*` |
//! | `?` | 정확히 1개 문자 | `user:?` |
//! | `[abc]` | a, b, c 중 하나 | `user:[123]` |
//! | `[^a]` | a 를 제외한 문자 | `user:[^0]*` |
//! | `[a-z]` | a부터 z까지 | `user:[a-z]*` |
//! | `\x` | 문자 x 그대로 | `rate\*limit` |

/// 키가 glob 패턴과 일치하는지 확인합니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert!(glob_match("prefix:*", "prefix:a"));
/// assert!(!glob_match("prefix:*", "other:c"));
/// ```
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();
    match_from(&pattern, &key)
}

/// 반복 매칭. `*` 를 만나면 위치를 기억해 두고, 실패하면 가장 최근 `*` 로만 되돌아갑니다.
///
/// `*` 이외의 토큰은 모두 정확히 한 문자를 소비하므로 마지막 `*` 만 다시 시도해도
/// 결과가 같고, 비용은 패턴 길이와 키 길이의 곱을 넘지 않습니다.
fn match_from(pattern: &[char], key: &[char]) -> bool {
    let (mut p, mut k) = (0, 0);
    // (마지막 `*` 다음 패턴 위치, 그 `*` 가 흡수한 키의 끝 위치)
    let mut star: Option<(usize, usize)> = None;

    while k < key.len() {
        if p < pattern.len() && pattern[p] == '*' {
            p += 1;
            star = Some((p, k));
            continue;
        }

        if let Some(next) = match_one(pattern, p, key[k]) {
            p = next;
            k += 1;
            continue;
        }

        match star {
            Some((star_p, star_k)) => {
                star = Some((star_p, star_k + 1));
                p = star_p;
                k = star_k + 1;
            }
            None => return false,
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

/// 패턴 위치 `p` 의 토큰 하나가 `c` 와 일치하면 다음 패턴 위치를 반환합니다.
fn match_one(pattern: &[char], p: usize, c: char) -> Option<usize> {
    match pattern.get(p)? {
        '?' => Some(p + 1),
        '[' => {
            let (matched, next) = match_class(pattern, p + 1, c);
            matched.then_some(next)
        }
        '\\' if p + 1 < pattern.len() => (pattern[p + 1] == c).then_some(p + 2),
        literal => (*literal == c).then_some(p + 1),
    }
}

/// `[` 바로 다음 위치부터 문자 클래스를 해석합니다.
///
/// 반환값은 (일치 여부, 클래스 다음 패턴 위치) 입니다.
/// 닫는 `]` 가 없으면 패턴 끝까지를 클래스로 봅니다.
fn match_class(pattern: &[char], start: usize, c: char) -> (bool, usize) {
    let mut p = start;
    let negate = p < pattern.len() && pattern[p] == '^';
    if negate {
        p += 1;
    }

    let mut matched = false;
    while p < pattern.len() && pattern[p] != ']' {
        if pattern[p] == '\\' && p + 1 < pattern.len() {
            if pattern[p + 1] == c {
                matched = true;
            }
            p += 2;
        } else if p + 2 < pattern.len() && pattern[p + 1] == '-' && pattern[p + 2] != ']' {
            let (mut low, mut high) = (pattern[p], pattern[p + 2]);
            if low > high {
                std::mem::swap(&mut low, &mut high);
            }
            if low <= c && c <= high {
                matched = true;
            }
            p += 3;
        } else {
            if pattern[p] == c {
                matched = true;
            }
            p += 1;
        }
    }

    let next = if p < pattern.len() { p + 1 } else { p };
    (matched != negate, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_star() {
        assert!(glob_match("*", ""));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("prefix:*", "prefix:a"));
        assert!(glob_match("prefix:*", "prefix:"));
        assert!(!glob_match("prefix:*", "other:c"));
        assert!(glob_match("*:b", "prefix:b"));
        assert!(glob_match("a*b*c", "a-x-b-y-c"));
        assert!(!glob_match("a*b*c", "a-x-b-y"));
        assert!(glob_match("a**c", "abc"));
    }

    #[test]
    fn test_question_mark() {
        assert!(glob_match("h?llo", "hello"));
        assert!(glob_match("h?llo", "hallo"));
        assert!(!glob_match("h?llo", "hllo"));
        assert!(!glob_match("h?llo", "heello"));
    }

    #[test]
    fn test_character_classes() {
        assert!(glob_match("h[ae]llo", "hello"));
        assert!(glob_match("h[ae]llo", "hallo"));
        assert!(!glob_match("h[ae]llo", "hillo"));
        assert!(glob_match("h[^e]llo", "hallo"));
        assert!(!glob_match("h[^e]llo", "hello"));
        assert!(glob_match("h[a-b]llo", "hbllo"));
        assert!(!glob_match("h[a-b]llo", "hcllo"));
        assert!(glob_match("h[b-a]llo", "hallo"));
    }

    #[test]
    fn test_escape() {
        assert!(glob_match(r"rate\*limit", "rate*limit"));
        assert!(!glob_match(r"rate\*limit", "rate-limit"));
        assert!(glob_match(r"h[\]]llo", "h]llo"));
    }

    #[test]
    fn test_tokens_after_star() {
        assert!(glob_match("item:*[0-9]", "item:abc7"));
        assert!(!glob_match("item:*[0-9]", "item:abc"));
        assert!(glob_match(r"*\*", "rate*"));
        assert!(!glob_match(r"*\*", "rate"));
        assert!(glob_match("*?", "a"));
        assert!(!glob_match("*?", ""));
        assert!(glob_match("*a*b", "xaxxaxb"));
        assert!(!glob_match("*a*b", "xaxxax"));
    }

    #[test]
    fn test_many_stars_do_not_backtrack_exponentially() {
        let key = "a".repeat(40);
        let started = Instant::now();

        assert!(!glob_match("*a*a*a*a*a*a*a*b", &key));
        assert!(glob_match("*a*a*a*a*a*a*a*", &key));
        assert!(glob_match("*a*a*a*a*a*a*a*b", &format!("{}b", key)));

        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_unicode_keys() {
        assert!(glob_match("사용자:*", "사용자:홍길동"));
        assert!(glob_match("사용자:???", "사용자:홍길동"));
    }
}

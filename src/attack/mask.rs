//! 掩码解析
//!
//! | 占位符 | 字符集 |
//! |---|---|
//! | `?l` | 小写字母 |
//! | `?u` | 大写字母 |
//! | `?d` | 数字 |
//! | `?s` | 常用符号 `!@#$%^&*()_+-=[]{}|;:,.<>?` |
//! | `?a` | 字母 + 数字 + 全部 ASCII 标点 |
//!
//! 其他字符（包括无法识别的 `?x` 中的 `?` 以及结尾的 `?`）都作为单字符字面量。

/// 小写字母
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// 大写字母
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// 数字
pub const DIGITS: &str = "0123456789";
/// `?s` 对应的符号集
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
/// 全部 ASCII 标点（32 个）
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// 把掩码解析为每个位置的候选字符集
///
/// 空掩码返回空列表，由调用方判定为无效配置。
///
/// # Example
///
/// ```rust
/// use passlab::attack::parse_mask;
///
/// let positions = parse_mask("?dA?x");
/// assert_eq!(positions.len(), 4);
/// assert_eq!(positions[0].len(), 10);
/// assert_eq!(positions[1], vec!['A']);
/// assert_eq!(positions[2], vec!['?']);
/// assert_eq!(positions[3], vec!['x']);
/// ```
pub fn parse_mask(mask: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = mask.chars().collect();
    let mut positions = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '?'
            && let Some(class) = chars.get(i + 1).and_then(|&c| placeholder(c))
        {
            positions.push(class);
            i += 2;
            continue;
        }

        positions.push(vec![chars[i]]);
        i += 1;
    }

    positions
}

fn placeholder(c: char) -> Option<Vec<char>> {
    let set: String = match c {
        'l' => LOWERCASE.into(),
        'u' => UPPERCASE.into(),
        'd' => DIGITS.into(),
        's' => SYMBOLS.into(),
        'a' => [LOWERCASE, UPPERCASE, DIGITS, PUNCTUATION].concat(),
        _ => return None,
    };
    Some(set.chars().collect())
}

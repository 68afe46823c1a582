//! 日文字符判定

/// 文本中是否存在平假名/片假名、CJK 统一汉字或 CJK 符号标点
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}

fn is_japanese_char(ch: char) -> bool {
    matches!(ch as u32,
        0x3040..=0x30FF   // 平假名 + 片假名
        | 0x4E00..=0x9FFF // CJK 统一汉字
        | 0x3000..=0x303F // CJK 符号和标点
    )
}

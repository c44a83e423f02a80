//! Output formatting for converted messages.

/// Number of symbols per output group.
pub const GROUP_SIZE: usize = 5;

/// Splits `msg` into groups of `size` symbols separated by single spaces.
///
/// The last group may be shorter. An empty message yields an empty string.
///
/// # Parameters
/// - `msg`: Converted message, without whitespace.
/// - `size`: Symbols per group (must be non-zero).
///
/// # Examples
///
/// ```
/// use enigma::utils::grouping::group;
///
/// assert_eq!(group("QVPQSOKOILPUBKJZPISFXDW", 5), "QVPQS OKOIL PUBKJ ZPISF XDW");
/// ```
pub fn group(msg: &str, size: usize) -> String {
    let chars: Vec<char> = msg.chars().collect();
    chars
        .chunks(size.max(1))
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

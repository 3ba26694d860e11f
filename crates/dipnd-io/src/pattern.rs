use crate::error::IoError;

/// Widest padding a specifier may ask for.
pub const MAX_WIDTH: usize = 64;

/// Expand the integer specifier of a printf-style file name pattern.
///
/// The pattern must contain exactly one `%d`, `%Nd` (space padded to `N`
/// characters) or `%0Nd` (zero padded) specifier. `%%` stands for a literal
/// percent sign. Widths above [`MAX_WIDTH`] are rejected.
///
/// # Examples
///
/// ```
/// use dipnd_io::pattern::format_index;
///
/// assert_eq!(format_index("frames/%05d.tif", 42).unwrap(), "frames/00042.tif");
/// assert_eq!(format_index("img%d.png", 7).unwrap(), "img7.png");
/// ```
pub fn format_index(pattern: &str, index: usize) -> Result<String, IoError> {
    let invalid = || IoError::InvalidPattern(pattern.to_string());

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut expanded = false;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let zero_pad = chars.next_if_eq(&'0').is_some();
        let mut width = 0usize;
        while let Some(digit) = chars.peek().and_then(|d| d.to_digit(10)) {
            chars.next();
            width = width
                .checked_mul(10)
                .and_then(|w| w.checked_add(digit as usize))
                .filter(|&w| w <= MAX_WIDTH)
                .ok_or_else(invalid)?;
        }
        if chars.next() != Some('d') || expanded {
            return Err(invalid());
        }

        if zero_pad {
            out.push_str(&format!("{index:0width$}"));
        } else {
            out.push_str(&format!("{index:>width$}"));
        }
        expanded = true;
    }

    if !expanded {
        return Err(invalid());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specifiers() -> Result<(), IoError> {
        assert_eq!(format_index("%d", 12)?, "12");
        assert_eq!(format_index("a_%04d.tif", 12)?, "a_0012.tif");
        assert_eq!(format_index("a_%4d.tif", 12)?, "a_  12.tif");
        assert_eq!(format_index("%02d", 12345)?, "12345");
        assert_eq!(format_index("100%%_%d", 3)?, "100%_3");
        Ok(())
    }

    #[test]
    fn invalid_patterns() {
        for pattern in ["frame.tif", "%s.tif", "%d_%d.tif", "50%", "%05"] {
            assert!(
                matches!(format_index(pattern, 1), Err(IoError::InvalidPattern(_))),
                "{pattern}"
            );
        }
    }

    #[test]
    fn oversized_widths() -> Result<(), IoError> {
        assert_eq!(format_index("%064d", 5)?.len(), MAX_WIDTH);
        for pattern in ["%065d", "%99999999999999999999d", "%0184467440737095516160d.tif"] {
            assert!(
                matches!(format_index(pattern, 1), Err(IoError::InvalidPattern(_))),
                "{pattern}"
            );
        }
        Ok(())
    }
}

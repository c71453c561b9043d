// the collection of utility functions for bracket-aware string scanning

/// True when every bracket in the string is matched and properly nested.
pub fn has_balanced_brackets(s: &str) -> bool {
    let mut depth: i32 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Finds the rightmost occurrence of any of the given operators at
/// bracket depth zero. The rightmost match makes chained operators of the
/// same precedence associate left when the string is split there.
/// Positions are byte offsets, safe to split the string at.
///
/// A `+`/`-` that is the exponent sign of a float literal (`1e-3`,
/// `2.5E+10`) is not an operator and is skipped.
pub fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let mut bracket_depth = 0;
    let mut last_op_pos = None;
    let mut last_op_char = ' ';
    let mut prev = ' ';
    let mut prev2 = ' ';

    for (i, c) in input.char_indices() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && operators.contains(&c) => {
                let exponent_sign = matches!(c, '+' | '-')
                    && matches!(prev, 'e' | 'E')
                    && (prev2.is_ascii_digit() || prev2 == '.');
                if !exponent_sign {
                    last_op_pos = Some(i);
                    last_op_char = c;
                }
            }
            _ => {}
        }
        prev2 = prev;
        prev = c;
    }

    last_op_pos.map(|pos| (pos, last_op_char))
}

/// Finds the first occurrence of the given char at bracket depth zero,
/// as a byte offset. Splitting `^` here makes chained powers associate
/// right.
pub fn find_char_position_outside_brackets(input: &str, target: char) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && c == target => return Some(i),
            _ => {}
        }
    }
    None
}

/// Byte position of the closing bracket matching the first `(` in the
/// input. Returns None for unbalanced input.
pub fn find_pair_to_this_bracket(input: &str) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input.char_indices() {
        if c == '(' {
            depth += 1;
        } else if c == ')' {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Evenly spaced grid of `num_values` points from `start` to `end`
/// inclusive.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);

    for i in 0..num_values {
        values.push(start + (i as f64) * step);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_brackets() {
        assert!(has_balanced_brackets("(x + (y))"));
        assert!(!has_balanced_brackets("(x + y"));
        assert!(!has_balanced_brackets("x + y)"));
        assert!(!has_balanced_brackets(")x("));
    }

    #[test]
    fn test_rightmost_operator_skips_brackets() {
        let (pos, op) =
            find_rightmost_operator_outside_brackets("sin(x + 1) - 2", &['+', '-']).unwrap();
        assert_eq!(op, '-');
        assert_eq!(pos, 11);
    }

    #[test]
    fn test_rightmost_operator_picks_last() {
        let (pos, op) = find_rightmost_operator_outside_brackets("a - b + c", &['+', '-']).unwrap();
        assert_eq!(op, '+');
        assert_eq!(pos, 6);
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        // U+00A0 is two bytes; the reported position must still be a
        // valid split point
        let input = "x\u{00A0}+ 2";
        let (pos, op) = find_rightmost_operator_outside_brackets(input, &['+', '-']).unwrap();
        assert_eq!(op, '+');
        assert_eq!(&input[..pos], "x\u{00A0}");
        assert_eq!(&input[pos + 1..], " 2");

        let pos = find_char_position_outside_brackets("\u{00A0}x^2", '^').unwrap();
        assert_eq!(&"\u{00A0}x^2"[pos + 1..], "2");
    }

    #[test]
    fn test_rightmost_operator_skips_exponent_sign() {
        let (pos, op) =
            find_rightmost_operator_outside_brackets("x + 1e-3", &['+', '-']).unwrap();
        assert_eq!(op, '+');
        assert_eq!(pos, 2);
        assert!(find_rightmost_operator_outside_brackets("1e-3", &['+', '-']).is_none());
    }

    #[test]
    fn test_char_position_outside_brackets() {
        assert_eq!(find_char_position_outside_brackets("(a^b)^c", '^'), Some(5));
        assert_eq!(find_char_position_outside_brackets("(a^b)", '^'), None);
    }

    #[test]
    fn test_find_pair_to_this_bracket() {
        assert_eq!(find_pair_to_this_bracket("exp(x + (y))"), Some(11));
        assert_eq!(find_pair_to_this_bracket("exp(x"), None);
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(0.0, 1.0, 5);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[4], 1.0);
        assert!((grid[2] - 0.5).abs() < 1e-12);
    }
}

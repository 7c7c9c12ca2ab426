use std::io::{self, BufRead};

use super::model::Row;

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Parse one line of the expression table.
///
/// Layout: `<gene_id> <v0> <v1> ...`, separated by any run of whitespace.
/// Values are read like a numeric stream extraction: each token contributes its
/// leading decimal number, and reading stops at the first character that cannot
/// continue one. `5abc` yields `5` and ends the row; `abc` ends it with nothing.
/// Non-finite numbers (`nan`, `inf`, overflow) also end the row. Returns `None`
/// for a blank line.
pub fn parse_row(line: &str) -> Option<Row> {
    let mut tokens = line.split_whitespace();
    let gene_id = tokens.next()?.to_string();

    let mut values = Vec::new();
    for tok in tokens {
        let len = numeric_prefix_len(tok);
        let Some(value) = tok[..len].parse::<f64>().ok().filter(|v| v.is_finite()) else {
            break;
        };
        values.push(value);
        if len < tok.len() {
            break;
        }
    }

    Some(Row { gene_id, values })
}

/// Byte length of the longest decimal float at the start of `tok`:
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
/// Zero when the token does not start with a number.
fn numeric_prefix_len(tok: &str) -> usize {
    let bytes = tok.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_end = digits_from(i);
    let mut end = int_end;
    let mut mantissa_digits = int_end - i;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }

    end
}

// ---------------------------------------------------------------------------
// Line reading
// ---------------------------------------------------------------------------

/// Iterate the lines of `reader`, decoding invalid UTF-8 lossily instead of failing.
pub fn lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader
        .split(b'\n')
        .map(|chunk| chunk.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

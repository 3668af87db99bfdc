//! Natural ordering for node names.
//!
//! Runs of ASCII digits compare by numeric value, so `Level 2` sorts before
//! `Level 10`. Everything else compares by code point.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Direction used when sorting tree nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Compare two names in this direction.
    ///
    /// Descending swaps the operands instead of reversing the result, which
    /// leaves equal names equal so a stable sort keeps their insertion order.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            SortOrder::Ascending => ordinal_cmp(a, b),
            SortOrder::Descending => ordinal_cmp(b, a),
        }
    }
}

/// Compare two strings in natural order.
///
/// Numeric runs with the same value but different zero padding (`7` and
/// `007`) are ordered by run length as a last resort, so this only returns
/// `Equal` for identical strings.
pub fn ordinal_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    let mut padding = Ordering::Equal;

    loop {
        let (Some(ca), Some(cb)) = (a.chars().next(), b.chars().next()) else {
            return a.len().cmp(&b.len()).then(padding);
        };

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let (run_a, rest_a) = split_digits(a);
            let (run_b, rest_b) = split_digits(b);

            match cmp_digit_runs(run_a, run_b) {
                Ordering::Equal => {
                    if padding == Ordering::Equal {
                        padding = run_a.len().cmp(&run_b.len());
                    }
                }
                ord => return ord,
            }

            a = rest_a;
            b = rest_b;
        } else {
            match ca.cmp(&cb) {
                Ordering::Equal => {
                    a = &a[ca.len_utf8()..];
                    b = &b[cb.len_utf8()..];
                }
                ord => return ord,
            }
        }
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

// Arbitrary length: strip leading zeros, then longer means larger.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

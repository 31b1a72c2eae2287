use std::fmt;

/// Entry count shown in the table footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntrySummary {
    pub shown: usize,
    pub total: usize,
}

impl EntrySummary {
    pub fn is_filtered(&self) -> bool {
        self.shown < self.total
    }
}

impl fmt::Display for EntrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_filtered() {
            write!(
                f,
                "{} of {} entries (filtered)",
                group_thousands(self.shown),
                group_thousands(self.total)
            )
        } else {
            write!(f, "{} entries", group_thousands(self.total))
        }
    }
}

/// Formats `n` with `,` between groups of three digits.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

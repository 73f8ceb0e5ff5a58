//! Display formatting for count-up values.

/// When to insert thousands separators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Grouping {
    Always,
    Never,
    /// Only once the rounded value reaches this magnitude.
    AtLeast(f64),
}

/// How a count-up value is shown: `prefix + number + suffix`.
///
/// With `decimals` set the number is printed with that many fractional digits
/// and never grouped; otherwise it is rounded to an integer and grouped per
/// `grouping`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountFormat {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub decimals: Option<u8>,
    pub grouping: Grouping,
}

impl Default for CountFormat {
    fn default() -> Self {
        Self::plain()
    }
}

impl CountFormat {
    pub const fn plain() -> Self {
        Self {
            prefix: "",
            suffix: "",
            decimals: None,
            grouping: Grouping::Never,
        }
    }

    pub const fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub const fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    pub const fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub const fn grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn format(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, self.number(value), self.suffix)
    }

    /// `low–high` sharing one prefix and suffix, e.g. `15–20%`.
    pub fn format_range(&self, low: f64, high: f64) -> String {
        format!(
            "{}{}\u{2013}{}{}",
            self.prefix,
            self.number(low),
            self.number(high),
            self.suffix
        )
    }

    fn number(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        match self.decimals {
            Some(d) => format!("{:.*}", d as usize, value),
            None => {
                let rounded = value.round();
                let grouped = match self.grouping {
                    Grouping::Always => true,
                    Grouping::Never => false,
                    Grouping::AtLeast(min) => rounded.abs() >= min,
                };
                let n = rounded as i64;
                if grouped { group_thousands(n) } else { n.to_string() }
            }
        }
    }
}

pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn grouping_modes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1001), "1,001");
        assert_eq!(group_thousands(-1234567), "-1,234,567");

        let roadmap = CountFormat::plain().grouping(Grouping::AtLeast(1000.0));
        assert_eq!(roadmap.format(100.6), "101");
        assert_eq!(roadmap.format(1000.9), "1,001");
        assert_eq!(CountFormat::plain().grouping(Grouping::Always).format(12345.0), "12,345");
        assert_eq!(CountFormat::plain().format(12345.0), "12345");
    }

    #[test]
    fn decimals_prefix_suffix() {
        let lease = CountFormat::plain()
            .prefix("Close to PHP ")
            .suffix(" Billion")
            .decimals(1);
        assert_eq!(lease.format(0.0), "Close to PHP 0.0 Billion");
        assert_eq!(lease.format(4.4), "Close to PHP 4.4 Billion");
        assert_eq!(CountFormat::plain().suffix("+").format(89.5), "90+");
    }

    #[test]
    fn ranges() {
        let pct = CountFormat::plain().suffix("%");
        assert_eq!(pct.format_range(15.0, 20.0), "15–20%");
        assert_eq!(pct.format_range(7.4, 9.6), "7–10%");
    }

    #[test]
    fn non_finite_values_show_zero() {
        assert_eq!(CountFormat::plain().format(f64::NAN), "0");
    }

    proptest! {
        #[test]
        fn grouping_only_inserts_separators(n in -10_000_000_000i64..10_000_000_000) {
            let grouped = group_thousands(n);
            prop_assert_eq!(grouped.replace(',', ""), n.to_string());
            for chunk in grouped.trim_start_matches('-').split(',').skip(1) {
                prop_assert_eq!(chunk.len(), 3);
            }
        }
    }
}

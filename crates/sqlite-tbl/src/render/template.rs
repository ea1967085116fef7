//! printf-style templates for numeric cells.
//!
//! A template carries literal text around exactly one conversion, e.g.
//! `"$%'.2f"`. The `'` flag groups integer digits in threes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const GROUP_SEPARATOR: char = ',';
const DEFAULT_PRECISION: usize = 6;
/// Upper bound for a width or precision.
const MAX_FIELD: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template '{0}' has no conversion")]
    NoConversion(String),

    #[error("template '{0}' has more than one conversion")]
    MultipleConversions(String),

    #[error("template '{template}': unsupported conversion '%{conv}'")]
    UnsupportedConversion { template: String, conv: char },

    #[error("template '{0}' is truncated")]
    Truncated(String),

    #[error("template '{0}': '*' width or precision is not supported")]
    StarArgument(String),

    #[error("template '{template}': width or precision exceeds {max}")]
    TooWide { template: String, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Decimal,
    Unsigned,
    Octal,
    Hex { upper: bool },
    Fixed { upper: bool },
    Exponent { upper: bool },
    General { upper: bool },
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'd' | 'i' => Conversion::Decimal,
            'u' => Conversion::Unsigned,
            'o' => Conversion::Octal,
            'x' => Conversion::Hex { upper: false },
            'X' => Conversion::Hex { upper: true },
            'f' => Conversion::Fixed { upper: false },
            'F' => Conversion::Fixed { upper: true },
            'e' => Conversion::Exponent { upper: false },
            'E' => Conversion::Exponent { upper: true },
            'g' => Conversion::General { upper: false },
            'G' => Conversion::General { upper: true },
            _ => return None,
        })
    }

    fn is_float(self) -> bool {
        matches!(
            self,
            Conversion::Fixed { .. } | Conversion::Exponent { .. } | Conversion::General { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags {
    group: bool,
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Spec {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    conv: Conversion,
}

/// A parsed numeric template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericTemplate {
    source: String,
    prefix: String,
    spec: Spec,
    suffix: String,
}

impl NumericTemplate {
    /// `%'d`, the default for integer cells.
    pub fn grouped_integer() -> Self {
        Self::bare("%'d", Conversion::Decimal)
    }

    /// `%'f`, the default for float cells.
    pub fn grouped_float() -> Self {
        Self::bare("%'f", Conversion::Fixed { upper: false })
    }

    fn bare(source: &str, conv: Conversion) -> Self {
        Self {
            source: source.to_string(),
            prefix: String::new(),
            spec: Spec {
                flags: Flags {
                    group: true,
                    ..Flags::default()
                },
                width: 0,
                precision: None,
                conv,
            },
            suffix: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn format_int(&self, value: i64) -> String {
        let body = if self.spec.conv.is_float() {
            self.spec.float_body(value as f64)
        } else {
            self.spec.int_body(value)
        };
        self.wrap(body)
    }

    pub fn format_float(&self, value: f64) -> String {
        let body = if self.spec.conv.is_float() {
            self.spec.float_body(value)
        } else {
            // `as` truncates toward zero and saturates; NaN becomes 0.
            self.spec.int_body(value as i64)
        };
        self.wrap(body)
    }

    fn wrap(&self, body: String) -> String {
        let mut out = String::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(&body);
        out.push_str(&self.suffix);
        out
    }
}

impl fmt::Display for NumericTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericTemplate {
    type Err = TemplateError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let literal = if spec.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }
            if spec.is_some() {
                return Err(TemplateError::MultipleConversions(template.to_string()));
            }
            spec = Some(parse_spec(template, &mut chars)?);
        }

        let spec = spec.ok_or_else(|| TemplateError::NoConversion(template.to_string()))?;
        Ok(Self {
            source: template.to_string(),
            prefix,
            spec,
            suffix,
        })
    }
}

fn parse_spec(
    template: &str,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<Spec, TemplateError> {
    let mut flags = Flags::default();
    while let Some(&c) = chars.peek() {
        match c {
            '\'' => flags.group = true,
            '-' => flags.left = true,
            '+' => flags.plus = true,
            ' ' => flags.space = true,
            '0' => flags.zero = true,
            '#' => flags.alt = true,
            _ => break,
        }
        chars.next();
    }

    let width = take_number(chars);
    let precision = if chars.peek() == Some(&'.') {
        chars.next();
        Some(take_number(chars))
    } else {
        None
    };
    if chars.peek() == Some(&'*') {
        return Err(TemplateError::StarArgument(template.to_string()));
    }
    if width > MAX_FIELD || precision.is_some_and(|p| p > MAX_FIELD) {
        return Err(TemplateError::TooWide {
            template: template.to_string(),
            max: MAX_FIELD,
        });
    }

    while matches!(chars.peek(), Some('h' | 'l' | 'L' | 'q' | 'j' | 'z' | 't')) {
        chars.next();
    }

    let conv = chars
        .next()
        .ok_or_else(|| TemplateError::Truncated(template.to_string()))?;
    let conv = Conversion::from_char(conv).ok_or_else(|| TemplateError::UnsupportedConversion {
        template: template.to_string(),
        conv,
    })?;

    Ok(Spec {
        flags,
        width,
        precision,
        conv,
    })
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> usize {
    let mut n = 0usize;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(d as usize);
        chars.next();
    }
    n
}

impl Spec {
    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        }
    }

    fn int_body(&self, value: i64) -> String {
        let (sign, prefix, mut digits) = match self.conv {
            Conversion::Decimal => {
                let digits = value.unsigned_abs().to_string();
                (self.sign(value < 0), "", digits)
            }
            Conversion::Unsigned => ("", "", (value as u64).to_string()),
            Conversion::Octal => {
                let digits = format!("{:o}", value as u64);
                let prefix = if self.flags.alt && value != 0 { "0" } else { "" };
                ("", prefix, digits)
            }
            Conversion::Hex { upper } => {
                let digits = if upper {
                    format!("{:X}", value as u64)
                } else {
                    format!("{:x}", value as u64)
                };
                let prefix = match (self.flags.alt && value != 0, upper) {
                    (false, _) => "",
                    (true, false) => "0x",
                    (true, true) => "0X",
                };
                ("", prefix, digits)
            }
            _ => unreachable!("float conversion routed to int_body"),
        };

        if let Some(p) = self.precision {
            if p == 0 && value == 0 {
                digits.clear();
            } else if digits.len() < p {
                digits = format!("{}{digits}", "0".repeat(p - digits.len()));
            }
        }
        if self.flags.group && matches!(self.conv, Conversion::Decimal | Conversion::Unsigned) {
            digits = group_digits(&digits);
        }

        // C ignores the 0 flag for integers when a precision is given.
        let zero_pad = self.flags.zero && self.precision.is_none();
        self.pad(sign, prefix, digits, zero_pad)
    }

    fn float_body(&self, value: f64) -> String {
        let upper = matches!(
            self.conv,
            Conversion::Fixed { upper: true }
                | Conversion::Exponent { upper: true }
                | Conversion::General { upper: true }
        );
        let negative = value.is_sign_negative() && !value.is_nan();
        let sign = self.sign(negative);

        if !value.is_finite() {
            let text = if value.is_nan() { "nan" } else { "inf" };
            let text = if upper { text.to_uppercase() } else { text.to_string() };
            return self.pad(sign, "", text, false);
        }

        let magnitude = value.abs();
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        let body = match self.conv {
            Conversion::Fixed { .. } => self.fixed(magnitude, precision),
            Conversion::Exponent { upper } => self.exponent(magnitude, precision, upper),
            Conversion::General { upper } => self.general(magnitude, precision, upper),
            _ => unreachable!("integer conversion routed to float_body"),
        };
        self.pad(sign, "", body, self.flags.zero)
    }

    fn fixed(&self, magnitude: f64, precision: usize) -> String {
        let mut text = format!("{magnitude:.precision$}");
        if precision == 0 && self.flags.alt {
            text.push('.');
        }
        if self.flags.group {
            text = group_number(&text);
        }
        text
    }

    fn exponent(&self, magnitude: f64, precision: usize, upper: bool) -> String {
        let text = format!("{magnitude:.precision$e}");
        let (mantissa, exp) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let mut mantissa = mantissa.to_string();
        if precision == 0 && self.flags.alt {
            mantissa.push('.');
        }
        c_exponent(&mantissa, exp, upper)
    }

    fn general(&self, magnitude: f64, precision: usize, upper: bool) -> String {
        let p = precision.max(1);
        // The exponent C would print for %e at precision p - 1.
        let sci = format!("{magnitude:.prec$e}", prec = p - 1);
        let x: i64 = sci
            .split_once('e')
            .and_then(|(_, e)| e.parse().ok())
            .unwrap_or(0);

        if x < -4 || x >= p as i64 {
            let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
            let mantissa = if self.flags.alt {
                mantissa.to_string()
            } else {
                trim_fraction(mantissa)
            };
            return c_exponent(&mantissa, exp, upper);
        }

        let prec = (p as i64 - 1 - x) as usize;
        let mut text = format!("{magnitude:.prec$}");
        if !self.flags.alt {
            text = trim_fraction(&text);
        }
        if self.flags.group {
            text = group_number(&text);
        }
        text
    }

    fn pad(&self, sign: &str, prefix: &str, body: String, zero_pad: bool) -> String {
        let len = sign.chars().count() + prefix.len() + body.chars().count();
        let fill = self.width.saturating_sub(len);
        if fill == 0 {
            return format!("{sign}{prefix}{body}");
        }
        if self.flags.left {
            format!("{sign}{prefix}{body}{}", " ".repeat(fill))
        } else if zero_pad {
            format!("{sign}{prefix}{}{body}", "0".repeat(fill))
        } else {
            format!("{}{sign}{prefix}{body}", " ".repeat(fill))
        }
    }
}

fn c_exponent(mantissa: &str, exp: &str, upper: bool) -> String {
    let (exp_sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{exp_sign}{digits:0>2}")
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

/// Inserts group separators into a run of ASCII digits.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Groups the integer part of an unsigned decimal number, leaving the fraction alone.
fn group_number(text: &str) -> String {
    match text.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_digits(int)),
        None => group_digits(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NumericTemplate {
        s.parse().unwrap()
    }

    #[test]
    fn test_defaults_match_their_source() {
        assert_eq!(NumericTemplate::grouped_integer(), t("%'d"));
        assert_eq!(NumericTemplate::grouped_float(), t("%'f"));
    }

    #[test]
    fn test_grouped_integers() {
        assert_eq!(t("%'d").format_int(0), "0");
        assert_eq!(t("%'d").format_int(999), "999");
        assert_eq!(t("%'d").format_int(1000), "1,000");
        assert_eq!(t("%'d").format_int(-1234567), "-1,234,567");
        assert_eq!(t("%d").format_int(1234567), "1234567");
    }

    #[test]
    fn test_integer_width_and_flags() {
        assert_eq!(t("%5d").format_int(42), "   42");
        assert_eq!(t("%-5d|").format_int(42), "42   |");
        assert_eq!(t("%05d").format_int(-42), "-0042");
        assert_eq!(t("%+d").format_int(7), "+7");
        assert_eq!(t("%.3d").format_int(7), "007");
        assert_eq!(t("%#x").format_int(255), "0xff");
        assert_eq!(t("%X").format_int(255), "FF");
        assert_eq!(t("%#o").format_int(8), "010");
        assert_eq!(t("%ld").format_int(5), "5");
    }

    #[test]
    fn test_fixed_floats() {
        assert_eq!(t("%f").format_float(1.5), "1.500000");
        assert_eq!(t("%'f").format_float(1234567.25), "1,234,567.250000");
        assert_eq!(t("%'.2f").format_float(-1234.5), "-1,234.50");
        assert_eq!(t("%.0f").format_float(2.4), "2");
        assert_eq!(t("%8.2f").format_float(3.14159), "    3.14");
        assert_eq!(t("%08.2f").format_float(-3.5), "-0003.50");
    }

    #[test]
    fn test_exponent_and_general() {
        assert_eq!(t("%e").format_float(1500.0), "1.500000e+03");
        assert_eq!(t("%.2E").format_float(0.000123), "1.23E-04");
        assert_eq!(t("%g").format_float(100000.0), "100000");
        assert_eq!(t("%g").format_float(1000000.0), "1e+06");
        assert_eq!(t("%g").format_float(0.0001), "0.0001");
        assert_eq!(t("%g").format_float(0.00001), "1e-05");
        assert_eq!(t("%g").format_float(3.25), "3.25");
        assert_eq!(t("%'g").format_float(123456.0), "123,456");
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(t("%f").format_float(f64::NAN), "nan");
        assert_eq!(t("%F").format_float(f64::INFINITY), "INF");
        assert_eq!(t("%f").format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_literal_text_and_percent() {
        assert_eq!(t("$%'.2f").format_float(1234.5), "$1,234.50");
        assert_eq!(t("%d%%").format_int(12), "12%");
        assert_eq!(t("%d").as_str(), "%d");
    }

    #[test]
    fn test_mismatched_value_kinds() {
        assert_eq!(t("%.2f").format_int(3), "3.00");
        assert_eq!(t("%d").format_float(-3.9), "-3");
        assert_eq!(t("%'d").format_float(12345.6), "12,345");
    }

    #[test]
    fn test_rejected_templates() {
        assert!(matches!(
            "plain".parse::<NumericTemplate>(),
            Err(TemplateError::NoConversion(_))
        ));
        assert!(matches!(
            "%d %d".parse::<NumericTemplate>(),
            Err(TemplateError::MultipleConversions(_))
        ));
        assert!(matches!(
            "%s".parse::<NumericTemplate>(),
            Err(TemplateError::UnsupportedConversion { conv: 's', .. })
        ));
        assert!(matches!(
            "%'".parse::<NumericTemplate>(),
            Err(TemplateError::Truncated(_))
        ));
        assert!(matches!(
            "%*d".parse::<NumericTemplate>(),
            Err(TemplateError::StarArgument(_))
        ));
        assert!(matches!(
            "%99999999999999999999d".parse::<NumericTemplate>(),
            Err(TemplateError::TooWide { .. })
        ));
        assert!(matches!(
            "%.70000f".parse::<NumericTemplate>(),
            Err(TemplateError::TooWide { .. })
        ));
        assert_eq!(t("%4096.4096f").format_float(0.0).len(), 4096 + 2);
    }
}

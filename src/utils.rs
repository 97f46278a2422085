use crate::config::{MAX_PRICE, MAX_TEXT_LEN, MAX_YEAR, MIN_YEAR};
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for price parsing
static PRICE_PLAIN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$?(\d+)$").unwrap());
static PRICE_GROUPED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?(\d{1,3}(?:,\d{3})+)$").unwrap());
static PRICE_THOUSANDS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)\$?(\d+)(?:\.(\d))?k$").unwrap());

/// Price parsing error types for better error handling
#[derive(Debug)]
pub enum PriceParseError {
    EmptyInput,
    InvalidFormat(String),
    TooLarge(String),
}

impl std::fmt::Display for PriceParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceParseError::EmptyInput => write!(f, "Price cannot be empty"),
            PriceParseError::InvalidFormat(hint) => write!(f, "Invalid price format. {}", hint),
            PriceParseError::TooLarge(p) => {
                write!(f, "Price {} cannot exceed {}", p, format_price(MAX_PRICE))
            }
        }
    }
}

impl std::error::Error for PriceParseError {}

/// Parse a price in whole currency units.
///
/// Supported formats:
/// - Pure number: "25000"
/// - Grouped with commas: "$25,000" or "25,000"
/// - Thousands shorthand: "25k", "$25.5K"
///
/// # Examples
/// ```
/// use car_tool::utils::parse_price;
/// assert_eq!(parse_price("25000"), Ok(25_000));
/// assert_eq!(parse_price("$25,000"), Ok(25_000));
/// assert_eq!(parse_price("25.5k"), Ok(25_500));
/// ```
pub fn parse_price(input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PriceParseError::EmptyInput.to_string());
    }

    let too_large = |digits: &str| PriceParseError::TooLarge(digits.to_string()).to_string();

    let price: u64 = if let Some(captures) = PRICE_PLAIN_REGEX.captures(trimmed) {
        captures[1].parse().map_err(|_| too_large(&captures[1]))?
    } else if let Some(captures) = PRICE_GROUPED_REGEX.captures(trimmed) {
        let digits = captures[1].replace(',', "");
        digits.parse().map_err(|_| too_large(&digits))?
    } else if let Some(captures) = PRICE_THOUSANDS_REGEX.captures(trimmed) {
        let whole: u64 = captures[1].parse().map_err(|_| too_large(&captures[1]))?;
        let tenths: u64 = captures
            .get(2)
            .map_or(Ok(0), |m| m.as_str().parse())
            .map_err(|_| PriceParseError::InvalidFormat("Bad decimal".to_string()).to_string())?;
        whole.saturating_mul(1_000).saturating_add(tenths * 100)
    } else {
        return Err(
            PriceParseError::InvalidFormat("Use: 25000, $25,000, or 25k".to_string()).to_string(),
        );
    };

    if price > MAX_PRICE as u64 {
        return Err(PriceParseError::TooLarge(price.to_string()).to_string());
    }
    Ok(price as u32)
}

/// Render a price with a currency sign and thousands separators.
pub fn format_price(price: u32) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Validate year input
pub fn validate_year(input: &str) -> Result<u32, String> {
    validate_numeric_input(input, Some(MIN_YEAR), Some(MAX_YEAR), "Year")
}

/// Validate a free-text field such as make, model or color
pub fn validate_text_field(input: &str, field_name: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(format!(
            "{} cannot be longer than {} characters",
            field_name, MAX_TEXT_LEN
        ));
    }
    Ok(trimmed.to_string())
}

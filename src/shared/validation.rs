use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for ISO 3166-1 alpha-2 country codes
    /// - Valid: "KR", "US", "JP"
    /// - Invalid: "kr", "USA", "U", "1A"
    pub static ref COUNTRY_CODE_REGEX: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();

    /// Regex for website URLs accepted on services
    /// Must be http(s) with a host part
    pub static ref WEBSITE_REGEX: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
}

use std::sync::OnceLock;

use regex::Regex;

/// Value the model is told to answer with when it finds no price.
pub const NOT_FOUND_SENTINEL: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractedPrice {
    Found(f64),
    NotFound,
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?[0-9]+(\.[0-9]+)?").expect("price pattern is valid"))
}

impl ExtractedPrice {
    /// Reduces a free-text model reply to the first number in it.
    ///
    /// A signed match is treated as the "not found" answer: the sentinel `-1`
    /// and a genuinely negative amount cannot be told apart.
    pub fn from_reply(reply: &str) -> Self {
        let Some(matched) = price_pattern().find(reply) else {
            return ExtractedPrice::NotFound;
        };
        let literal = matched.as_str();
        if literal.starts_with('-') {
            return ExtractedPrice::NotFound;
        }

        match literal.parse::<f64>() {
            Ok(price) => ExtractedPrice::Found(price),
            Err(_) => ExtractedPrice::NotFound,
        }
    }

    /// Numeric form, `-1` when no price was found.
    pub fn value(&self) -> f64 {
        match self {
            ExtractedPrice::Found(price) => *price,
            ExtractedPrice::NotFound => NOT_FOUND_SENTINEL,
        }
    }
}

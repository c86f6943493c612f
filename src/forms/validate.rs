use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A field check. `Err` carries the inline message shown under the input.
pub type Validator = fn(&str) -> Result<(), &'static str>;

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Exactly ten digits once spaces, parentheses and hyphens are dropped.
pub fn is_valid_phone(value: &str) -> bool {
    let digits: Vec<char> = value
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '(' | ')' | '-')))
        .collect();
    digits.len() == 10 && digits.iter().all(char::is_ascii_digit)
}

fn chars(value: &str) -> usize {
    value.trim().chars().count()
}

pub fn contact_name(value: &str) -> Result<(), &'static str> {
    match chars(value) {
        0 => Err("Please enter your name"),
        1 => Err("Name must be at least 2 characters"),
        _ => Ok(()),
    }
}

pub fn contact_email(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Please enter your email")
    } else if !is_valid_email(value) {
        Err("Please enter a valid email")
    } else {
        Ok(())
    }
}

pub fn contact_phone(value: &str) -> Result<(), &'static str> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err("Please enter a valid 10-digit phone number")
    }
}

pub fn contact_subject(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Please enter a subject")
    } else {
        Ok(())
    }
}

pub fn contact_message(value: &str) -> Result<(), &'static str> {
    match chars(value) {
        0 => Err("Please enter your message"),
        n if n < 10 => Err("Message must be at least 10 characters"),
        _ => Ok(()),
    }
}

pub fn inquiry_name(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Name is required")
    } else {
        Ok(())
    }
}

pub fn inquiry_email(value: &str) -> Result<(), &'static str> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err("Valid email is required")
    }
}

pub fn inquiry_phone(value: &str) -> Result<(), &'static str> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err("Valid phone is required")
    }
}

pub fn newsletter_email(value: &str) -> Result<(), &'static str> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err("Please enter a valid email")
    }
}

pub fn required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("This field is required")
    } else {
        Ok(())
    }
}

/// Check run when a contact field loses focus, picked by the input's id.
pub fn on_blur(field_id: &str) -> Validator {
    match field_id {
        "name" => contact_name,
        "email" => contact_email,
        "phone" => contact_phone,
        "message" => contact_message,
        _ => required,
    }
}

// src/persona/prompt.rs
//! Turns a stored persona into the system prompt for the relay.

use crate::persona::types::Persona;

/// Fixed instruction block that precedes the persona details. The relay's
/// whole conditioning contract lives in this one string.
pub const SYSTEM_PROMPT_PREAMBLE: &str = "You are an assistant that should respond like the \
following persona. I will try to approach you for a sale of a product and you should respond \
based on your interest. Try to be realistic and don't say yes every time - you should only \
accept if you need the product. The following is the info for the persona that you are: ";

/// Builds the system prompt: preamble + comma-joined present-only fields in
/// fixed order (Name, Location, Annual Income, Extras). Unset or empty
/// fields are omitted entirely, never emitted blank.
pub fn system_prompt(persona: &Persona) -> String {
    let mut details = vec![format!("Name: {}", persona.name)];

    if let Some(location) = persona.location.as_deref() {
        if !location.is_empty() {
            details.push(format!("Location: {location}"));
        }
    }
    if let Some(income) = persona.annual_income {
        details.push(format!("Annual Income: {}", format_income(income)));
    }
    if let Some(extras) = persona.extras.as_deref() {
        if !extras.is_empty() {
            details.push(format!("Extras: {extras}"));
        }
    }

    format!("{}{}", SYSTEM_PROMPT_PREAMBLE, details.join(", "))
}

/// Whole-number incomes keep a trailing .0 (50000 reads as "50000.0").
fn format_income(income: f64) -> String {
    if income.fract() == 0.0 {
        format!("{income:.1}")
    } else {
        income.to_string()
    }
}

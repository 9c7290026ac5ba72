//! The structural field: moving a named structural element.
//!
//! "Please, lower by 0.2 m the height of beam B125" resolves to element
//! `beam`, element name `B125`, direction `down` and amount `0.2 m`.

use crate::capability::NlpAdapter;
use crate::core::error::PipelineError;
use crate::core::recipe::Recipe;
use crate::core::slots::SlotSet;
use crate::core::step::{text_arg, Step};
use crate::core::SlotValue;
use crate::field::{slot_text, Field};
use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};

pub const NAME: &str = "structural";

pub const ELEMENTS: [&str; 4] = ["wall", "slab", "beam", "column"];

pub const DIRECTIONS: [&str; 6] = ["up", "down", "front", "back", "left", "right"];

/// Intermediate slots that never reach the caller.
pub const DISCARDED: [&str; 4] = ["action", "overall_direction", "amount", "number_unit"];

/// Unit assumed when an amount carries no letters.
pub const DEFAULT_UNIT: &str = "m";

/// Signed or unsigned ASCII decimal anchored at the start of the haystack.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]*\.?[0-9]+").expect("number pattern is valid")
});

/// Builds the structural field.
pub fn field(adapter: Arc<NlpAdapter>) -> Result<Field, PipelineError> {
    let elements: Vec<String> = ELEMENTS.iter().map(|e| e.to_string()).collect();
    let directions: Vec<String> = DIRECTIONS.iter().map(|d| d.to_string()).collect();
    let recipe = recipe(&adapter, &elements, &directions)?;

    Ok(Field::builder(NAME, adapter)
        .elements(elements)
        .directions(directions)
        .recipe(recipe)
        .discard(DISCARDED)
        .summary(summary)
        .finalize(split_number_unit)
        .build())
}

/// The extraction chain. Note that `direction` classifies the answer to
/// "To where?" and `amount` questions the action clause, not the prompt.
pub fn recipe(
    adapter: &Arc<NlpAdapter>,
    elements: &[String],
    directions: &[String],
) -> Result<Recipe, PipelineError> {
    Recipe::builder()
        .step(Step::parse("prompt -> element", {
            let adapter = adapter.clone();
            let elements = elements.to_vec();
            move |args: &[SlotValue]| {
                let prompt = text_arg(args, 0)?;
                let candidate = adapter.best_label(prompt, &elements)?;
                // argmax always picks something; make sure it is really mentioned
                if adapter.is_relevant(prompt, &candidate)? {
                    Ok(Some(SlotValue::from(candidate)))
                } else {
                    Ok(None)
                }
            }
        })?)
        .step(Step::parse("prompt, element -> element_name", {
            let adapter = adapter.clone();
            move |args: &[SlotValue]| {
                let question = format!("Which is the name of the {}?", text_arg(args, 1)?);
                let name = adapter.answer(&question, text_arg(args, 0)?)?;
                Ok(name.split_whitespace().next().map(SlotValue::from))
            }
        })?)
        .step(Step::parse("prompt, element, element_name -> action", {
            let adapter = adapter.clone();
            move |args: &[SlotValue]| {
                let question = format!(
                    "What should we do with the {} {}?",
                    text_arg(args, 1)?,
                    text_arg(args, 2)?
                );
                Ok(Some(SlotValue::from(adapter.answer(
                    &question,
                    text_arg(args, 0)?,
                )?)))
            }
        })?)
        .step(
            Step::parse("prompt -> overall_direction", {
                let adapter = adapter.clone();
                move |args: &[SlotValue]| {
                    let answer = adapter.answer("To where?", text_arg(args, 0)?)?;
                    Ok(Some(SlotValue::from(answer)))
                }
            })?
            .readable("direction"),
        )
        .step(Step::parse("overall_direction -> direction", {
            let adapter = adapter.clone();
            let directions = directions.to_vec();
            move |args: &[SlotValue]| {
                let direction = adapter.best_label(text_arg(args, 0)?, &directions)?;
                Ok(Some(SlotValue::from(direction)))
            }
        })?)
        .step(Step::parse("action -> amount", {
            let adapter = adapter.clone();
            move |args: &[SlotValue]| {
                let amount = adapter.answer("By how much?", text_arg(args, 0)?)?;
                Ok(Some(SlotValue::from(amount)))
            }
        })?)
        .step(
            Step::parse("amount -> number_unit", |args: &[SlotValue]| {
                Ok(amount_breakdown(text_arg(args, 0)?)
                    .map(|(number, unit)| json!([number, unit])))
            })?
            .readable("amount"),
        )
        .build()
}

/// Splits an amount answer into a number and a unit.
///
/// The number is the first decimal not directly preceded by a letter or a
/// colon; the unit is every letter in the text, defaulting to meters.
/// Returns `None` when no number is present.
pub fn amount_breakdown(amount: &str) -> Option<(f64, String)> {
    let mut previous: Option<char> = None;
    let number = amount.char_indices().find_map(|(i, c)| {
        let guarded = previous.is_some_and(|p| p.is_ascii_alphabetic() || p == ':');
        previous = Some(c);
        if guarded {
            return None;
        }
        NUMBER_RE.find(&amount[i..]).map(|m| m.as_str())
    })?;

    let number = number.parse::<f64>().ok().filter(|n| n.is_finite())?;
    let unit: String = amount.chars().filter(|c| c.is_alphabetic()).collect();
    let unit = if unit.is_empty() {
        DEFAULT_UNIT.to_string()
    } else {
        unit
    };
    Some((number, unit))
}

/// Describes the move as far as the slots allow, in a fixed order:
/// element, element name, direction, amount. Stops at the first gap.
pub fn summary(slots: &SlotSet) -> String {
    let mut txt = String::new();
    let Some(element) = slot_text(slots, "element") else {
        return txt;
    };
    txt.push_str(&format!("a {}", element));

    let Some(element_name) = slot_text(slots, "element_name") else {
        return txt;
    };
    txt.push_str(&format!(" named {}", element_name));

    let Some(direction) = slot_text(slots, "direction") else {
        return txt;
    };
    txt.push_str(&format!(" is requested to be moved {}", direction));

    let (Some(number), Some(unit)) = (slot_text(slots, "number"), slot_text(slots, "unit")) else {
        return txt;
    };
    txt.push_str(&format!(" by {} {}", number, unit));
    txt
}

/// Moves the `[number, unit]` pair into separate `number` and `unit` slots.
pub fn split_number_unit(slots: &mut SlotSet) -> Result<(), PipelineError> {
    let pair = slots
        .get("number_unit")
        .and_then(|v| v.as_array())
        .ok_or_else(|| PipelineError::Finalize("number_unit is not a pair".to_string()))?;

    let (number, unit) = match pair.as_slice() {
        [number, SlotValue::String(unit)] if number.is_number() => (number.clone(), unit.clone()),
        _ => {
            return Err(PipelineError::Finalize(format!(
                "malformed number_unit: {}",
                SlotValue::Array(pair.clone())
            )));
        }
    };

    slots.insert("number", number);
    slots.insert("unit", unit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_breakdown() {
        assert_eq!(amount_breakdown("0.2m"), Some((0.2, "m".to_string())));
        assert_eq!(amount_breakdown("1 m"), Some((1.0, "m".to_string())));
        assert_eq!(amount_breakdown("-3.5ft"), Some((-3.5, "ft".to_string())));
        assert_eq!(amount_breakdown("5"), Some((5.0, "m".to_string())));
        assert_eq!(amount_breakdown("0.5m"), Some((0.5, "m".to_string())));
    }

    #[test]
    fn test_amount_breakdown_without_digits() {
        assert_eq!(amount_breakdown("one meter"), None);
        assert_eq!(amount_breakdown(""), None);
    }

    #[test]
    fn test_amount_breakdown_skips_numbers_glued_to_letters() {
        // "B125" is a name, not an amount; only the digits after its first one qualify
        assert_eq!(amount_breakdown("B125"), Some((25.0, "B".to_string())));
        assert_eq!(amount_breakdown("t:3 then 4cm"), Some((4.0, "tthencm".to_string())));
    }

    #[test]
    fn test_amount_breakdown_ignores_non_ascii_digits() {
        assert_eq!(amount_breakdown("٣ or 4 m"), Some((4.0, "orm".to_string())));
        assert_eq!(amount_breakdown("٣ m"), None);
    }

    #[test]
    fn test_amount_breakdown_takes_first_number() {
        assert_eq!(
            amount_breakdown("between 1 and 2 meters"),
            Some((1.0, "betweenandmeters".to_string()))
        );
    }

    #[test]
    fn test_summary_short_circuits() {
        let mut slots = SlotSet::empty();
        assert_eq!(summary(&slots), "");

        slots.insert("element", "beam");
        assert_eq!(summary(&slots), "a beam");

        // direction without element_name is never reached
        slots.insert("direction", "down");
        assert_eq!(summary(&slots), "a beam");

        slots.insert("element_name", "B125");
        assert_eq!(summary(&slots), "a beam named B125 is requested to be moved down");

        slots.insert("number", 0.2);
        slots.insert("unit", "m");
        assert_eq!(
            summary(&slots),
            "a beam named B125 is requested to be moved down by 0.2 m"
        );
    }

    #[test]
    fn test_summary_prints_integral_amounts_with_decimal() {
        let slots: SlotSet = [
            ("element", json!("column")),
            ("element_name", json!("C27")),
            ("direction", json!("left")),
            ("number", json!(1.0)),
            ("unit", json!("m")),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            summary(&slots),
            "a column named C27 is requested to be moved left by 1.0 m"
        );
    }

    #[test]
    fn test_split_number_unit() {
        let mut slots = SlotSet::empty();
        slots.insert("number_unit", json!([0.2, "m"]));
        split_number_unit(&mut slots).unwrap();
        assert_eq!(slots.get("number"), Some(&json!(0.2)));
        assert_eq!(slots.get_str("unit"), Some("m"));
    }

    #[test]
    fn test_split_number_unit_rejects_malformed() {
        let mut slots = SlotSet::empty();
        assert!(split_number_unit(&mut slots).is_err());

        slots.insert("number_unit", json!(["m", 0.2]));
        assert!(matches!(
            split_number_unit(&mut slots),
            Err(PipelineError::Finalize(_))
        ));
    }
}

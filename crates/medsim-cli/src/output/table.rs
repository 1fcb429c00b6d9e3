use std::str::FromStr;

use colored::Colorize;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Fields rendered as percentages with one decimal place.
const PERCENT_FIELDS: [&str; 1] = ["break_even_occupancy"];
/// Fields rendered with two decimals instead of whole currency units.
const DECIMAL_FIELDS: [&str; 2] = ["avg_rent_per_m2_per_month", "rent_to_debt_ratio"];
/// Plain counts, no grouping or rounding.
const COUNT_FIELDS: [&str; 2] = ["required_practitioners", "year"];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            builder.push_record([key.as_str(), &format_field(key, val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    if let Some(Value::Array(schedule)) = envelope.get("schedule") {
        println!();
        print_array_table(schedule);
    }

    if let Some(Value::String(rating)) = envelope.get("cash_flow_rating") {
        let line = format!("Cash flow rating: {}", rating);
        let painted = match rating.as_str() {
            "green" => line.green(),
            "orange" => line.yellow(),
            _ => line.red(),
        };
        println!("\n{}", painted);
    }

    print_findings(envelope, "warnings", "Warnings");
    print_findings(envelope, "errors", "Errors");
}

fn print_findings(envelope: &serde_json::Map<String, Value>, key: &str, title: &str) {
    if let Some(Value::Array(items)) = envelope.get(key) {
        if !items.is_empty() {
            println!("\n{}:", title);
            for item in items {
                if let Value::String(s) = item {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_field(key, val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_field(h, v))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

/// Display formatting only: currency rounded to whole units with thousand
/// grouping, percentages to one decimal. The JSON output keeps the exact
/// values.
fn format_field(key: &str, value: &Value) -> String {
    let Some(d) = decimal_of(value) else {
        return format_value(value);
    };

    if PERCENT_FIELDS.contains(&key) {
        return format!("{:.1}%", d * dec!(100));
    }
    if DECIMAL_FIELDS.contains(&key) {
        return format!("{:.2}", d);
    }
    if COUNT_FIELDS.contains(&key) {
        return d.to_string();
    }
    group_thousands(d.round())
}

/// Decimal values serialise as JSON strings; counts arrive as numbers.
fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn group_thousands(d: Decimal) -> String {
    let raw = d.to_string();
    let (sign, rest) = raw
        .strip_prefix('-')
        .map_or(("", raw.as_str()), |rest| ("-", rest));
    let digits = rest.split_once('.').map_or(rest, |(int_part, _)| int_part);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    format!("{}{}", sign, grouped)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(dec!(735336)), "735 336");
        assert_eq!(group_thousands(dec!(-39600)), "-39 600");
        assert_eq!(group_thousands(dec!(450)), "450");
        assert_eq!(group_thousands(dec!(1000000)), "1 000 000");
    }

    #[test]
    fn test_format_field_percent() {
        let value = Value::String("0.65".to_string());
        assert_eq!(format_field("break_even_occupancy", &value), "65.0%");
    }

    #[test]
    fn test_format_field_currency_rounds_to_unit() {
        let value = Value::String("39600.50".to_string());
        assert_eq!(format_field("landlord_paid", &value), "39 600");
    }
}

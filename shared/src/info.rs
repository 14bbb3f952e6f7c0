use serde_json::{Number, Value};

use crate::geo::Feature;

pub const NAME_KEY: &str = "formal_en";
pub const CONTINENT_KEY: &str = "continent";
pub const INCOME_GROUP_KEY: &str = "income_grp";
pub const POPULATION_KEY: &str = "pop_est";

/// Text shown for a property the feature does not carry.
pub const MISSING: &str = "undefined";

/// Number text as a browser prints it: exponent form outside `[1e-6, 1e21)`.
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    let magnitude = f.abs();
    if f == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

/// Text of a value nested in an array; `null` leaves an empty slot.
fn element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => value_text(other),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(element_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Render a property the way a browser would interpolate it into text.
fn display_value(value: Option<&Value>) -> String {
    value.map(value_text).unwrap_or_else(|| MISSING.to_string())
}

/// Demographic details of one country, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryInfo {
    pub name: String,
    pub income_group: String,
    pub population: String,
    pub continent: String,
}

impl CountryInfo {
    /// Reads the four demographic keys without validating them.
    pub fn from_feature(feature: &Feature) -> Self {
        Self {
            name: display_value(feature.property(NAME_KEY)),
            income_group: display_value(feature.property(INCOME_GROUP_KEY)),
            population: display_value(feature.property(POPULATION_KEY)),
            continent: display_value(feature.property(CONTINENT_KEY)),
        }
    }

    /// Rows below the heading, in display order.
    pub fn rows(&self) -> [(&'static str, &str); 3] {
        [
            ("Income Group", &self.income_group),
            ("Population", &self.population),
            ("Continent", &self.continent),
        ]
    }

    /// Plain-text rendering: heading line, then one `Label: value` line per row.
    pub fn to_text(&self) -> String {
        let mut text = self.name.clone();
        for (label, value) in self.rows() {
            text.push('\n');
            text.push_str(label);
            text.push_str(": ");
            text.push_str(value);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(properties: Value) -> Feature {
        Feature {
            geometry: None,
            properties: properties.as_object().cloned(),
        }
    }

    #[test]
    fn formats_panel_in_template_order() {
        let info = CountryInfo::from_feature(&feature(json!({
            "formal_en": "Republic X",
            "continent": "Asia",
            "income_grp": "High income",
            "pop_est": 123456
        })));
        assert_eq!(
            info.to_text(),
            "Republic X\nIncome Group: High income\nPopulation: 123456\nContinent: Asia"
        );
    }

    #[test]
    fn missing_properties_render_as_undefined() {
        let info = CountryInfo::from_feature(&feature(json!({ "formal_en": "Nowhere" })));
        assert_eq!(info.income_group, "undefined");
        assert_eq!(info.population, "undefined");
        assert_eq!(info.continent, "undefined");

        let bare = CountryInfo::from_feature(&Feature {
            geometry: None,
            properties: None,
        });
        assert_eq!(bare.name, "undefined");
    }

    #[test]
    fn numbers_render_like_browser_text() {
        let info = CountryInfo::from_feature(&feature(json!({
            "pop_est": 1_400_000_000.0,
            "income_grp": null,
            "continent": 2.5
        })));
        assert_eq!(info.population, "1400000000");
        assert_eq!(info.income_group, "null");
        assert_eq!(info.continent, "2.5");
    }

    #[test]
    fn extreme_numbers_use_exponent_form() {
        let info = CountryInfo::from_feature(&feature(json!({
            "pop_est": 1e21,
            "income_grp": 1.5e-7,
            "continent": 123e20
        })));
        assert_eq!(info.population, "1e+21");
        assert_eq!(info.income_group, "1.5e-7");
        assert_eq!(info.continent, "1.23e+22");

        let below = CountryInfo::from_feature(&feature(json!({ "pop_est": 1e20, "continent": 0.000001 })));
        assert_eq!(below.population, "100000000000000000000");
        assert_eq!(below.continent, "0.000001");
    }

    #[test]
    fn arrays_and_objects_render_like_browser_text() {
        let info = CountryInfo::from_feature(&feature(json!({
            "continent": ["Europe", null, 3, [true, "x"]],
            "income_grp": { "tier": 1 },
            "pop_est": []
        })));
        assert_eq!(info.continent, "Europe,,3,true,x");
        assert_eq!(info.income_group, "[object Object]");
        assert_eq!(info.population, "");
    }
}

use serde::Deserialize;

/// Query-string parameters recognised by the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityQuery {
    pub q: Option<String>,
}

impl CityQuery {
    pub fn resolve(&self, default_city: &str) -> String {
        resolve_city(self.q.as_deref(), default_city)
    }
}

/// Pick the city to look up: `q` verbatim when present and non-empty,
/// otherwise the default.
pub fn resolve_city(q: Option<&str>, default_city: &str) -> String {
    match q {
        Some(city) if !city.is_empty() => city.to_string(),
        _ => default_city.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn missing_q_falls_back_to_default() {
        assert_eq!(resolve_city(None, "Nairobi"), "Nairobi");
    }

    #[test]
    fn empty_q_falls_back_to_default() {
        assert_eq!(resolve_city(Some(""), "Nairobi"), "Nairobi");
        assert_eq!(CityQuery { q: Some(String::new()) }.resolve("Nairobi"), "Nairobi");
    }

    #[test]
    fn q_is_not_normalised() {
        assert_eq!(resolve_city(Some("  tokyo "), "Nairobi"), "  tokyo ");
        assert_eq!(resolve_city(Some("São Paulo,BR"), "Nairobi"), "São Paulo,BR");
    }

    #[test]
    fn query_deserialises_with_and_without_q() {
        let query: CityQuery = serde_json::from_value(serde_json::json!({ "q": "Cairo" }))
            .expect("query should deserialise");
        assert_eq!(query.resolve("Nairobi"), "Cairo");

        let query: CityQuery =
            serde_json::from_value(serde_json::json!({})).expect("empty query should deserialise");
        assert_eq!(query.resolve("Nairobi"), "Nairobi");
    }

    proptest! {
        #[test]
        fn any_non_empty_q_is_returned_verbatim(city in ".+") {
            prop_assert_eq!(resolve_city(Some(&city), "Nairobi"), city);
        }
    }
}

//! Unit-of-measure synonym table.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::patterns::UNIT_TOKEN;

/// Built-in synonyms: lower-case spelling -> canonical form.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("шт", "шт."),
    ("штук", "шт."),
    ("м", "м"),
    ("метр", "м"),
    ("кг", "кг"),
    ("килограмм", "кг"),
    ("компл", "компл."),
    ("комплект", "компл."),
];

/// Unit normalizer. Unknown units pass through lower-cased.
#[derive(Debug, Clone)]
pub struct UnitTable {
    aliases: HashMap<String, String>,
}

impl UnitTable {
    /// Table with the built-in synonyms only.
    pub fn new() -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(alias, unit)| (alias.to_string(), unit.to_string()))
            .collect();
        Self { aliases }
    }

    /// Add or override synonyms. Keys are matched case-insensitively.
    ///
    /// Targets are lower-cased and resolved through the table, so every
    /// canonical form normalizes to itself. Targets the canonical item pattern
    /// cannot read back are skipped.
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (alias, unit) in aliases {
            let (alias, unit) = (alias.as_ref().trim(), unit.as_ref().trim());
            if !UNIT_TOKEN.is_match(unit) {
                warn!("unit alias `{}` -> `{}` ignored", alias, unit);
                continue;
            }
            self.aliases.insert(alias.to_lowercase(), unit.to_lowercase());
        }
        self.resolve_chains();
        self
    }

    /// Point every alias at the end of its chain (`час` -> `ч` -> `часы`
    /// becomes `час` -> `часы`) and make each end map to itself.
    fn resolve_chains(&mut self) {
        let mut resolved = HashMap::with_capacity(self.aliases.len());
        for (alias, unit) in &self.aliases {
            let mut unit = unit.clone();
            let mut seen = HashSet::new();
            while let Some(next) = self.aliases.get(&unit) {
                if *next == unit || !seen.insert(unit.clone()) {
                    break;
                }
                unit = next.clone();
            }
            resolved.insert(alias.clone(), unit);
        }

        let ends: Vec<String> = resolved.values().cloned().collect();
        for end in ends {
            if resolved.contains_key(&end) {
                resolved.insert(end.clone(), end);
            }
        }
        self.aliases = resolved;
    }

    /// Canonical spelling of `raw`.
    pub fn normalize(&self, raw: &str) -> String {
        let unit = raw.trim().to_lowercase();
        match self.aliases.get(&unit) {
            Some(canonical) => canonical.clone(),
            None => unit,
        }
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_synonyms() {
        let units = UnitTable::new();
        assert_eq!(units.normalize("шт"), "шт.");
        assert_eq!(units.normalize("ШТУК"), "шт.");
        assert_eq!(units.normalize("Комплект"), "компл.");
        assert_eq!(units.normalize("метр"), "м");
    }

    #[test]
    fn test_unknown_units_pass_through() {
        let units = UnitTable::new();
        assert_eq!(units.normalize("кв.м."), "кв.м.");
        assert_eq!(units.normalize("Шт."), "шт.");
    }

    #[test]
    fn test_custom_aliases_override() {
        let units = UnitTable::new().with_aliases([("Час", "ч"), ("шт", "штука")]);
        assert_eq!(units.normalize("час"), "ч");
        assert_eq!(units.normalize("шт"), "штука");
    }

    #[test]
    fn test_alias_targets_normalize_to_themselves() {
        let units = UnitTable::new().with_aliases([
            ("час", "Ч"),
            ("ч", "часы"),
            ("пог", "шт"),
            ("a", "b"),
            ("b", "a"),
        ]);
        assert_eq!(units.normalize("час"), "часы");
        assert_eq!(units.normalize("пог"), "шт.");

        for raw in ["час", "ч", "пог", "шт", "a", "b", "метр"] {
            let unit = units.normalize(raw);
            assert_eq!(units.normalize(&unit), unit, "{raw}");
        }
    }

    #[test]
    fn test_unreadable_alias_targets_are_skipped() {
        let units = UnitTable::new().with_aliases([("квадрат", "м2"), ("пм", "пог.м")]);
        assert_eq!(units.normalize("квадрат"), "квадрат");
        assert_eq!(units.normalize("пм"), "пог.м");
    }
}

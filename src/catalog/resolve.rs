use crate::catalog::model::{Catalog, SheetDefinition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which fallback tier produced a resolver hit.
pub enum MatchTier {
    /// Both `type_name` and `name` matched.
    Exact,
    /// Only `name` matched.
    Name,
    /// Only `type_name` matched.
    Type,
}

impl Catalog {
    /// Find the sheet definition for a parameter type and parsed name.
    ///
    /// Tiers, most specific first: exact (`type_name` and `name`), name only, type only. Within a
    /// tier the first definition in catalog order wins.
    pub fn resolve(&self, param_type: &str, parsed_name: &str) -> Option<&SheetDefinition> {
        self.resolve_with_tier(param_type, parsed_name)
            .map(|(def, _)| def)
    }

    /// Like [`Catalog::resolve`], also reporting which tier matched.
    pub fn resolve_with_tier(
        &self,
        param_type: &str,
        parsed_name: &str,
    ) -> Option<(&SheetDefinition, MatchTier)> {
        if let Some(def) = self
            .sheets()
            .find(|d| d.type_name == param_type && d.name == parsed_name)
        {
            return Some((def, MatchTier::Exact));
        }
        if let Some(def) = self.sheets().find(|d| d.name == parsed_name) {
            return Some((def, MatchTier::Name));
        }
        self.sheets()
            .find(|d| d.type_name == param_type)
            .map(|def| (def, MatchTier::Type))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/resolve.rs"]
mod tests;

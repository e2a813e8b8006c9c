use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Category, CategoryKind, ModuleCatalog, ModuleKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("category '{category}' is not part of {module}")]
    UnknownCategory { module: ModuleKind, category: Category },
    #[error("'{value}' is not a valid option for '{category}'")]
    NotAvailable { category: Category, value: String },
    #[error("'{category}' accepts at most {max} characters")]
    TooLong { category: Category, max: usize },
    #[error("'{value}' is not a number ({category})")]
    NotANumber { category: Category, value: String },
    #[error("'{category}' must be between {min} and {max}")]
    OutOfRange { category: Category, min: u32, max: u32 },
}

/// Required selections still missing, with the message to show for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incomplete {
    pub missing: Vec<Category>,
    pub message: &'static str,
}

/// Flat field-by-field copy of a selection, used for presets.
pub type Snapshot = BTreeMap<Category, String>;

/// Current choice per category; a missing key means "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    values: BTreeMap<Category, String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.values.get(&category).map(String::as_str)
    }

    pub fn is_set(&self, category: Category) -> bool {
        self.values.contains_key(&category)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Labels currently valid for `category`. Dependent categories yield nothing
    /// while their parent is unset.
    pub fn available_options(
        &self,
        catalog: &ModuleCatalog,
        category: Category,
    ) -> Result<&'static [&'static str], SelectionError> {
        let spec = catalog
            .spec(category)
            .ok_or(SelectionError::UnknownCategory { module: catalog.module, category })?;
        Ok(match spec.kind {
            CategoryKind::Static(values) => values,
            CategoryKind::Dependent { parent } => match self.get(parent) {
                Some(parent_value) => catalog.dependencies.resolve(parent, parent_value, category),
                None => &[],
            },
            CategoryKind::FreeText { suggestions, .. } => suggestions,
            CategoryKind::Number { .. } => &[],
        })
    }

    /// Sets (or with `None`/blank, unsets) a category. When the stored value
    /// changes, every dependent category is unset in the same call. Returns
    /// whether anything changed; on error the state is untouched.
    pub fn select(
        &mut self,
        catalog: &ModuleCatalog,
        category: Category,
        value: Option<&str>,
    ) -> Result<bool, SelectionError> {
        let spec = catalog
            .spec(category)
            .ok_or(SelectionError::UnknownCategory { module: catalog.module, category })?;

        let normalized = match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => None,
            Some(raw) => Some(match spec.kind {
                CategoryKind::Static(_) | CategoryKind::Dependent { .. } => {
                    let options = self.available_options(catalog, category)?;
                    if !options.contains(&raw) {
                        return Err(SelectionError::NotAvailable { category, value: raw.to_string() });
                    }
                    raw.to_string()
                }
                CategoryKind::FreeText { max_len, .. } => {
                    if raw.chars().count() > max_len {
                        return Err(SelectionError::TooLong { category, max: max_len });
                    }
                    raw.to_string()
                }
                CategoryKind::Number { min, max } => {
                    let n: u32 = raw
                        .parse()
                        .map_err(|_| SelectionError::NotANumber { category, value: raw.to_string() })?;
                    if n < min || n > max {
                        return Err(SelectionError::OutOfRange { category, min, max });
                    }
                    n.to_string()
                }
            }),
        };

        if self.get(category) == normalized.as_deref() {
            return Ok(false);
        }
        match normalized {
            Some(v) => {
                self.values.insert(category, v);
            }
            None => {
                self.values.remove(&category);
            }
        }
        for dependent in catalog.dependents_of(category) {
            self.values.remove(&dependent);
        }
        Ok(true)
    }

    /// First unmet requirement: the module's required set, then conditional
    /// requirements in declared order.
    pub fn missing_requirement(&self, catalog: &ModuleCatalog) -> Option<Incomplete> {
        let missing: Vec<Category> = catalog.required.iter().copied().filter(|c| !self.is_set(*c)).collect();
        if !missing.is_empty() {
            return Some(Incomplete { missing, message: catalog.incomplete_message });
        }
        catalog
            .conditional
            .iter()
            .find(|rule| self.get(rule.when.0) == Some(rule.when.1) && !self.is_set(rule.require))
            .map(|rule| Incomplete { missing: vec![rule.require], message: rule.message })
    }

    pub fn is_complete(&self, catalog: &ModuleCatalog) -> bool {
        self.missing_requirement(catalog).is_none()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.values.clone()
    }

    /// Replays a snapshot through [`select`](Self::select) in catalog order so
    /// parents land before their dependents. Any invalid entry aborts the
    /// restore and leaves `self` as it was.
    pub fn restore(&mut self, catalog: &ModuleCatalog, snapshot: &Snapshot) -> Result<(), SelectionError> {
        if let Some(stray) = snapshot.keys().find(|c| !catalog.contains(**c)) {
            return Err(SelectionError::UnknownCategory { module: catalog.module, category: *stray });
        }
        let mut next = SelectionState::new();
        for spec in &catalog.categories {
            if let Some(value) = snapshot.get(&spec.category) {
                next.select(catalog, spec.category, Some(value))?;
            }
        }
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn life() -> &'static ModuleCatalog {
        ModuleKind::Life.catalog()
    }

    fn sport() -> &'static ModuleCatalog {
        ModuleKind::Sport.catalog()
    }

    #[test]
    fn dependent_options_are_empty_until_parent_is_chosen() {
        let state = SelectionState::new();
        assert!(state.available_options(life(), Category::Scenario).unwrap().is_empty());
        assert!(!state.available_options(life(), Category::LifestyleType).unwrap().is_empty());
    }

    #[test]
    fn changing_parent_resets_children() {
        let mut state = SelectionState::new();
        state.select(life(), Category::LifestyleType, Some("Carros")).unwrap();
        state.select(life(), Category::Scenario, Some("Estrada panorâmica")).unwrap();
        state.select(life(), Category::ActionPosition, Some("Dirigindo em movimento")).unwrap();
        state.select(life(), Category::ClothesStyle, Some("Casual elegante")).unwrap();

        state.select(life(), Category::LifestyleType, Some("Motos")).unwrap();
        assert_eq!(state.get(Category::Scenario), None);
        assert_eq!(state.get(Category::ActionPosition), None);
        // roots are independent of the lifestyle
        assert_eq!(state.get(Category::ClothesStyle), Some("Casual elegante"));
    }

    #[test]
    fn unsetting_parent_resets_children() {
        let mut state = SelectionState::new();
        state.select(life(), Category::LifestyleType, Some("Lanchas")).unwrap();
        state.select(life(), Category::Scenario, Some("Baía tropical")).unwrap();
        assert!(state.select(life(), Category::LifestyleType, None).unwrap());
        assert!(!state.is_set(Category::Scenario));
    }

    #[test]
    fn reselecting_same_parent_keeps_children() {
        let mut state = SelectionState::new();
        state.select(life(), Category::LifestyleType, Some("Carros")).unwrap();
        state.select(life(), Category::Scenario, Some("Pista iluminada")).unwrap();
        assert!(!state.select(life(), Category::LifestyleType, Some("Carros")).unwrap());
        assert_eq!(state.get(Category::Scenario), Some("Pista iluminada"));
    }

    #[test]
    fn stale_child_value_is_rejected_after_parent_change() {
        let mut state = SelectionState::new();
        state.select(life(), Category::LifestyleType, Some("Carros")).unwrap();
        state.select(life(), Category::LifestyleType, Some("Balões")).unwrap();

        let options = state.available_options(life(), Category::Scenario).unwrap();
        assert!(!options.contains(&"Estrada panorâmica"));
        let err = state.select(life(), Category::Scenario, Some("Estrada panorâmica")).unwrap_err();
        assert!(matches!(err, SelectionError::NotAvailable { .. }));
        assert!(!state.is_set(Category::Scenario));
    }

    #[test]
    fn invalid_selection_leaves_state_untouched() {
        let mut state = SelectionState::new();
        state.select(life(), Category::LifestyleType, Some("Carros")).unwrap();
        let before = state.clone();
        assert!(state.select(life(), Category::LifestyleType, Some("Foguetes")).is_err());
        assert!(state.select(life(), Category::Sport, Some("Surf")).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn football_cascade_goes_through_country_to_team() {
        let mut state = SelectionState::new();
        state.select(sport(), Category::Sport, Some("Futebol")).unwrap();
        state.select(sport(), Category::Country, Some("Brasil")).unwrap();
        state.select(sport(), Category::Team, Some("Clube do Remo")).unwrap();

        state.select(sport(), Category::Country, Some("Portugal")).unwrap();
        assert!(!state.is_set(Category::Team));

        state.select(sport(), Category::Team, Some("FC Porto")).unwrap();
        state.select(sport(), Category::Sport, Some("Surf")).unwrap();
        assert!(!state.is_set(Category::Country));
        assert!(!state.is_set(Category::Team));
        assert!(state.available_options(sport(), Category::Country).unwrap().is_empty());
    }

    #[test]
    fn football_requires_country_then_team_with_specific_messages() {
        let mut state = SelectionState::new();
        state.select(sport(), Category::Sport, Some("Futebol")).unwrap();
        state.select(sport(), Category::Scenario, Some("Estádio")).unwrap();
        state.select(sport(), Category::ActionStyle, Some("Correndo")).unwrap();
        state.select(sport(), Category::LightingTheme, Some("Noturna")).unwrap();

        let missing = state.missing_requirement(sport()).unwrap();
        assert_eq!(missing.missing, vec![Category::Country]);

        state.select(sport(), Category::Country, Some("Brasil")).unwrap();
        let missing = state.missing_requirement(sport()).unwrap();
        assert_eq!(missing.missing, vec![Category::Team]);
        assert_ne!(missing.message, sport().incomplete_message);
        assert!(!state.is_complete(sport()));

        state.select(sport(), Category::Team, Some("Flamengo")).unwrap();
        assert!(state.is_complete(sport()));
    }

    #[test]
    fn non_football_sport_does_not_require_team() {
        let mut state = SelectionState::new();
        state.select(sport(), Category::Sport, Some("Tênis")).unwrap();
        state.select(sport(), Category::Scenario, Some("Quadra de tênis")).unwrap();
        state.select(sport(), Category::ActionStyle, Some("Sacando")).unwrap();
        state.select(sport(), Category::LightingTheme, Some("Estúdio")).unwrap();
        assert!(state.is_complete(sport()));
    }

    #[test]
    fn jersey_number_accepts_zero_and_rejects_out_of_range() {
        let mut state = SelectionState::new();
        state.select(sport(), Category::JerseyNumber, Some("0")).unwrap();
        assert_eq!(state.get(Category::JerseyNumber), Some("0"));
        state.select(sport(), Category::JerseyNumber, Some(" 07 ")).unwrap();
        assert_eq!(state.get(Category::JerseyNumber), Some("7"));
        assert!(matches!(
            state.select(sport(), Category::JerseyNumber, Some("100")),
            Err(SelectionError::OutOfRange { .. })
        ));
        assert!(matches!(
            state.select(sport(), Category::JerseyNumber, Some("dez")),
            Err(SelectionError::NotANumber { .. })
        ));
    }

    #[test]
    fn blank_free_text_unsets() {
        let travel = ModuleKind::Travel.catalog();
        let mut state = SelectionState::new();
        state.select(travel, Category::Destination, Some("Lisboa")).unwrap();
        state.select(travel, Category::Destination, Some("   ")).unwrap();
        assert!(!state.is_set(Category::Destination));
    }

    #[test]
    fn restore_replays_parents_first_and_is_atomic() {
        let mut state = SelectionState::new();
        let mut snapshot = Snapshot::new();
        snapshot.insert(Category::Scenario, "Garagem esportiva".into());
        snapshot.insert(Category::LifestyleType, "Carros".into());
        state.restore(life(), &snapshot).unwrap();
        assert_eq!(state.get(Category::Scenario), Some("Garagem esportiva"));

        let before = state.clone();
        snapshot.insert(Category::ActionPosition, "Voando".into());
        assert!(state.restore(life(), &snapshot).is_err());
        assert_eq!(state, before);
    }
}

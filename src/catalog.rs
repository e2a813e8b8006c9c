use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::modules;
use crate::prompt::{EssaySpec, PromptTemplate};

/// One independent axis of user choice. A module uses a subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Style,
    Clothes,
    Scenario,
    Sport,
    ActionStyle,
    LightingTheme,
    Country,
    Team,
    UniformName,
    JerseyNumber,
    LifestyleType,
    ActionPosition,
    ClothesStyle,
    LightingClimate,
    Destination,
    TravelStyle,
    Hour,
    Climate,
    Framing,
    PositionAction,
    ColorPalette,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Style => "style",
            Category::Clothes => "clothes",
            Category::Scenario => "scenario",
            Category::Sport => "sport",
            Category::ActionStyle => "actionStyle",
            Category::LightingTheme => "lightingTheme",
            Category::Country => "country",
            Category::Team => "team",
            Category::UniformName => "uniformName",
            Category::JerseyNumber => "jerseyNumber",
            Category::LifestyleType => "lifestyleType",
            Category::ActionPosition => "actionPosition",
            Category::ClothesStyle => "clothesStyle",
            Category::LightingClimate => "lightingClimate",
            Category::Destination => "destination",
            Category::TravelStyle => "travelStyle",
            Category::Hour => "hour",
            Category::Climate => "climate",
            Category::Framing => "framing",
            Category::PositionAction => "positionAction",
            Category::ColorPalette => "colorPalette",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Style,
    Sport,
    Life,
    Travel,
}

static STYLE: Lazy<ModuleCatalog> = Lazy::new(modules::style::catalog);
static SPORT: Lazy<ModuleCatalog> = Lazy::new(modules::sport::catalog);
static LIFE: Lazy<ModuleCatalog> = Lazy::new(modules::life::catalog);
static TRAVEL: Lazy<ModuleCatalog> = Lazy::new(modules::travel::catalog);

impl ModuleKind {
    pub const ALL: [ModuleKind; 4] = [ModuleKind::Travel, ModuleKind::Style, ModuleKind::Sport, ModuleKind::Life];

    pub fn catalog(&self) -> &'static ModuleCatalog {
        match self {
            ModuleKind::Style => &STYLE,
            ModuleKind::Sport => &SPORT,
            ModuleKind::Life => &LIFE,
            ModuleKind::Travel => &TRAVEL,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleKind::Style => "StyleMundo IA",
            ModuleKind::Sport => "SportMundo IA",
            ModuleKind::Life => "LifeMundo IA",
            ModuleKind::Travel => "TravelMundo IA",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModuleKind::Style => "Obtenha conselhos de estilo e crie ensaios fotográficos virtuais.",
            ModuleKind::Sport => "Gere fotos cinematográficas e realistas de atletas e cenas esportivas.",
            ModuleKind::Life => "Explore estilo de vida: carros, motos, balões e aventuras.",
            ModuleKind::Travel => "Crie fotos cinematográficas ao redor do mundo.",
        }
    }

    /// Fixed storage key for the module's saved preset.
    pub fn preset_key(&self) -> &'static str {
        match self {
            ModuleKind::Style => "styleMundoPreset",
            ModuleKind::Sport => "sportMundoPreset",
            ModuleKind::Life => "lifeMundoPreset",
            ModuleKind::Travel => "travelMundoPreset",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How the valid values of a category are defined.
#[derive(Debug, Clone, Copy)]
pub enum CategoryKind {
    /// Root category backed by a static option list.
    Static(&'static [&'static str]),
    /// Values come from the module's [`DependencyMap`] keyed on the parent's selection.
    Dependent { parent: Category },
    /// Any non-blank text. Suggestions are display hints, not a whitelist.
    FreeText { suggestions: &'static [&'static str], max_len: usize },
    /// Integer within an inclusive range, kept as its decimal text.
    Number { min: u32, max: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub label: &'static str,
    pub kind: CategoryKind,
}

/// `(parent category, parent value) -> (child category -> labels)`, plus the
/// per-child fallback used when the parent value has no entry.
#[derive(Debug, Default)]
pub struct DependencyMap {
    entries: BTreeMap<Category, BTreeMap<&'static str, BTreeMap<Category, &'static [&'static str]>>>,
    defaults: BTreeMap<Category, &'static [&'static str]>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        parent: Category,
        parent_value: &'static str,
        children: &[(Category, &'static [&'static str])],
    ) -> Self {
        let slot = self.entries.entry(parent).or_default().entry(parent_value).or_default();
        for (child, labels) in children {
            slot.insert(*child, *labels);
        }
        self
    }

    pub fn with_default(mut self, child: Category, labels: &'static [&'static str]) -> Self {
        self.defaults.insert(child, labels);
        self
    }

    /// Options of `child` under `parent = parent_value`; the named default (or nothing)
    /// when the map has no entry for that value.
    pub fn resolve(&self, parent: Category, parent_value: &str, child: Category) -> &'static [&'static str] {
        self.entries
            .get(&parent)
            .and_then(|by_value| by_value.get(parent_value))
            .and_then(|children| children.get(&child))
            .copied()
            .or_else(|| self.defaults.get(&child).copied())
            .unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn parent_values(&self, parent: Category) -> Vec<&'static str> {
        self.entries
            .get(&parent)
            .map(|by_value| by_value.keys().copied().collect())
            .unwrap_or_default()
    }
}

/// A required category that only applies while another selection holds a given value.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalRequirement {
    pub when: (Category, &'static str),
    pub require: Category,
    pub message: &'static str,
}

pub struct ModuleCatalog {
    pub module: ModuleKind,
    /// Ordered so that every parent precedes its dependents.
    pub categories: Vec<CategorySpec>,
    pub dependencies: DependencyMap,
    pub required: Vec<Category>,
    pub conditional: Vec<ConditionalRequirement>,
    pub incomplete_message: &'static str,
    pub template: PromptTemplate,
    pub essay: Option<EssaySpec>,
    pub export_folder: &'static str,
    pub export_prefix: &'static str,
}

impl ModuleCatalog {
    pub fn spec(&self, category: Category) -> Option<&CategorySpec> {
        self.categories.iter().find(|s| s.category == category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.spec(category).is_some()
    }

    pub fn parent_of(&self, category: Category) -> Option<Category> {
        match self.spec(category)?.kind {
            CategoryKind::Dependent { parent } => Some(parent),
            _ => None,
        }
    }

    /// Every category that depends on `category`, directly or transitively,
    /// in catalog order.
    pub fn dependents_of(&self, category: Category) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for spec in &self.categories {
            let mut cursor = self.parent_of(spec.category);
            while let Some(parent) = cursor {
                if parent == category {
                    out.push(spec.category);
                    break;
                }
                cursor = self.parent_of(parent);
            }
        }
        out
    }
}

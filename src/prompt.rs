//! Prompt composition.
//!
//! A [`PromptTemplate`] is pure data: fixed clauses, the ordered lines that
//! substitute selections, and a declarative overlay table. [`compose`] turns a
//! complete [`SelectionState`] into the instruction sent to the image model and
//! the short summary shown to the user. The output depends only on the template
//! and the selection, so the same inputs always produce the same bytes.

use thiserror::Error;

use crate::catalog::Category;
use crate::selection::SelectionState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("mandatory field '{0}' is not selected")]
    Missing(Category),
}

/// One line of the scene description.
#[derive(Debug, Clone, Copy)]
pub enum LineSpec {
    /// `- <label>: <value>`
    Field { category: Category, label: &'static str },
    /// `- <label1>: <value1>, <label2>: <value2>`
    Pair { first: (Category, &'static str), second: (Category, &'static str) },
    /// `- <label>: "<value>" (on jersey)`
    OnJersey { category: Category, label: &'static str },
    /// Line produced by a module-specific renderer.
    Rendered { category: Category, render: fn(&str) -> String },
}

impl LineSpec {
    fn categories(&self) -> Vec<Category> {
        match self {
            LineSpec::Field { category, .. }
            | LineSpec::OnJersey { category, .. }
            | LineSpec::Rendered { category, .. } => vec![*category],
            LineSpec::Pair { first, second } => vec![first.0, second.0],
        }
    }

    /// `None` when any category the line needs is unset.
    fn render(&self, state: &SelectionState) -> Option<String> {
        match self {
            LineSpec::Field { category, label } => state.get(*category).map(|v| format!("- {label}: {v}")),
            LineSpec::Pair { first, second } => {
                let a = state.get(first.0)?;
                let b = state.get(second.0)?;
                Some(format!("- {}: {a}, {}: {b}", first.1, second.1))
            }
            LineSpec::OnJersey { category, label } => {
                state.get(*category).map(|v| format!("- {label}: \"{v}\" (on jersey)"))
            }
            LineSpec::Rendered { category, render } => state.get(*category).map(|v| render(v)),
        }
    }
}

/// Extra clause appended when every `(category, value)` pair holds exactly.
#[derive(Debug, Clone, Copy)]
pub struct Overlay {
    pub when: &'static [(Category, &'static str)],
    pub clause: &'static str,
}

impl Overlay {
    pub fn matches(&self, state: &SelectionState) -> bool {
        self.when.iter().all(|(category, value)| state.get(*category) == Some(*value))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SummaryField {
    pub category: Category,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    /// Facial identity / framing instruction. Always the first line.
    pub identity: &'static str,
    pub preamble: &'static [&'static str],
    pub mandatory: &'static [LineSpec],
    pub optional: &'static [LineSpec],
    pub footer: Option<&'static str>,
    pub overlays: &'static [Overlay],
    /// Appended when the caller asks for a variation of the previous shot.
    pub variation: Option<&'static str>,
    pub summary: &'static [SummaryField],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    pub variation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub summary: String,
}

pub fn compose(
    template: &PromptTemplate,
    state: &SelectionState,
    options: ComposeOptions,
) -> Result<ComposedPrompt, ComposeError> {
    let mut parts: Vec<String> = Vec::new();
    parts.push(template.identity.to_string());
    parts.extend(template.preamble.iter().map(|p| p.to_string()));

    for line in template.mandatory {
        if let Some(unset) = line.categories().into_iter().find(|c| !state.is_set(*c)) {
            return Err(ComposeError::Missing(unset));
        }
        parts.extend(line.render(state));
    }
    parts.extend(template.optional.iter().filter_map(|line| line.render(state)));
    parts.extend(template.footer.map(str::to_string));
    parts.extend(overlay_clauses(template, state));
    if options.variation {
        parts.extend(template.variation.map(str::to_string));
    }

    Ok(ComposedPrompt { prompt: parts.join("\n"), summary: summary(template, state) })
}

fn overlay_clauses(template: &PromptTemplate, state: &SelectionState) -> Vec<String> {
    template
        .overlays
        .iter()
        .filter(|overlay| overlay.matches(state))
        .map(|overlay| overlay.clause.to_string())
        .collect()
}

/// `Label: value` pairs for every set summary field, comma separated.
/// Display only; never sent to the model.
pub fn summary(template: &PromptTemplate, state: &SelectionState) -> String {
    template
        .summary
        .iter()
        .filter_map(|field| state.get(field.category).map(|v| format!("{}: {v}", field.label)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ten-pose batch for one scenario.
#[derive(Debug, Clone, Copy)]
pub struct EssayScene {
    pub scenario: &'static str,
    pub ambiance: &'static str,
    pub poses: &'static [&'static str],
}

/// Multi-image mode, active while `trigger` holds.
#[derive(Debug, Clone, Copy)]
pub struct EssaySpec {
    pub trigger: (Category, &'static str),
    pub scenario: Category,
    pub clothes: Category,
    pub preamble: &'static str,
    pub scenes: &'static [EssayScene],
}

impl EssaySpec {
    pub fn is_active(&self, state: &SelectionState) -> bool {
        state.get(self.trigger.0) == Some(self.trigger.1)
    }

    pub fn scene(&self, scenario: &str) -> Option<&EssayScene> {
        self.scenes.iter().find(|s| s.scenario == scenario)
    }
}

/// One prompt per pose of the selected scenario, in table order. A scenario
/// without a pose table gets a single generic prompt.
pub fn compose_essay(
    template: &PromptTemplate,
    essay: &EssaySpec,
    state: &SelectionState,
) -> Result<Vec<String>, ComposeError> {
    let scenario = state.get(essay.scenario).ok_or(ComposeError::Missing(essay.scenario))?;
    let clothes = state.get(essay.clothes).ok_or(ComposeError::Missing(essay.clothes))?;
    let overlays = overlay_clauses(template, state);

    let head = |scene_line: String| {
        let mut parts = vec![template.identity.to_string(), essay.preamble.to_string(), scene_line];
        parts.extend(overlays.iter().cloned());
        parts
    };

    match essay.scene(scenario) {
        Some(scene) => Ok(scene
            .poses
            .iter()
            .map(|pose| head(format!("{} A pessoa está vestindo: {clothes}. Pose: {pose}", scene.ambiance)).join("\n"))
            .collect()),
        None => {
            tracing::warn!("⚠️ No pose table for essay scenario '{}', using a single generic prompt", scenario);
            Ok(vec![head(format!("Ambiente: {scenario}. A pessoa está vestindo: {clothes}.")).join("\n")])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModuleKind;
    use crate::modules::{life, sport, style};
    use pretty_assertions::assert_eq;

    fn select(module: ModuleKind, pairs: &[(Category, &str)]) -> SelectionState {
        let mut state = SelectionState::new();
        for (category, value) in pairs {
            state.select(module.catalog(), *category, Some(value)).unwrap();
        }
        state
    }

    fn carros_driving() -> SelectionState {
        select(
            ModuleKind::Life,
            &[
                (Category::LifestyleType, "Carros"),
                (Category::Scenario, "Estrada panorâmica"),
                (Category::ActionPosition, "Dirigindo em movimento"),
                (Category::ClothesStyle, "Casual elegante"),
                (Category::LightingClimate, "Diurno ensolarado"),
            ],
        )
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack.find(needle).unwrap_or_else(|| panic!("missing: {needle}"))
    }

    #[test]
    fn carros_prompt_orders_identity_lines_then_both_overlays() {
        let template = &ModuleKind::Life.catalog().template;
        let out = compose(template, &carros_driving(), ComposeOptions::default()).unwrap();
        let p = &out.prompt;

        assert!(p.starts_with(crate::modules::FULL_BODY_IDENTITY));
        let ordered = [
            "- Lifestyle Type: Carros",
            "- Scenario/Environment: Estrada panorâmica",
            "- Action/Position: Dirigindo em movimento",
            "- Clothes Style: Casual elegante",
            "- Lighting/Climate: Diurno ensolarado",
            life::CAR_VISIBLE,
            life::CAR_DRIVING_ON_ROAD,
        ];
        let positions: Vec<usize> = ordered.iter().map(|n| position(p, n)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {positions:?}");
        assert_eq!(p.matches(life::CAR_VISIBLE).count(), 1);
        assert_eq!(p.matches(life::CAR_DRIVING_ON_ROAD).count(), 1);
    }

    #[test]
    fn composition_is_deterministic() {
        let template = &ModuleKind::Life.catalog().template;
        let state = carros_driving();
        let a = compose(template, &state, ComposeOptions::default()).unwrap();
        let b = compose(template, &state.clone(), ComposeOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn life_summary_lists_every_choice() {
        let template = &ModuleKind::Life.catalog().template;
        let out = compose(template, &carros_driving(), ComposeOptions::default()).unwrap();
        assert_eq!(
            out.summary,
            "Lifestyle: Carros, Cenário: Estrada panorâmica, Ação: Dirigindo em movimento, Roupa: Casual elegante, Iluminação: Diurno ensolarado"
        );
    }

    #[test]
    fn football_overlays_are_additive() {
        let state = select(
            ModuleKind::Sport,
            &[
                (Category::Sport, "Futebol"),
                (Category::Scenario, "Vestiário"),
                (Category::ActionStyle, "Comemorando"),
                (Category::LightingTheme, "Cinemática"),
                (Category::Country, "Brasil"),
                (Category::Team, "Flamengo"),
            ],
        );
        let out = compose(&ModuleKind::Sport.catalog().template, &state, ComposeOptions::default()).unwrap();
        let locker = position(&out.prompt, sport::LOCKER_ROOM_CELEBRATION);
        let trophy = position(&out.prompt, sport::FOOTBALL_CELEBRATION);
        assert!(locker < trophy);
        assert_eq!(out.prompt.matches(sport::LOCKER_ROOM_CELEBRATION).count(), 1);
        assert_eq!(out.prompt.matches(sport::FOOTBALL_CELEBRATION).count(), 1);
        assert!(!out.prompt.contains(sport::LOCKER_ROOM_PORTRAIT));
    }

    #[test]
    fn football_generic_celebration_fires_alone_outside_locker_room() {
        let state = select(
            ModuleKind::Sport,
            &[
                (Category::Sport, "Futebol"),
                (Category::Scenario, "Estádio"),
                (Category::ActionStyle, "Comemorando"),
                (Category::LightingTheme, "Noturna"),
            ],
        );
        let out = compose(&ModuleKind::Sport.catalog().template, &state, ComposeOptions::default()).unwrap();
        assert!(out.prompt.contains(sport::FOOTBALL_CELEBRATION));
        assert!(!out.prompt.contains(sport::LOCKER_ROOM_CELEBRATION));
    }

    #[test]
    fn sport_optional_lines_follow_mandatory_ones() {
        let mut state = select(
            ModuleKind::Sport,
            &[
                (Category::Sport, "Futebol"),
                (Category::Scenario, "Gramado"),
                (Category::ActionStyle, "Driblando"),
                (Category::LightingTheme, "Diurna"),
                (Category::Country, "Brasil"),
                (Category::Team, "Seleção Brasileira"),
                (Category::UniformName, "SILVA"),
            ],
        );
        state.select(ModuleKind::Sport.catalog(), Category::JerseyNumber, Some("0")).unwrap();
        let out = compose(&ModuleKind::Sport.catalog().template, &state, ComposeOptions::default()).unwrap();

        let lighting = position(&out.prompt, "- Lighting Theme: Diurna");
        let uniform = position(&out.prompt, "of the Brasileira National Team");
        let name = position(&out.prompt, "- Uniform Name: \"SILVA\" (on jersey)");
        let number = position(&out.prompt, "- Jersey Number: \"0\" (on jersey)");
        assert!(lighting < uniform && uniform < name && name < number);
        assert_eq!(
            out.summary,
            "Esporte: Futebol, Cenário: Gramado, Ação: Driblando, Iluminação: Diurna, Nome: SILVA, Número: 0, País do Time: Brasil, Time: Seleção Brasileira"
        );
    }

    #[test]
    fn club_uniforms_have_dedicated_clauses() {
        assert!(sport::uniform_clause("Clube do Remo").contains("'20 ANOS DO REI'"));
        assert!(sport::uniform_clause("Paysandu Sport Club").contains("'PSC'"));
        assert_eq!(
            sport::uniform_clause("Napoli"),
            "- Uniform Theme: Official professional player uniform for the year 2025 of Napoli (with characteristic team colors and crest)"
        );
    }

    #[test]
    fn missing_mandatory_field_blocks_composition() {
        let state = select(ModuleKind::Life, &[(Category::LifestyleType, "Motos")]);
        let err = compose(&ModuleKind::Life.catalog().template, &state, ComposeOptions::default()).unwrap_err();
        assert_eq!(err, ComposeError::Missing(Category::Scenario));
    }

    #[test]
    fn travel_variation_clause_only_when_requested() {
        let state = select(
            ModuleKind::Travel,
            &[
                (Category::Destination, "Santorini"),
                (Category::TravelStyle, "Romântico"),
                (Category::Scenario, "Praia"),
                (Category::Hour, "Dourado"),
                (Category::Climate, "Ensolarado"),
                (Category::ClothesStyle, "Verão/Praia"),
                (Category::Framing, "Corpo inteiro"),
                (Category::PositionAction, "Caminhando"),
                (Category::ColorPalette, "quente"),
            ],
        );
        let template = &ModuleKind::Travel.catalog().template;
        let plain = compose(template, &state, ComposeOptions::default()).unwrap();
        let varied = compose(template, &state, ComposeOptions { variation: true }).unwrap();

        assert!(plain.prompt.contains("- Time of Day: Dourado, Climate: Ensolarado"));
        assert!(plain.prompt.contains("- Framing: Corpo inteiro, Position/Action: Caminhando"));
        assert!(plain.prompt.contains("- Color Palette: quente"));
        assert!(!plain.prompt.contains("- Lighting Theme:"));
        assert!(!plain.prompt.contains("- Variation:"));
        assert!(varied.prompt.ends_with(template.variation.unwrap()));
        assert!(plain.summary.ends_with(", Paleta: quente"));
        assert!(plain.prompt.starts_with(
            "preserve the exact face from the uploaded photo (identity consistency), realistic skin texture, coherent lighting with the selected ‘Hora do Dia & Clima’. Create a realistic and cinematic travel photo."
        ));
        assert!(plain.prompt.contains("natural depth of field.\n- Destination: Santorini\n- Travel Style (Mood): Romântico"));
    }

    #[test]
    fn essay_builds_ten_prompts_in_pose_order() {
        let state = select(
            ModuleKind::Style,
            &[
                (Category::Style, style::ESSAY_STYLE),
                (Category::Clothes, "Streetwear"),
                (Category::Scenario, "Rooftop Moderno"),
            ],
        );
        let catalog = ModuleKind::Style.catalog();
        let essay = catalog.essay.as_ref().unwrap();
        assert!(essay.is_active(&state));

        let prompts = compose_essay(&catalog.template, essay, &state).unwrap();
        assert_eq!(prompts.len(), 10);
        let poses = essay.scene("Rooftop Moderno").unwrap().poses;
        for (prompt, pose) in prompts.iter().zip(poses) {
            assert!(prompt.starts_with(crate::modules::FULL_BODY_IDENTITY));
            assert!(prompt.contains("A pessoa está vestindo: Streetwear."));
            assert!(prompt.ends_with(&format!("Pose: {pose}")));
        }
    }

    #[test]
    fn essay_pose_follows_the_ambiance_on_the_same_line() {
        let state = select(
            ModuleKind::Style,
            &[
                (Category::Style, style::ESSAY_STYLE),
                (Category::Clothes, "Streetwear"),
                (Category::Scenario, "Estúdio Fotográfico"),
            ],
        );
        let catalog = ModuleKind::Style.catalog();
        let prompts = compose_essay(&catalog.template, catalog.essay.as_ref().unwrap(), &state).unwrap();
        let expected = format!(
            "{}\nCrie uma imagem realista e cinematográfica para um ensaio fotográfico.\nAmbiente: fundo neutro, controle total de luz e contraste. A pessoa está vestindo: Streetwear. Pose: {}",
            crate::modules::FULL_BODY_IDENTITY,
            catalog.essay.unwrap().scene("Estúdio Fotográfico").unwrap().poses[0],
        );
        assert_eq!(prompts[0], expected);
    }

    #[test]
    fn essay_unknown_scenario_yields_single_generic_prompt() {
        let catalog = ModuleKind::Style.catalog();
        let essay = catalog.essay.as_ref().unwrap();
        let mut state = SelectionState::new();
        state.select(catalog, Category::Style, Some(style::ESSAY_STYLE)).unwrap();
        state.select(catalog, Category::Clothes, Some("Criativo")).unwrap();
        state.select(catalog, Category::Scenario, Some("Estúdio Fotográfico")).unwrap();
        // bypass the resolver to simulate a scenario with no pose table
        let mut snapshot = state.snapshot();
        snapshot.insert(Category::Scenario, "Lua".into());
        let state: SelectionState = serde_json::from_value(serde_json::to_value(&snapshot).unwrap()).unwrap();

        let prompts = compose_essay(&catalog.template, essay, &state).unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("Ambiente: Lua. A pessoa está vestindo: Criativo."));
    }
}

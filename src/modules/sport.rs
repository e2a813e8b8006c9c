use crate::catalog::{
    Category, CategoryKind, CategorySpec, ConditionalRequirement, DependencyMap, ModuleCatalog, ModuleKind,
};
use crate::prompt::{LineSpec, Overlay, PromptTemplate, SummaryField};

use super::SPORT_IDENTITY;

pub const FOOTBALL: &str = "Futebol";

struct SportDetails {
    sport: &'static str,
    scenarios: &'static [&'static str],
    action_styles: &'static [&'static str],
    lighting_themes: &'static [&'static str],
}

const SPORTS: &[SportDetails] = &[
    SportDetails {
        sport: FOOTBALL,
        scenarios: &["Estádio", "Gramado", "Treino", "Vestiário"],
        action_styles: &["Correndo", "Driblando", "Comemorando", "Retrato Oficial"],
        lighting_themes: &["Diurna", "Noturna", "Cinemática"],
    },
    SportDetails {
        sport: "Basquete",
        scenarios: &["Quadra interna", "Treino", "Vestiário"],
        action_styles: &["Arremessando", "Driblando", "Comemorando", "Retrato Oficial"],
        lighting_themes: &["Estúdio", "Cinemática", "Noturna"],
    },
    SportDetails {
        sport: "Tênis",
        scenarios: &["Quadra de tênis", "Treino", "Pista aberta"],
        action_styles: &["Sacando", "Correndo para bola", "Retrato Oficial"],
        lighting_themes: &["Diurna", "Cinemática suave", "Estúdio"],
    },
    SportDetails {
        sport: "Corrida",
        scenarios: &["Pista de atletismo", "Parque urbano", "Treino"],
        action_styles: &["Correndo", "Alongando", "Retrato Oficial"],
        lighting_themes: &["Diurna", "Amanhecer", "Cinemática leve"],
    },
    SportDetails {
        sport: "Surf",
        scenarios: &["Praia", "Mar aberto", "Costão rochoso"],
        action_styles: &["Surfando", "Caminhando com prancha", "Retrato Oficial", "Saindo do Tubo"],
        lighting_themes: &["Amanhecer dourado", "Pôr do sol", "Diurna"],
    },
];

const SPORT_NAMES: &[&str] = &[FOOTBALL, "Basquete", "Tênis", "Corrida", "Surf"];

const TEAM_COUNTRIES: &[&str] = &["Brasil", "Espanha", "Inglaterra", "Alemanha", "Itália", "França", "Portugal"];

const TEAMS_BY_COUNTRY: &[(&str, &[&str])] = &[
    (
        "Brasil",
        &[
            "Seleção Brasileira",
            "Flamengo",
            "Palmeiras",
            "Corinthians",
            "São Paulo",
            "Grêmio",
            "Internacional",
            "Atlético Mineiro",
            "Cruzeiro",
            "Fluminense",
            "Vasco da Gama",
            "Botafogo",
            "Bahia",
            "Santos",
            "Athletico Paranaense",
            "Cuiabá",
            "Fortaleza",
            "Red Bull Bragantino",
            "Vitória",
            "Criciúma",
            "Juventude",
            "Clube do Remo",
            "Paysandu Sport Club",
        ],
    ),
    ("Espanha", &["Seleção Espanhola", "Real Madrid", "FC Barcelona", "Atlético de Madrid"]),
    (
        "Inglaterra",
        &[
            "Seleção Inglesa",
            "Manchester City",
            "Liverpool FC",
            "Arsenal FC",
            "Manchester United",
            "Chelsea FC",
            "Newcastle United",
        ],
    ),
    ("Alemanha", &["Seleção Alemã", "Bayern de Munique", "Borussia Dortmund"]),
    ("Itália", &["Seleção Italiana", "Inter de Milão", "AC Milan", "Juventus", "Napoli"]),
    ("França", &["Seleção Francesa", "Paris Saint-Germain (PSG)", "Olympique de Marseille"]),
    ("Portugal", &["Seleção Portuguesa", "FC Porto", "SL Benfica"]),
];

pub const SURF_TUBE: &str = "- Visual Details: The person appears to be inside a translucent wave barrel or dramatically emerging from it. Include dynamic water spray, intense natural light reflecting off the wave's wall, conveying speed, power, and high emotion.";
pub const LOCKER_ROOM_CELEBRATION: &str = "- Scene Composition: The athlete is prominently celebrating inside a modern and well-lit locker room. They are shown in a full-body pose, capturing the emotion of victory. This can include raising a trophy, cheering with arms up, or interacting joyfully with a soccer ball. Ensure the locker room environment (lockers, benches) is clearly visible and authentic to the setting, while maintaining maximum facial consistency and a clear view of the person's entire uniform.";
pub const FOOTBALL_CELEBRATION: &str = "- Visual Details: The athlete is celebrating, prominently holding a trophy in their hand and looking forward with a victorious expression. The scene should suggest variations like raising the trophy overhead, holding it securely, or having their feet on a soccer ball while holding the trophy.";
pub const LOCKER_ROOM_PORTRAIT: &str = "- Scene Composition: A formal, front-facing official portrait in a locker room setting. The player can be standing or seated in front of their individual locker bench. Their personalized jersey, displaying name and number, is visibly hanging. The player can also be holding a trophy and looking forward, or have a soccer ball at their feet, enhancing the portrait's narrative.";

const REMO_UNIFORM: &str = "- Uniform Theme: Official professional player uniform for the year 2025 of Clube do Remo, inspired by their classic navy blue kits. The jersey MUST be a solid, classic navy blue (azul-marinho) and feature a subtle, darker jacquard/embossed pattern across the fabric consisting of historical club symbols like crests and anchors. The collar and sleeve cuffs MUST be white. The shorts MUST be white. The team's crest on the chest MUST be a navy blue shield, outlined in white, containing the white intertwined letters 'CR'. It must NOT show an anchor inside the main crest. Below the crest, there should be a small golden banner with the text '20 ANOS DO REI'.";
const PAYSANDU_UNIFORM: &str = "- Uniform Theme: Official professional player uniform for the year 2025 of Paysandu Sport Club. The jersey MUST feature the team's iconic vertical stripes of sky blue (azul celeste) and white. A subtle, lighter blue topographic/wavy line pattern should be integrated within the stripes. The sleeve cuffs MUST have a thin gold trim. The shorts MUST be white. The team's official crest MUST be accurately rendered on the chest: a shield with vertical sky blue and white stripes, featuring the stylized white monogram 'PSC' in the center. Two gold stars must be positioned above the shield.";

/// Uniform line for the selected football team. National teams are matched
/// by their "Seleção " prefix.
pub fn uniform_clause(team: &str) -> String {
    if let Some(country) = team.strip_prefix("Seleção ") {
        return format!(
            "- Uniform: Official professional player uniform for the year 2025 of the {country} National Team, with authentic colors, crest, and current game details. It must be rendered as an on-field athlete's kit, not fan attire."
        );
    }
    match team {
        "Clube do Remo" => REMO_UNIFORM.to_string(),
        "Paysandu Sport Club" => PAYSANDU_UNIFORM.to_string(),
        _ => format!(
            "- Uniform Theme: Official professional player uniform for the year 2025 of {team} (with characteristic team colors and crest)"
        ),
    }
}

const OVERLAYS: &[Overlay] = &[
    Overlay { when: &[(Category::Sport, "Surf"), (Category::ActionStyle, "Saindo do Tubo")], clause: SURF_TUBE },
    Overlay {
        when: &[(Category::Sport, FOOTBALL), (Category::Scenario, "Vestiário"), (Category::ActionStyle, "Comemorando")],
        clause: LOCKER_ROOM_CELEBRATION,
    },
    Overlay { when: &[(Category::Sport, FOOTBALL), (Category::ActionStyle, "Comemorando")], clause: FOOTBALL_CELEBRATION },
    Overlay {
        when: &[(Category::Sport, FOOTBALL), (Category::Scenario, "Vestiário"), (Category::ActionStyle, "Retrato Oficial")],
        clause: LOCKER_ROOM_PORTRAIT,
    },
];

const TEMPLATE: PromptTemplate = PromptTemplate {
    identity: SPORT_IDENTITY,
    preamble: &["Generate a realistic and cinematic sport image. The scene should depict:", "- Framing: Full-body shot"],
    mandatory: &[
        LineSpec::Field { category: Category::Sport, label: "Sport" },
        LineSpec::Field { category: Category::Scenario, label: "Scenario" },
        LineSpec::Field { category: Category::ActionStyle, label: "Action/Style" },
        LineSpec::Field { category: Category::LightingTheme, label: "Lighting Theme" },
    ],
    optional: &[
        LineSpec::Rendered { category: Category::Team, render: uniform_clause },
        LineSpec::OnJersey { category: Category::UniformName, label: "Uniform Name" },
        LineSpec::OnJersey { category: Category::JerseyNumber, label: "Jersey Number" },
    ],
    footer: Some("Focus on a high-quality, professional sports photography aesthetic."),
    overlays: OVERLAYS,
    variation: None,
    summary: &[
        SummaryField { category: Category::Sport, label: "Esporte" },
        SummaryField { category: Category::Scenario, label: "Cenário" },
        SummaryField { category: Category::ActionStyle, label: "Ação" },
        SummaryField { category: Category::LightingTheme, label: "Iluminação" },
        SummaryField { category: Category::UniformName, label: "Nome" },
        SummaryField { category: Category::JerseyNumber, label: "Número" },
        SummaryField { category: Category::Country, label: "País do Time" },
        SummaryField { category: Category::Team, label: "Time" },
    ],
};

pub fn catalog() -> ModuleCatalog {
    let mut dependencies = DependencyMap::new();
    for details in SPORTS {
        dependencies = dependencies.with(
            Category::Sport,
            details.sport,
            &[
                (Category::Scenario, details.scenarios),
                (Category::ActionStyle, details.action_styles),
                (Category::LightingTheme, details.lighting_themes),
            ],
        );
    }
    // Only football picks a team; other sports resolve to an empty country list.
    dependencies = dependencies.with(Category::Sport, FOOTBALL, &[(Category::Country, TEAM_COUNTRIES)]);
    for (country, teams) in TEAMS_BY_COUNTRY {
        dependencies = dependencies.with(Category::Country, *country, &[(Category::Team, *teams)]);
    }

    ModuleCatalog {
        module: ModuleKind::Sport,
        categories: vec![
            CategorySpec { category: Category::Sport, label: "Esporte", kind: CategoryKind::Static(SPORT_NAMES) },
            CategorySpec { category: Category::Scenario, label: "Cenário", kind: CategoryKind::Dependent { parent: Category::Sport } },
            CategorySpec {
                category: Category::ActionStyle,
                label: "Ação / Estilo",
                kind: CategoryKind::Dependent { parent: Category::Sport },
            },
            CategorySpec {
                category: Category::LightingTheme,
                label: "Tema de iluminação",
                kind: CategoryKind::Dependent { parent: Category::Sport },
            },
            CategorySpec { category: Category::Country, label: "País do Time", kind: CategoryKind::Dependent { parent: Category::Sport } },
            CategorySpec { category: Category::Team, label: "Time do Uniforme", kind: CategoryKind::Dependent { parent: Category::Country } },
            CategorySpec {
                category: Category::UniformName,
                label: "Nome no uniforme (opcional)",
                kind: CategoryKind::FreeText { suggestions: &[], max_len: 24 },
            },
            CategorySpec {
                category: Category::JerseyNumber,
                label: "Número da camisa (opcional)",
                kind: CategoryKind::Number { min: 0, max: 99 },
            },
        ],
        dependencies,
        required: vec![Category::Sport, Category::Scenario, Category::ActionStyle, Category::LightingTheme],
        conditional: vec![
            ConditionalRequirement {
                when: (Category::Sport, FOOTBALL),
                require: Category::Country,
                message: "Por favor, selecione um país para o time de Futebol.",
            },
            ConditionalRequirement {
                when: (Category::Sport, FOOTBALL),
                require: Category::Team,
                message: "Por favor, selecione um time para Futebol.",
            },
        ],
        incomplete_message: "Por favor, preencha todos os campos obrigatórios (foto, esporte, cenário, ação e iluminação).",
        template: TEMPLATE,
        essay: None,
        export_folder: "SportMundo",
        export_prefix: "sportmundo_ia",
    }
}

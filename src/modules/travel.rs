use crate::catalog::{Category, CategoryKind, CategorySpec, DependencyMap, ModuleCatalog, ModuleKind};
use crate::prompt::{LineSpec, PromptTemplate, SummaryField};

const DESTINATION_SUGGESTIONS: &[&str] = &[
    "Paris",
    "Santorini",
    "Dubai",
    "Tóquio",
    "Machu Picchu",
    "Nova York",
    "Roma",
    "Londres",
    "Bali",
    "Rio de Janeiro",
    "Cairo",
    "Lisboa",
];

const TRAVEL_STYLES: &[&str] =
    &["Romântico", "Aventura", "Solo", "Família", "Luxo", "Cultural", "Urbano Criativo", "Natureza"];

const SCENARIOS: &[&str] = &[
    "Landmark/Cartão-postal",
    "Praia",
    "Montanha/Trilha",
    "Centro histórico",
    "Mercado local",
    "Rooftop",
    "Café europeu",
    "Deserto",
    "Neve",
];

const HOURS: &[&str] = &["Amanhecer", "Dourado", "Tarde", "Noturno urbano"];

const CLIMATES: &[&str] = &["Ensolarado", "Céu dramático", "Nevoado", "Chuva leve", "Neve"];

const CLOTHES_STYLES: &[&str] = &["Casual elegante", "Fashion cinematográfico", "Esportivo", "Verão/Praia", "Inverno"];

const FRAMINGS: &[&str] = &["Retrato", "Meio corpo", "Corpo inteiro", "Plano americano"];

const POSITIONS: &[&str] = &[
    "Caminhando",
    "Olhando o horizonte",
    "Encostado em muralha/parede",
    "Sentado em café",
    "Ao lado de carro/vespa",
];

const COLOR_PALETTES: &[&str] = &["neutra", "quente", "fria", "neon urbano"];

const LIGHTING_THEMES: &[&str] = &["Cinemática", "Estúdio soft", "Luz dourada", "Azul noturna"];

const TEMPLATE: PromptTemplate = PromptTemplate {
    identity: "preserve the exact face from the uploaded photo (identity consistency), realistic skin texture, coherent lighting with the selected ‘Hora do Dia & Clima’. Create a realistic and cinematic travel photo. Do not include any texts or logos. Do not include watermarks. Focus on local architecture, landscape, and cultural context. Ensure the colors, lighting, and climate match the selections. High resolution, sharp eyes/skin, and natural depth of field.",
    preamble: &[],
    mandatory: &[
        LineSpec::Field { category: Category::Destination, label: "Destination" },
        LineSpec::Field { category: Category::TravelStyle, label: "Travel Style (Mood)" },
        LineSpec::Field { category: Category::Scenario, label: "Scenario/Environment" },
        LineSpec::Pair { first: (Category::Hour, "Time of Day"), second: (Category::Climate, "Climate") },
        LineSpec::Field { category: Category::ClothesStyle, label: "Clothes/Style" },
        LineSpec::Pair { first: (Category::Framing, "Framing"), second: (Category::PositionAction, "Position/Action") },
    ],
    optional: &[
        LineSpec::Field { category: Category::ColorPalette, label: "Color Palette" },
        LineSpec::Field { category: Category::LightingTheme, label: "Lighting Theme" },
    ],
    footer: None,
    overlays: &[],
    variation: Some("- Variation: Create a slightly different pose, framing, or angle while maintaining the same identity and context."),
    summary: &[
        SummaryField { category: Category::Destination, label: "Destino" },
        SummaryField { category: Category::TravelStyle, label: "Estilo" },
        SummaryField { category: Category::Scenario, label: "Cenário" },
        SummaryField { category: Category::Hour, label: "Hora" },
        SummaryField { category: Category::Climate, label: "Clima" },
        SummaryField { category: Category::ClothesStyle, label: "Roupa" },
        SummaryField { category: Category::Framing, label: "Enquadramento" },
        SummaryField { category: Category::PositionAction, label: "Posição" },
        SummaryField { category: Category::ColorPalette, label: "Paleta" },
        SummaryField { category: Category::LightingTheme, label: "Iluminação" },
    ],
};

pub fn catalog() -> ModuleCatalog {
    ModuleCatalog {
        module: ModuleKind::Travel,
        categories: vec![
            CategorySpec {
                category: Category::Destination,
                label: "1. Destino",
                kind: CategoryKind::FreeText { suggestions: DESTINATION_SUGGESTIONS, max_len: 120 },
            },
            CategorySpec { category: Category::TravelStyle, label: "2. Estilo de Viagem (Mood)", kind: CategoryKind::Static(TRAVEL_STYLES) },
            CategorySpec { category: Category::Scenario, label: "3. Cenário / Ambiente", kind: CategoryKind::Static(SCENARIOS) },
            CategorySpec { category: Category::Hour, label: "Hora", kind: CategoryKind::Static(HOURS) },
            CategorySpec { category: Category::Climate, label: "Clima", kind: CategoryKind::Static(CLIMATES) },
            CategorySpec { category: Category::ClothesStyle, label: "5. Roupa / Estilo", kind: CategoryKind::Static(CLOTHES_STYLES) },
            CategorySpec { category: Category::Framing, label: "Enquadramento", kind: CategoryKind::Static(FRAMINGS) },
            CategorySpec { category: Category::PositionAction, label: "Posição/Ação", kind: CategoryKind::Static(POSITIONS) },
            CategorySpec {
                category: Category::ColorPalette,
                label: "Paleta de cores (opcional)",
                kind: CategoryKind::Static(COLOR_PALETTES),
            },
            CategorySpec {
                category: Category::LightingTheme,
                label: "Tema de iluminação (opcional)",
                kind: CategoryKind::Static(LIGHTING_THEMES),
            },
        ],
        dependencies: DependencyMap::new(),
        required: vec![
            Category::Destination,
            Category::TravelStyle,
            Category::Scenario,
            Category::Hour,
            Category::Climate,
            Category::ClothesStyle,
            Category::Framing,
            Category::PositionAction,
        ],
        conditional: Vec::new(),
        incomplete_message: "Por favor, preencha todos os campos obrigatórios (foto, destino, estilo de viagem, cenário, hora/clima, roupa, enquadramento e posição).",
        template: TEMPLATE,
        essay: None,
        export_folder: "TravelMundo",
        export_prefix: "TravelMundoIA",
    }
}

use crate::catalog::{Category, CategoryKind, CategorySpec, DependencyMap, ModuleCatalog, ModuleKind};
use crate::prompt::{LineSpec, Overlay, PromptTemplate, SummaryField};

use super::FULL_BODY_IDENTITY;

const LIFESTYLE_TYPES: &[&str] = &[
    "Carros",
    "Motos",
    "Lanchas",
    "Balões",
    "Natureza / Praia",
    "Cidade / Urbano",
    "Luxo / Fashion",
];

const CLOTHES_STYLES: &[&str] = &[
    "Casual elegante",
    "Social minimalista",
    "Esportivo",
    "Verão / Praia",
    "Fashion cinematográfico",
    "Luxo internacional",
];

const LIGHTING_CLIMATES: &[&str] = &[
    "Diurno ensolarado",
    "Pôr do sol dourado",
    "Noturno urbano",
    "Cinematográfico azul",
    "Nevoado / Frio",
];

const SCENARIOS: &[(&str, &[&str])] = &[
    ("Carros", &["Estrada panorâmica", "Estacionamento de luxo", "Garagem esportiva", "Pista iluminada"]),
    ("Motos", &["Estrada litorânea", "Ponte moderna", "Estrada nas montanhas", "Mirante urbano"]),
    ("Lanchas", &["Marina / Iate", "Baía tropical", "Píer de luxo", "Mar aberto ao pôr do sol"]),
    ("Balões", &["Céu ao amanhecer", "Vale aberto", "Campo florido", "Horizonte com montanhas"]),
    ("Natureza / Praia", &["Praia paradisíaca", "Floresta tropical", "Dunas", "Cachoeira", "Campo aberto"]),
    ("Cidade / Urbano", &["Avenida noturna", "Cafeteria europeia", "Rooftop moderno", "Estação de metrô"]),
    ("Luxo / Fashion", &["Hotel 5 estrelas", "Studio minimalista", "Passarela fashion", "Loft moderno"]),
];

const ACTIONS: &[(&str, &[&str])] = &[
    (
        "Carros",
        &[
            "De braços cruzados ao lado do carro",
            "Encostado na porta do carro",
            "Dirigindo em movimento",
            "Sentado no banco do motorista",
            "Caminhando próximo ao carro",
        ],
    ),
    (
        "Motos",
        &[
            "Sentado na moto",
            "Acelerando em movimento",
            "Encostado na moto com capacete na mão",
            "Olhando para o horizonte",
            "Em modo retrato cinematográfico",
        ],
    ),
    (
        "Lanchas",
        &[
            "De pé na proa da lancha",
            "Sentado relaxando no convés",
            "Pousando em uma lancha com roupa de verão",
            "Rosto voltado ao mar",
            "Retrato oficial na lancha",
            "Dirigindo a lancha",
        ],
    ),
    (
        "Balões",
        &[
            "Dentro do cesto do balão",
            "Sorrindo durante o voo",
            "Olhando a paisagem de cima",
            "Segurando as cordas do balão",
            "Com o vento movimentando o cabelo",
        ],
    ),
    (
        "Natureza / Praia",
        &[
            "Caminhando na areia",
            "Olhando o horizonte",
            "Correndo na praia",
            "De pé em uma rocha com o mar ao fundo",
            "Deitado em uma rede",
        ],
    ),
    (
        "Cidade / Urbano",
        &[
            "Caminhando em rua noturna",
            "Parado em frente a vitrines",
            "Sentado em um café",
            "Andando na chuva com guarda-chuva",
            "Retrato fashion na calçada",
        ],
    ),
    (
        "Luxo / Fashion",
        &[
            "Sentado em poltrona de luxo",
            "Pousando como modelo",
            "Em pé ao lado de uma mesa elegante",
            "Caminhando com estilo",
            "Olhar confiante para a câmera",
        ],
    ),
];

pub const CAR_VISIBLE: &str = "**CRITICAL VISUAL DETAIL: Ensure the carro is prominently featured and 100% visible within the frame, composed to be clearly seen (e.g., in the background or mid-ground), even with the close-up focus on the person's face. Show it completely, from front to back/side to side.**";
pub const MOTO_VISIBLE: &str = "**CRITICAL VISUAL DETAIL: Ensure the moto is prominently featured and 100% visible within the frame, composed to be clearly seen (e.g., in the background or mid-ground), even with the close-up focus on the person's face. Show it completely, from wheel to wheel.**";
pub const BOAT_VISIBLE: &str = "**CRITICAL VISUAL DETAIL: Ensure the lancha is prominently featured and 100% visible within the frame, composed to be clearly seen (e.g., in the background or mid-ground), even with the close-up focus on the person's face. Show it completely, from front to back/side to side.**";
pub const BOAT_FACING_SEA: &str = "**CRITICAL CONTEXT: The person is actively on the lancha, with their face turned towards the sea, fully integrated into the boat setting. The lancha itself must be clearly visible as part of the scene composition, even with the close-up focus on the person's face.**";
pub const CAR_DRIVING_ON_ROAD: &str = "**ULTRA CRITICAL SCENE COMPOSITION: While maintaining the close-up, front-facing/profile view of the person, the car must also be ENTIRELY visible, centrally prominent, precisely positioned ON THE ROAD, facing the direction of travel. The person must be clearly shown ACTIVELY driving, either facing forward or in profile. The view of the car must be COMPLETE and UNOBSTRUCTED, forming a dynamic background/mid-ground to the focused face.**";
pub const BOAT_DRIVING: &str = "**ULTRA CRITICAL SCENE COMPOSITION: While maintaining the close-up, front-facing/profile view of the person, the lancha must also be ENTIRELY visible, centrally prominent, precisely positioned ON THE WATER, in clear motion. The person must be clearly shown ACTIVELY driving the lancha, either facing forward or in profile. The view of the lancha must be COMPLETE and UNOBSTRUCTED, forming a dynamic background/mid-ground to the focused face.**";
pub const BOAT_PORTRAIT: &str = "**ULTRA CRITICAL SCENE COMPOSITION: While maintaining the close-up, front-facing/profile view of the person, ensure the person is elegantly positioned at the bow (front) of the lancha, facing forward (towards the camera or horizon). The lancha must be ENTIRELY visible and prominently featured in the composition, with the vast ocean or clear water as a backdrop. The scene should exude luxury and adventure, suitable for an official high-end portrait.**";

const OVERLAYS: &[Overlay] = &[
    Overlay { when: &[(Category::LifestyleType, "Carros")], clause: CAR_VISIBLE },
    Overlay { when: &[(Category::LifestyleType, "Motos")], clause: MOTO_VISIBLE },
    Overlay { when: &[(Category::LifestyleType, "Lanchas")], clause: BOAT_VISIBLE },
    Overlay {
        when: &[(Category::LifestyleType, "Lanchas"), (Category::ActionPosition, "Rosto voltado ao mar")],
        clause: BOAT_FACING_SEA,
    },
    Overlay {
        when: &[
            (Category::LifestyleType, "Carros"),
            (Category::Scenario, "Estrada panorâmica"),
            (Category::ActionPosition, "Dirigindo em movimento"),
        ],
        clause: CAR_DRIVING_ON_ROAD,
    },
    Overlay {
        when: &[(Category::LifestyleType, "Lanchas"), (Category::ActionPosition, "Dirigindo a lancha")],
        clause: BOAT_DRIVING,
    },
    Overlay {
        when: &[(Category::LifestyleType, "Lanchas"), (Category::ActionPosition, "Retrato oficial na lancha")],
        clause: BOAT_PORTRAIT,
    },
];

const TEMPLATE: PromptTemplate = PromptTemplate {
    identity: FULL_BODY_IDENTITY,
    preamble: &["Generate a realistic and cinematic lifestyle image. The scene should depict:"],
    mandatory: &[
        LineSpec::Field { category: Category::LifestyleType, label: "Lifestyle Type" },
        LineSpec::Field { category: Category::Scenario, label: "Scenario/Environment" },
        LineSpec::Field { category: Category::ActionPosition, label: "Action/Position" },
        LineSpec::Field { category: Category::ClothesStyle, label: "Clothes Style" },
        LineSpec::Field { category: Category::LightingClimate, label: "Lighting/Climate" },
    ],
    optional: &[],
    footer: Some("Focus on high-quality, professional photography aesthetics suitable for a luxury lifestyle magazine."),
    overlays: OVERLAYS,
    variation: None,
    summary: &[
        SummaryField { category: Category::LifestyleType, label: "Lifestyle" },
        SummaryField { category: Category::Scenario, label: "Cenário" },
        SummaryField { category: Category::ActionPosition, label: "Ação" },
        SummaryField { category: Category::ClothesStyle, label: "Roupa" },
        SummaryField { category: Category::LightingClimate, label: "Iluminação" },
    ],
};

pub fn catalog() -> ModuleCatalog {
    let mut dependencies = DependencyMap::new();
    for (lifestyle, scenarios) in SCENARIOS {
        dependencies = dependencies.with(Category::LifestyleType, *lifestyle, &[(Category::Scenario, *scenarios)]);
    }
    for (lifestyle, actions) in ACTIONS {
        dependencies = dependencies.with(Category::LifestyleType, *lifestyle, &[(Category::ActionPosition, *actions)]);
    }

    ModuleCatalog {
        module: ModuleKind::Life,
        categories: vec![
            CategorySpec { category: Category::LifestyleType, label: "Tipo de Lifestyle", kind: CategoryKind::Static(LIFESTYLE_TYPES) },
            CategorySpec {
                category: Category::Scenario,
                label: "Cenário / Ambiente",
                kind: CategoryKind::Dependent { parent: Category::LifestyleType },
            },
            CategorySpec {
                category: Category::ActionPosition,
                label: "Ação / Posição",
                kind: CategoryKind::Dependent { parent: Category::LifestyleType },
            },
            CategorySpec { category: Category::ClothesStyle, label: "Estilo de Roupa", kind: CategoryKind::Static(CLOTHES_STYLES) },
            CategorySpec { category: Category::LightingClimate, label: "Iluminação / Clima", kind: CategoryKind::Static(LIGHTING_CLIMATES) },
        ],
        dependencies,
        required: vec![
            Category::LifestyleType,
            Category::Scenario,
            Category::ActionPosition,
            Category::ClothesStyle,
            Category::LightingClimate,
        ],
        conditional: Vec::new(),
        incomplete_message: "Por favor, preencha todos os campos obrigatórios (foto, tipo de lifestyle, cenário, ação, roupa e iluminação).",
        template: TEMPLATE,
        essay: None,
        export_folder: "LifeMundo",
        export_prefix: "lifemundo_ia",
    }
}

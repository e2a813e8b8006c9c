use crate::catalog::{Category, CategoryKind, CategorySpec, DependencyMap, ModuleCatalog, ModuleKind};
use crate::prompt::{EssayScene, EssaySpec, LineSpec, PromptTemplate, SummaryField};

use super::FULL_BODY_IDENTITY;

/// Style value that switches the module into ten-image essay mode.
pub const ESSAY_STYLE: &str = "Ensaio Fotográfico Completo";

const STYLES: &[&str] = &[
    "Retrato Profissional",
    "Casual",
    "Fashion Editorial",
    "Executivo",
    "Cinematográfico",
    ESSAY_STYLE,
];

const CLOTHES: &[&str] = &[
    "Casual moderno",
    "Social elegante",
    "Esportivo",
    "Fantasia criativa",
    "Streetwear",
    "Fashion estilizado",
    "Alta-costura",
    "Criativo",
    "Terno / Blazer / Gravata / Tailleur",
    "Roupa preta / Casaco longo",
    "Blazer / Camisa clara",
    "Jeans / Camisa polo",
];

const SCENARIOS: &[(&str, &[&str])] = &[
    ("Retrato Profissional", &["Estúdio", "Fundo neutro", "Ambiente corporativo"]),
    ("Casual", &["Parque", "Rua urbana", "Praia", "Natureza"]),
    ("Fashion Editorial", &["Loft", "Estúdio iluminado", "Passarela", "Fachada moderna"]),
    ("Executivo", &["Escritório", "Sala de reuniões", "Rooftop empresarial"]),
    ("Cinematográfico", &["Rua noturna", "Bar", "Ponto urbano com néon", "Interior com contraste"]),
    (ESSAY_STYLE, &["Rooftop Moderno", "Natureza / Externa", "Ambiente Corporativo", "Estúdio Fotográfico"]),
];

const DEFAULT_SCENARIOS: &[&str] = &["Estúdio", "Rua noturna", "Praia", "Paris / Roma / Nova York", "Natureza tropical"];

const ESSAY_SCENES: &[EssayScene] = &[
    EssayScene {
        scenario: "Rooftop Moderno",
        ambiance: "Ambiente: cobertura urbana moderna, ao pôr do sol, com skyline visível e iluminação suave de fim de tarde.",
        poses: &[
            "Em pé, mãos nos bolsos, olhando o horizonte, expressão confiante.",
            "Encostado no corrimão de vidro, observando a cidade, luz dourada lateral.",
            "Sentado em uma cadeira moderna, pernas cruzadas, olhar relaxado.",
            "Caminhando pelo rooftop, blazer nas mãos, vento leve no cabelo.",
            "Braços cruzados, meio perfil com fundo desfocado da cidade.",
            "De costas, olhando o pôr do sol, luz quente atrás.",
            "Sentado no chão com uma perna dobrada, expressão contemplativa.",
            "Segurando uma xícara ou copo, expressão casual e elegante.",
            "De pé, um ombro levemente voltado para a câmera, luz azulada noturna.",
            "Olhando para baixo, mãos unidas à frente, pose introspectiva e cinematográfica.",
        ],
    },
    EssayScene {
        scenario: "Natureza / Externa",
        ambiance: "Ambiente: floresta, trilha, campo aberto ou praia; luz natural, atmosfera leve e orgânica.",
        poses: &[
            "Caminhando em uma trilha arborizada, sorriso leve e natural.",
            "Sentado em uma pedra, expressão serena, luz suave nas folhas.",
            "De pé, braços abertos, sentindo o vento, olhar voltado ao horizonte.",
            "Encostado em uma árvore, meio perfil, luz filtrada entre os galhos.",
            "Ajoelhado ou agachado, olhando para o chão com expressão calma.",
            "Caminhando descalço na grama, mãos nos bolsos, olhar confiante.",
            "Sentado em um banco de madeira, braços relaxados sobre os joelhos.",
            "Olhando para o alto com luz solar direta no rosto, tom de descoberta.",
            "Em movimento, girando o corpo levemente, roupa fluida e natural.",
            "De costas, caminhando em direção ao pôr do sol, iluminação dourada.",
        ],
    },
    EssayScene {
        scenario: "Ambiente Corporativo",
        ambiance: "Ambiente: escritório moderno, mesa de vidro, cadeira executiva, janelas amplas com luz branca difusa.",
        poses: &[
            "Em pé ao lado da mesa, uma mão no bolso, a outra apoiada na mesa.",
            "Sentado na cadeira executiva, corpo levemente inclinado à frente, olhar seguro.",
            "Encostado em uma parede de vidro, expressão concentrada.",
            "Segurando um tablet ou laptop, sorriso leve, pose natural.",
            "Braços cruzados, fundo de escritório desfocado, luz fria.",
            "Caminhando no corredor, olhar direto, expressão determinada.",
            "Sentado lateralmente, mãos sobre o braço da cadeira, postura firme.",
            "Em pé junto à janela, olhando a vista com ar reflexivo.",
            "Mãos na cintura, expressão de liderança, luz de destaque no rosto.",
            "Sentado em uma mesa redonda, gesticulando como em reunião.",
        ],
    },
    EssayScene {
        scenario: "Estúdio Fotográfico",
        ambiance: "Ambiente: fundo neutro, controle total de luz e contraste.",
        poses: &[
            "Em pé, com mãos nos bolsos, olhando para a câmera.",
            "Sentado em uma cadeira elegante, expressão confiante.",
            "Braços cruzados, meio perfil.",
            "Mãos unidas na frente do corpo, leve sorriso.",
            "Encostado na parede, olhar lateral.",
            "Sentado com perna cruzada, expressão pensativa.",
            "Meio corpo, sorriso leve.",
            "Meio perfil, luz lateral forte.",
            "Retrato close-up, olhar direto.",
            "Caminhando em direção à câmera, expressão natural e confiante.",
        ],
    },
];

const TEMPLATE: PromptTemplate = PromptTemplate {
    identity: FULL_BODY_IDENTITY,
    preamble: &[
        "Create a realistic and cinematic photographic essay. Apply the following characteristics:",
        "- Framing: Full-body shot, showing the person from head to toe.",
    ],
    mandatory: &[
        LineSpec::Field { category: Category::Style, label: "Overall Style" },
        LineSpec::Field { category: Category::Clothes, label: "Clothes" },
        LineSpec::Field { category: Category::Scenario, label: "Scenario/Environment" },
    ],
    optional: &[],
    footer: None,
    overlays: &[],
    variation: None,
    summary: &[
        SummaryField { category: Category::Style, label: "Estilo" },
        SummaryField { category: Category::Clothes, label: "Roupa" },
        SummaryField { category: Category::Scenario, label: "Cenário" },
    ],
};

pub fn catalog() -> ModuleCatalog {
    let mut dependencies = DependencyMap::new().with_default(Category::Scenario, DEFAULT_SCENARIOS);
    for (style, scenarios) in SCENARIOS {
        dependencies = dependencies.with(Category::Style, *style, &[(Category::Scenario, *scenarios)]);
    }

    ModuleCatalog {
        module: ModuleKind::Style,
        categories: vec![
            CategorySpec { category: Category::Style, label: "1. Escolha o Estilo do Ensaio", kind: CategoryKind::Static(STYLES) },
            CategorySpec { category: Category::Clothes, label: "2. Escolha de Roupas e Acessórios", kind: CategoryKind::Static(CLOTHES) },
            CategorySpec {
                category: Category::Scenario,
                label: "3. Escolha do Cenário",
                kind: CategoryKind::Dependent { parent: Category::Style },
            },
        ],
        dependencies,
        required: vec![Category::Style, Category::Clothes, Category::Scenario],
        conditional: Vec::new(),
        incomplete_message: "Por favor, preencha todos os campos obrigatórios (foto, estilo, roupa e cenário).",
        template: TEMPLATE,
        essay: Some(EssaySpec {
            trigger: (Category::Style, ESSAY_STYLE),
            scenario: Category::Scenario,
            clothes: Category::Clothes,
            preamble: "Crie uma imagem realista e cinematográfica para um ensaio fotográfico.",
            scenes: ESSAY_SCENES,
        }),
        export_folder: "StyleMundo_Ensaio_Completo",
        export_prefix: "stylumundo_essay",
    }
}

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::{Category, ModuleCatalog, ModuleKind};
use crate::credits::CreditGate;
use crate::error::AppError;
use crate::gemini::{GeminiError, ImageGenerator};
use crate::models::{CategoryOptions, GeneratedImageResult, GenerationRequest, SessionView, UploadView};
use crate::prompt::{self, ComposeOptions};
use crate::selection::{SelectionState, Snapshot};
use crate::upload::UploadedImage;

/// One user's work in one module: choices, base photo, budget and the last
/// batch of images.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub module: ModuleKind,
    selection: SelectionState,
    upload: Option<UploadedImage>,
    credits: CreditGate,
    results: Vec<GeneratedImageResult>,
    error: Option<String>,
    in_flight: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PlannedImage {
    pub request: GenerationRequest,
    pub summary: String,
}

/// Everything needed to call the generator, detached from the session so the
/// calls can run without holding the store lock.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub session_id: Uuid,
    pub items: Vec<PlannedImage>,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<GeneratedImageResult>,
    pub requested: usize,
    pub failure: Option<GeminiError>,
}

impl Session {
    pub fn new(module: ModuleKind, credits: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            module,
            selection: SelectionState::new(),
            upload: None,
            credits: CreditGate::new(credits),
            results: Vec::new(),
            error: None,
            in_flight: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn catalog(&self) -> &'static ModuleCatalog {
        self.module.catalog()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn results(&self) -> &[GeneratedImageResult] {
        &self.results
    }

    pub fn credits(&self) -> u32 {
        self.credits.remaining()
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn select(&mut self, category: Category, value: Option<&str>) -> Result<bool, AppError> {
        let changed = self.selection.select(self.catalog(), category, value)?;
        if changed {
            self.error = None;
            self.touch();
        }
        Ok(changed)
    }

    pub fn options(&self, category: Category) -> Result<CategoryOptions, AppError> {
        let catalog = self.catalog();
        let options = self.selection.available_options(catalog, category)?;
        let label = catalog.spec(category).map(|s| s.label).unwrap_or_default();
        Ok(CategoryOptions {
            category,
            label,
            options: options.to_vec(),
            selected: self.selection.get(category).map(str::to_string),
        })
    }

    /// Validates before touching the session; a rejected file keeps the
    /// previous photo.
    pub fn upload(&mut self, mime_type: &str, data: &str) -> Result<(), AppError> {
        let image = UploadedImage::from_base64(mime_type, data)?;
        tracing::info!("📷 Upload accepted for session {}: {} ({} bytes)", self.id, image.mime.as_str(), image.size());
        self.upload = Some(image);
        self.error = None;
        self.touch();
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.selection.snapshot()
    }

    pub fn apply_preset(&mut self, snapshot: &Snapshot) -> Result<(), AppError> {
        self.selection.restore(self.catalog(), snapshot)?;
        self.error = None;
        self.touch();
        Ok(())
    }

    /// Images the next generation would produce: the pose count in essay
    /// mode, otherwise one.
    pub fn required_images(&self) -> usize {
        match self.catalog().essay {
            Some(essay) if essay.is_active(&self.selection) => self
                .selection
                .get(essay.scenario)
                .and_then(|scenario| essay.scene(scenario))
                .map(|scene| scene.poses.len())
                .unwrap_or(1),
            _ => 1,
        }
    }

    fn missing_message(&self) -> Option<&'static str> {
        let catalog = self.catalog();
        match self.selection.missing_requirement(catalog) {
            Some(incomplete) => Some(incomplete.message),
            None if self.upload.is_none() => Some(catalog.incomplete_message),
            None => None,
        }
    }

    /// Gates a generation and builds its requests. On success the session is
    /// marked in flight until [`commit`](Self::commit).
    pub fn prepare(&mut self, options: ComposeOptions) -> Result<GenerationPlan, AppError> {
        if self.in_flight {
            return Err(AppError::GenerationInProgress);
        }
        if let Some(incomplete) = self.selection.missing_requirement(self.catalog()) {
            tracing::warn!("⚠️ Session {} is missing {:?}", self.id, incomplete.missing);
            return Err(AppError::IncompleteSelection { message: incomplete.message.to_string() });
        }
        let Some(upload) = self.upload.as_ref() else {
            return Err(AppError::IncompleteSelection { message: self.catalog().incomplete_message.to_string() });
        };

        let catalog = self.catalog();
        let incomplete = |_: prompt::ComposeError| AppError::IncompleteSelection { message: catalog.incomplete_message.to_string() };
        let summary = prompt::summary(&catalog.template, &self.selection);
        let prompts: Vec<String> = match catalog.essay {
            Some(essay) if essay.is_active(&self.selection) => {
                prompt::compose_essay(&catalog.template, &essay, &self.selection).map_err(incomplete)?
            }
            _ => vec![prompt::compose(&catalog.template, &self.selection, options).map_err(incomplete)?.prompt],
        };

        self.credits.ensure(prompts.len() as u32)?;

        let items = prompts
            .into_iter()
            .map(|prompt| PlannedImage {
                request: GenerationRequest::new(upload.bytes.clone(), upload.mime, prompt),
                summary: summary.clone(),
            })
            .collect::<Vec<_>>();

        tracing::info!("🚀 Session {} ({}) generating {} image(s)", self.id, self.module, items.len());
        self.in_flight = true;
        self.error = None;
        self.touch();
        Ok(GenerationPlan { session_id: self.id, items })
    }

    /// Applies a finished batch: charges one credit per image received, shows
    /// what came back, and surfaces the failure if the batch stopped early.
    pub fn commit(&mut self, outcome: BatchOutcome) -> Result<(), AppError> {
        self.in_flight = false;
        self.credits.consume(outcome.results.len() as u32);
        let completed = outcome.results.len();
        if !outcome.results.is_empty() {
            self.results = outcome.results;
        }
        self.touch();

        match outcome.failure {
            Some(err) => {
                let err = AppError::generation_failed(&err, completed, outcome.requested);
                self.error = Some(err.to_string());
                Err(err)
            }
            None => {
                tracing::info!("✅ Session {} received {} image(s), {} credits left", self.id, completed, self.credits());
                Ok(())
            }
        }
    }

    /// Back to a blank form. Credits survive; a call already in flight still
    /// lands on commit.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.upload = None;
        self.results.clear();
        self.error = None;
        self.touch();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            module: self.module,
            selection: self.selection().clone(),
            upload: self.upload.as_ref().map(|u| UploadView {
                mime_type: u.mime.as_str(),
                size: u.size(),
                received_at: u.received_at,
            }),
            credits: self.credits(),
            required_credits: self.required_images() as u32,
            complete: self.upload.is_some() && self.selection.is_complete(self.catalog()),
            missing_message: self.missing_message(),
            generating: self.is_generating(),
            results: self.results.clone(),
            error: self.error.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Issues the plan's requests one after another and stops at the first
/// failure; images produced before it are kept.
pub async fn run_plan(generator: &dyn ImageGenerator, plan: GenerationPlan) -> BatchOutcome {
    let requested = plan.items.len();
    let mut results = Vec::with_capacity(requested);

    for (i, item) in plan.items.into_iter().enumerate() {
        match generator.generate(&item.request).await {
            Ok(image_base64) => results.push(GeneratedImageResult {
                id: Uuid::new_v4(),
                image_base64,
                mime_type: "image/jpeg".to_string(),
                prompt: item.request.prompt().to_string(),
                summary: item.summary,
                timestamp: Utc::now(),
            }),
            Err(err) => {
                tracing::error!("❌ Image {}/{} for session {} failed: {}", i + 1, requested, plan.session_id, err);
                return BatchOutcome { results, requested, failure: Some(err) };
            }
        }
    }

    BatchOutcome { results, requested, failure: None }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::upload::fixtures::jpeg_base64;
    use pretty_assertions::assert_eq;

    fn ready_session(module: ModuleKind, credits: u32, pairs: &[(Category, &str)]) -> Session {
        let mut session = Session::new(module, credits);
        for (category, value) in pairs {
            session.select(*category, Some(value)).unwrap();
        }
        session.upload("image/jpeg", &jpeg_base64()).unwrap();
        session
    }

    fn essay_session(credits: u32) -> Session {
        ready_session(
            ModuleKind::Style,
            credits,
            &[
                (Category::Style, crate::modules::style::ESSAY_STYLE),
                (Category::Clothes, "Streetwear"),
                (Category::Scenario, "Rooftop Moderno"),
            ],
        )
    }

    async fn generate(session: &mut Session, generator: &ScriptedGenerator) -> Result<(), AppError> {
        let plan = session.prepare(ComposeOptions::default())?;
        let outcome = run_plan(generator, plan).await;
        session.commit(outcome)
    }

    #[tokio::test]
    async fn success_charges_one_credit_and_shows_the_image() {
        let mut session = ready_session(ModuleKind::Life, 10, &life_selection());
        let generator = ScriptedGenerator::default();
        generate(&mut session, &generator).await.unwrap();

        assert_eq!(session.credits(), 9);
        assert_eq!(session.results().len(), 1);
        assert!(!session.is_generating());
        assert_eq!(
            session.results()[0].summary,
            "Lifestyle: Carros, Cenário: Estrada panorâmica, Ação: Dirigindo em movimento, Roupa: Casual elegante, Iluminação: Diurno ensolarado"
        );
    }

    #[tokio::test]
    async fn failure_keeps_credits_and_previous_results() {
        let mut session = ready_session(ModuleKind::Life, 10, &life_selection());
        let generator = ScriptedGenerator::new(vec![Ok("Zmlyc3Q=".into()), Err(GeminiError::NoImage)]);
        generate(&mut session, &generator).await.unwrap();

        let err = generate(&mut session, &generator).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailure { completed: 0, requested: 1, .. }));
        assert_eq!(session.credits(), 9);
        assert_eq!(session.results()[0].image_base64, "Zmlyc3Q=");
        assert!(session.view().error.unwrap().starts_with("Falha ao gerar a imagem"));
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn essay_produces_ten_images_for_ten_credits() {
        let mut session = essay_session(10);
        assert_eq!(session.required_images(), 10);
        let generator = ScriptedGenerator::default();
        generate(&mut session, &generator).await.unwrap();

        assert_eq!(session.results().len(), 10);
        assert_eq!(session.credits(), 0);
        let prompts = generator.prompts.lock();
        assert!(prompts.iter().all(|p| p.contains("A pessoa está vestindo: Streetwear.")));
        assert!(prompts[0].ends_with("Pose: Em pé, mãos nos bolsos, olhando o horizonte, expressão confiante."));
    }

    #[tokio::test]
    async fn essay_needs_the_whole_batch_in_credits() {
        let mut session = essay_session(9);
        let generator = ScriptedGenerator::default();
        let err = generate(&mut session, &generator).await.unwrap_err();
        assert!(matches!(err, AppError::QuotaExhausted(_)));
        assert_eq!(generator.calls(), 0);
        assert_eq!(session.credits(), 9);
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn partial_batch_charges_only_completed_images() {
        let mut session = essay_session(10);
        let mut script: Vec<Result<String, GeminiError>> = (0..3).map(|_| Ok("aW1n".to_string())).collect();
        script.push(Err(GeminiError::Http("connection reset".into())));
        let generator = ScriptedGenerator::new(script);

        let err = generate(&mut session, &generator).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailure { completed: 3, requested: 10, .. }));
        assert_eq!(generator.calls(), 4);
        assert_eq!(session.results().len(), 3);
        assert_eq!(session.credits(), 7);
    }

    #[tokio::test]
    async fn zero_credits_blocks_before_any_call() {
        let mut session = ready_session(ModuleKind::Life, 0, &life_selection());
        let generator = ScriptedGenerator::default();
        let err = generate(&mut session, &generator).await.unwrap_err();
        assert!(matches!(err, AppError::QuotaExhausted(_)));
        assert_eq!(generator.calls(), 0);
    }

    #[test]
    fn incomplete_or_photo_missing_is_rejected_with_module_message() {
        let mut session = Session::new(ModuleKind::Life, 10);
        for (category, value) in life_selection() {
            session.select(category, Some(value)).unwrap();
        }
        let err = session.prepare(ComposeOptions::default()).unwrap_err();
        match err {
            AppError::IncompleteSelection { message } => assert!(message.contains("foto")),
            other => panic!("unexpected: {other:?}"),
        }

        session.upload("image/jpeg", &jpeg_base64()).unwrap();
        session.select(Category::LightingClimate, None).unwrap();
        assert!(matches!(
            session.prepare(ComposeOptions::default()),
            Err(AppError::IncompleteSelection { .. })
        ));
        assert!(!session.is_generating());
    }

    #[test]
    fn football_without_team_gets_the_team_message() {
        let mut session = ready_session(
            ModuleKind::Sport,
            10,
            &[
                (Category::Sport, "Futebol"),
                (Category::Scenario, "Estádio"),
                (Category::ActionStyle, "Driblando"),
                (Category::LightingTheme, "Noturna"),
                (Category::Country, "Brasil"),
            ],
        );
        match session.prepare(ComposeOptions::default()).unwrap_err() {
            AppError::IncompleteSelection { message } => {
                assert_eq!(message, "Por favor, selecione um time para Futebol.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn second_prepare_while_in_flight_is_refused() {
        let mut session = ready_session(ModuleKind::Life, 10, &life_selection());
        session.prepare(ComposeOptions::default()).unwrap();
        assert!(matches!(session.prepare(ComposeOptions::default()), Err(AppError::GenerationInProgress)));
    }

    #[tokio::test]
    async fn reset_does_not_cancel_the_call_in_flight() {
        let mut session = ready_session(ModuleKind::Life, 10, &life_selection());
        let plan = session.prepare(ComposeOptions::default()).unwrap();
        session.reset();
        assert_eq!(session.selection(), &SelectionState::new());

        let outcome = run_plan(&ScriptedGenerator::default(), plan).await;
        session.commit(outcome).unwrap();
        assert_eq!(session.credits(), 9);
        assert_eq!(session.results().len(), 1);
        assert!(!session.view().complete);
    }

    #[test]
    fn rejected_upload_keeps_previous_photo() {
        let mut session = ready_session(ModuleKind::Life, 10, &life_selection());
        let err = session.upload("image/gif", "R0lGODlh").unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));
        let view = session.view();
        assert_eq!(view.upload.unwrap().mime_type, "image/jpeg");
        assert!(view.complete);
    }

    #[test]
    fn preset_round_trips_through_the_session() {
        let source = ready_session(ModuleKind::Life, 10, &life_selection());
        let mut target = Session::new(ModuleKind::Life, 10);
        target.apply_preset(&source.snapshot()).unwrap();
        assert_eq!(target.selection(), source.selection());
    }
}

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use futures::StreamExt;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::timeout_duration;
use crate::enums::commands::Commands;
use crate::enums::notes_provider::NotesProvider;
use crate::enums::transport_error::TransportError;
use crate::errors::{PrNotesError, PrNotesResult};
use crate::helpers::config_helper::ConfigHelper;
use crate::logger::note_printer::NotePrinter;
use crate::services::github_change_source::GithubChangeSource;
use crate::services::note_generator::NoteGenerator;
use crate::services::notes_backends::anthropic::AnthropicNotesBackend;
use crate::services::notes_backends::http::HttpNotesBackend;
use crate::services::sqlite_summary_cache::SqliteSummaryCache;
use crate::structs::change_record::ChangeRecord;
use crate::structs::config::config::Config;
use crate::structs::generation_outcome::GenerationOutcome;
use crate::traits::change_source::ChangeSource;
use crate::traits::notes_backend::NotesBackend;
use crate::traits::summary_cache::SummaryCache;

pub struct CommandRunner {
    config_path: Option<PathBuf>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub const fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> PrNotesResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Fetch { page, all_pages } => self.fetch_command(page, all_pages).await,
            Commands::List => self.list_command().await,
            Commands::Show { id } => self.show_command(&id).await,
            Commands::Generate { ids, all, missing_only } => self.generate_command(ids, all, missing_only).await,
            Commands::Clear => self.clear_command().await,
        };

        if let Some(start) = self.start_time {
            log::debug!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> PrNotesResult<()> {
        log::info!("🚀 Initializing prnotes configuration...");

        let path = ConfigManager::create_sample_config(self.config_path.as_deref())?;
        log::info!("📝 Set [github] owner/repo in {} to choose a repository.", path.display());
        log::info!("🔧 Export ANTHROPIC_API_KEY (and optionally GITHUB_TOKEN) before generating.");
        Ok(())
    }

    async fn fetch_command(&self, page: Option<u32>, all_pages: bool) -> PrNotesResult<()> {
        let config = self.load_config()?;
        ConfigManager::validate_github(&config.github).map_err(|errors| PrNotesError::invalid_config(&errors))?;

        let cache = Self::open_cache(&config)?;
        let token = ConfigHelper::read_env(config.github.token_env.as_deref());
        if token.is_none() {
            log::warn!("⚠️ No GitHub token found, unauthenticated rate limits apply");
        }
        let source = GithubChangeSource::new(&config.github, token);

        // Refetching must not wipe notes generated earlier for the same change.
        let previous: HashMap<String, ChangeRecord> = cache
            .get_all()
            .await?
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        let mut page_token = page.map(|p| p.to_string());
        let mut total = 0;

        loop {
            let page = source.fetch_page(page_token.as_deref()).await?;
            let mut items = page.items;

            for record in &mut items {
                if let Some(old) = previous.get(&record.id) {
                    record.carry_notes_from(old);
                }
            }

            total += items.len();
            cache.upsert_many(items).await?;

            match page.next_page_token {
                Some(next) if all_pages => page_token = Some(next),
                Some(next) => {
                    log::info!("➡️ More changes available: prnotes fetch --page {}", next);
                    break;
                }
                None => break,
            }
        }

        log::info!("✅ Cached {} merged changes", total);
        Ok(())
    }

    async fn list_command(&self) -> PrNotesResult<()> {
        let config = self.load_config()?;
        let cache = Self::open_cache(&config)?;
        let records = cache.get_all().await?;

        if records.is_empty() {
            log::info!("⚠️ The cache is empty.");
            log::info!("💡 Run 'prnotes fetch' to load merged pull requests.");
            return Ok(());
        }

        log::info!("📋 Cached changes:");
        log::info!("{}", "=".repeat(60));
        for record in &records {
            let status = match (&record.developer_note, &record.marketing_note) {
                (Some(_), Some(_)) if record.has_both_notes() => "✅",
                (None, None) => "⬜",
                _ => "🟡",
            };
            log::info!("{} {}  {}", status, record.id, record.title());
        }
        log::info!("📊 Total: {} ({} with notes)", records.len(), records.iter().filter(|r| r.has_both_notes()).count());

        Ok(())
    }

    async fn show_command(&self, id: &str) -> PrNotesResult<()> {
        let config = self.load_config()?;
        let cache = Self::open_cache(&config)?;
        let record = cache
            .get(id)
            .await?
            .ok_or_else(|| PrNotesError::ChangeNotFound { id: id.to_string() })?;

        log::info!("🔗 {}", record.source_url);
        log::info!("📥 Fetched {}", record.fetched_at.to_rfc3339());
        log::info!("📝 {}", record.description);
        log::info!("🛠️ Developer notes: {}", record.developer_note.as_deref().unwrap_or("(none)"));
        log::info!("📣 Marketing notes: {}", record.marketing_note.as_deref().unwrap_or("(none)"));
        if let Some(at) = record.notes_updated_at {
            log::info!("🕒 Notes updated {}", at.to_rfc3339());
        }

        Ok(())
    }

    async fn generate_command(&self, ids: Vec<String>, all: bool, missing_only: bool) -> PrNotesResult<()> {
        let config = self.load_config()?;
        ConfigManager::validate_config(&config).map_err(|errors| PrNotesError::invalid_config(&errors))?;

        let cache = Self::open_cache(&config)?;
        let records = Self::select_records(cache.as_ref(), ids, all, missing_only).await?;

        if records.is_empty() {
            log::info!("⚠️ Nothing to generate.");
            return Ok(());
        }

        let backend = Self::build_backend(&config)?;
        let generator = NoteGenerator::new(
            backend,
            cache,
            timeout_duration(config.generation.request_timeout_secs),
        );

        if let [record] = records.as_slice() {
            let mut printer = NotePrinter::stdout();
            let outcome = generator.generate(record, |progress| printer.on_progress(progress)).await;
            printer.finish()?;
            Self::report_outcome(&record.id, &outcome);
            return outcome.map(|_| ()).map_err(PrNotesError::from);
        }

        let outcomes: Vec<(String, Result<GenerationOutcome, TransportError>)> = futures::stream::iter(records.iter())
            .map(|record| {
                let generator = &generator;
                async move {
                    let outcome = generator
                        .generate(record, |progress| log::debug!("{}: {:?} updated", progress.id, progress.changed))
                        .await;
                    (record.id.clone(), outcome)
                }
            })
            .buffer_unordered(config.generation.max_concurrent)
            .collect()
            .await;

        let mut failed = 0;
        for (id, outcome) in &outcomes {
            Self::report_outcome(id, outcome);
            if outcome.is_err() {
                failed += 1;
            }
        }

        log::info!("📊 {} succeeded, {} failed", outcomes.len() - failed, failed);
        Self::batch_result(failed, outcomes.len())
    }

    async fn clear_command(&self) -> PrNotesResult<()> {
        let config = self.load_config()?;
        let cache = Self::open_cache(&config)?;
        cache.clear_all().await?;
        log::info!("🧹 Cache cleared");
        Ok(())
    }

    async fn select_records(
        cache: &dyn SummaryCache,
        ids: Vec<String>,
        all: bool,
        missing_only: bool,
    ) -> PrNotesResult<Vec<ChangeRecord>> {
        if all {
            let records = cache.get_all().await?;
            return Ok(records
                .into_iter()
                .filter(|record| !missing_only || !record.has_both_notes())
                .collect());
        }

        if ids.is_empty() {
            return Err(PrNotesError::config_error(
                "no change ids given",
                Some("Pass ids from 'prnotes list' or use --all"),
            ));
        }

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let record = cache
                .get(&id)
                .await?
                .ok_or_else(|| PrNotesError::ChangeNotFound { id: id.clone() })?;
            records.push(record);
        }
        Ok(records)
    }

    fn batch_result(failed: usize, total: usize) -> PrNotesResult<()> {
        if failed == 0 {
            Ok(())
        } else {
            Err(PrNotesError::GenerationFailed { failed, total })
        }
    }

    fn report_outcome(id: &str, outcome: &Result<GenerationOutcome, TransportError>) {
        match outcome {
            Ok(outcome) if outcome.developer_note.is_empty() && outcome.marketing_note.is_empty() => {
                log::warn!("⚠️ {}: the backend returned no notes", id);
            }
            Ok(outcome) => {
                if outcome.persist_error.is_some() {
                    log::warn!("⚠️ {}: notes generated but not saved to the cache", id);
                }
            }
            Err(e) => log::error!("❌ {}: {}", id, e),
        }
    }

    fn load_config(&self) -> PrNotesResult<Config> {
        ConfigManager::load(self.config_path.as_deref())
    }

    fn open_cache(config: &Config) -> PrNotesResult<Arc<dyn SummaryCache>> {
        let path = ConfigHelper::expand_home(&config.cache.path);
        Ok(Arc::new(SqliteSummaryCache::open(path)?))
    }

    fn build_backend(config: &Config) -> PrNotesResult<Arc<dyn NotesBackend>> {
        match config.ai.provider {
            NotesProvider::Anthropic => {
                let env_name = config.ai.api_key_env.as_deref();
                let api_key = ConfigHelper::read_env(env_name).ok_or_else(|| {
                    PrNotesError::config_error(
                        &format!("API key not found in ${}", env_name.unwrap_or("<unset>")),
                        Some("Export the key or set ai.api_key_env in config.toml"),
                    )
                })?;
                Ok(Arc::new(AnthropicNotesBackend::new(api_key, &config.ai)))
            }
            NotesProvider::Http => {
                let endpoint = config
                    .ai
                    .endpoint
                    .clone()
                    .ok_or_else(|| PrNotesError::config_error("ai.endpoint is not set", None))?;
                Ok(Arc::new(HttpNotesBackend::new(endpoint)))
            }
        }
    }
}

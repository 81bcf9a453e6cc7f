//! Knowledge lookup service — answers course questions.
//!
//! The keyword matcher runs first under the default `hybrid` strategy. When it
//! finds nothing, the question goes to the model with the instructor template,
//! or gets a fixed fallback answer if no provider is configured.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use aula_core::config::{Config, RagStrategy};
use aula_core::types::{Failure, KnowledgeEntry, RagAnswer, RagResult, Source, SourceType};
use aula_core::utils::truncate_string;
use aula_providers::ProviderAdapter;

use crate::dispatch::generate_offloaded;
use crate::knowledge::KNOWLEDGE_BASE;
use crate::prompts;

/// Minimum token length (in characters, exclusive) for per-word matching.
const MIN_TOKEN_CHARS: usize = 3;

/// Entries relevant to `question`, in knowledge-base order, at most `limit`.
///
/// An entry matches when the whole lowercased question occurs in its title or
/// content, or when any question word longer than three characters occurs in
/// its content. Entries are deduplicated by id; the first one wins.
pub fn match_entries<'a>(
    knowledge: &'a [KnowledgeEntry],
    question: &str,
    limit: usize,
) -> Vec<&'a KnowledgeEntry> {
    let q = question.to_lowercase();
    let words: Vec<&str> = q
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .collect();

    let mut seen = HashSet::new();
    knowledge
        .iter()
        .filter(|entry| {
            let title = entry.title.to_lowercase();
            let content = entry.content.to_lowercase();
            title.contains(&q) || content.contains(&q) || words.iter().any(|w| content.contains(w))
        })
        .filter(|entry| seen.insert(entry.id))
        .take(limit)
        .collect()
}

/// Answer built from matched entries, or the "not found" answer when empty.
pub fn keyword_answer(matches: &[&KnowledgeEntry]) -> RagAnswer {
    if matches.is_empty() {
        return RagAnswer {
            answer: prompts::NOT_FOUND_ANSWER.to_string(),
            sources: Vec::new(),
            total_results: 0,
            source_type: SourceType::NotFound,
        };
    }

    let answer = matches
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}\n{}", i + 1, entry.title, entry.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    RagAnswer {
        answer,
        sources: matches.iter().map(|entry| Source::entry(entry)).collect(),
        total_results: matches.len(),
        source_type: SourceType::KnowledgeBase,
    }
}

fn fallback_answer() -> RagAnswer {
    RagAnswer {
        answer: prompts::FALLBACK_ANSWER.to_string(),
        sources: Vec::new(),
        total_results: 0,
        source_type: SourceType::NotFound,
    }
}

pub struct LookupService {
    adapter: Arc<dyn ProviderAdapter>,
    strategy: RagStrategy,
    knowledge: &'static [KnowledgeEntry],
    max_results: usize,
    timeout: Duration,
}

impl LookupService {
    pub fn new(adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            adapter,
            strategy: RagStrategy::default(),
            knowledge: KNOWLEDGE_BASE,
            max_results: 3,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(config: &Config, adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self::new(adapter)
            .with_strategy(config.rag.strategy)
            .with_max_results(config.rag.max_results)
            .with_timeout(Duration::from_secs(config.provider.timeout_secs.max(1)))
    }

    pub fn with_strategy(mut self, strategy: RagStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_knowledge(mut self, knowledge: &'static [KnowledgeEntry]) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn strategy(&self) -> RagStrategy {
        self.strategy
    }

    /// Answer one course question.
    pub async fn lookup(&self, question: &str) -> RagResult {
        if question.trim().is_empty() {
            return RagResult::Failure(Failure::validation(prompts::EMPTY_QUESTION));
        }

        let answer = match self.strategy {
            RagStrategy::Keyword => {
                keyword_answer(&match_entries(self.knowledge, question, self.max_results))
            }
            RagStrategy::Llm => self.ask_model(question).await,
            RagStrategy::Hybrid => {
                let matches = match_entries(self.knowledge, question, self.max_results);
                if matches.is_empty() {
                    info!(
                        question = %truncate_string(question, 50),
                        "no knowledge base match, asking the model"
                    );
                    self.ask_model(question).await
                } else {
                    keyword_answer(&matches)
                }
            }
        };

        debug!(
            strategy = %self.strategy,
            source_type = ?answer.source_type,
            total = answer.total_results,
            "lookup answered"
        );
        RagResult::Answer(answer)
    }

    async fn ask_model(&self, question: &str) -> RagAnswer {
        let Some(provider) = self.adapter.handle().await else {
            return fallback_answer();
        };

        match generate_offloaded(provider, prompts::instructor_prompt(question), self.timeout).await {
            Ok(generation) => RagAnswer {
                answer: generation.text,
                sources: vec![Source::model(prompts::LLM_SOURCE_NOTE)],
                total_results: 1,
                source_type: SourceType::Llm,
            },
            Err(e) => {
                error!(model = %self.adapter.model(), error = %e, "lookup generation failed");
                RagAnswer {
                    answer: prompts::llm_error_answer(&e.to_string()),
                    sources: Vec::new(),
                    total_results: 0,
                    source_type: SourceType::Error,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedAdapter, MockProvider, Script};
    use aula_core::types::{Category, FailureKind};

    fn ids(matches: &[&KnowledgeEntry]) -> Vec<&'static str> {
        matches.iter().map(|e| e.id).collect()
    }

    fn source_ids(answer: &RagAnswer) -> Vec<String> {
        answer
            .sources
            .iter()
            .filter_map(|s| match s {
                Source::Entry { id, .. } => Some(id.clone()),
                Source::Model { .. } => None,
            })
            .collect()
    }

    fn answer(result: RagResult) -> RagAnswer {
        match result {
            RagResult::Answer(a) => a,
            RagResult::Failure(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    fn hybrid(adapter: Arc<FixedAdapter>) -> LookupService {
        LookupService::new(adapter).with_timeout(Duration::from_millis(200))
    }

    // ── matcher ──

    #[test]
    fn matches_question_about_chatgpt() {
        let matches = match_entries(KNOWLEDGE_BASE, "qué es chatgpt", 3);
        assert_eq!(ids(&matches), ["chatgpt_intro", "chatgpt_usos", "prompt_que_es"]);
        assert_eq!(matches[0].title, "¿Qué es ChatGPT?");
    }

    #[test]
    fn truncates_to_limit_in_order() {
        let all = match_entries(KNOWLEDGE_BASE, "chatgpt", usize::MAX);
        assert_eq!(all.len(), 10);
        let top = match_entries(KNOWLEDGE_BASE, "chatgpt", 3);
        assert_eq!(ids(&top), ids(&all[..3]));
    }

    #[test]
    fn matches_are_case_insensitive() {
        let lower = match_entries(KNOWLEDGE_BASE, "estafas", 3);
        let upper = match_entries(KNOWLEDGE_BASE, "ESTAFAS", 3);
        assert_eq!(ids(&lower), ["seguridad_estafas"]);
        assert_eq!(ids(&lower), ids(&upper));
    }

    #[test]
    fn short_words_are_ignored() {
        assert_eq!(
            ids(&match_entries(KNOWLEDGE_BASE, "cómo hacer buenos prompts", 3)),
            ["primeros_pasos"]
        );
        assert!(match_entries(KNOWLEDGE_BASE, "la de un", 3).is_empty());
    }

    #[test]
    fn accented_tokens_count_characters() {
        assert_eq!(
            ids(&match_entries(KNOWLEDGE_BASE, "contraseñas", 3)),
            ["seguridad_basica", "seguridad_privacidad"]
        );
    }

    #[test]
    fn no_match_for_gibberish() {
        assert!(match_entries(KNOWLEDGE_BASE, "xyzabc123", 3).is_empty());
    }

    static DUPLICATED: &[KnowledgeEntry] = &[
        KnowledgeEntry {
            id: "a",
            title: "Huerta",
            category: Category::Curso,
            content: "tomates en la huerta",
        },
        KnowledgeEntry {
            id: "a",
            title: "Huerta otra vez",
            category: Category::Curso,
            content: "tomates repetidos",
        },
        KnowledgeEntry {
            id: "b",
            title: "Cocina",
            category: Category::Curso,
            content: "salsa de tomates",
        },
    ];

    #[test]
    fn entry_matching_two_ways_appears_once() {
        // "huerta" hits the title, the content, and the word rule.
        let matches = match_entries(DUPLICATED, "huerta", 3);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Huerta");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let matches = match_entries(DUPLICATED, "tomates", 3);
        assert_eq!(ids(&matches), ["a", "b"]);
        assert_eq!(matches[0].title, "Huerta");
    }

    #[test]
    fn keyword_answer_numbers_entries() {
        let matches = match_entries(KNOWLEDGE_BASE, "seguridad privacidad", 3);
        let answer = keyword_answer(&matches);
        assert_eq!(answer.total_results, 2);
        assert_eq!(answer.source_type, SourceType::KnowledgeBase);
        assert!(answer.answer.starts_with("1. Seguridad básica con IA\n"));
        assert!(answer.answer.contains("\n\n2. Privacidad y datos personales\n"));
    }

    // ── service ──

    #[tokio::test]
    async fn empty_question_is_rejected() {
        let provider = Arc::new(MockProvider::new(Script::Reply("x".into())));
        let adapter = Arc::new(FixedAdapter::with(provider.clone()));
        let svc = hybrid(adapter.clone());
        match svc.lookup("  ").await {
            RagResult::Failure(f) => {
                assert_eq!(f.error, "La pregunta está vacía");
                assert_eq!(f.kind, FailureKind::Validation);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(provider.calls(), 0);
        assert_eq!(adapter.handles(), 0);
    }

    #[tokio::test]
    async fn knowledge_match_skips_model() {
        let provider = Arc::new(MockProvider::new(Script::Reply("x".into())));
        let adapter = Arc::new(FixedAdapter::with(provider.clone()));
        let a = answer(hybrid(adapter.clone()).lookup("qué es chatgpt").await);
        assert!(a.total_results >= 1);
        assert_eq!(a.source_type, SourceType::KnowledgeBase);
        assert_eq!(source_ids(&a)[0], "chatgpt_intro");
        assert_eq!(provider.calls(), 0);
        assert_eq!(adapter.handles(), 0);
    }

    #[tokio::test]
    async fn lookup_is_idempotent() {
        let svc = hybrid(Arc::new(FixedAdapter::unavailable()));
        let first = answer(svc.lookup("¿qué es un prompt?").await);
        let second = answer(svc.lookup("¿qué es un prompt?").await);
        assert_eq!(source_ids(&first), ["prompt_que_es", "prompt_consejos", "primeros_pasos"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fallback_without_provider() {
        let svc = hybrid(Arc::new(FixedAdapter::unavailable()));
        let a = answer(svc.lookup("xyzabc123").await);
        assert_eq!(a.total_results, 0);
        assert!(a.sources.is_empty());
        assert_eq!(a.source_type, SourceType::NotFound);
        assert!(a.answer.contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn model_answers_unmatched_question() {
        let provider = Arc::new(MockProvider::new(Script::Reply("Respuesta del instructor".into())));
        let svc = hybrid(Arc::new(FixedAdapter::with(provider.clone())));
        let a = answer(svc.lookup("xyzabc123").await);

        assert_eq!(a.answer, "Respuesta del instructor");
        assert_eq!(a.total_results, 1);
        assert_eq!(a.source_type, SourceType::Llm);
        assert_eq!(a.sources, vec![Source::model(prompts::LLM_SOURCE_NOTE)]);

        let sent = provider.last_prompt().unwrap();
        assert!(sent.starts_with("Eres un instructor paciente"));
        assert!(sent.ends_with("xyzabc123"));
    }

    #[tokio::test]
    async fn model_error_is_apology_not_failure() {
        let provider = Arc::new(MockProvider::new(Script::Fail));
        let svc = hybrid(Arc::new(FixedAdapter::with(provider)));
        let a = answer(svc.lookup("xyzabc123").await);
        assert_eq!(a.source_type, SourceType::Error);
        assert_eq!(a.total_results, 0);
        assert!(a.sources.is_empty());
        assert!(a.answer.contains("API returned 500"));
    }

    #[tokio::test]
    async fn keyword_strategy_never_asks_model() {
        let provider = Arc::new(MockProvider::new(Script::Reply("x".into())));
        let adapter = Arc::new(FixedAdapter::with(provider.clone()));
        let svc = hybrid(adapter.clone()).with_strategy(RagStrategy::Keyword);
        let a = answer(svc.lookup("xyzabc123").await);
        assert_eq!(a.source_type, SourceType::NotFound);
        assert_eq!(a.answer, prompts::NOT_FOUND_ANSWER);
        assert_eq!(adapter.handles(), 0);
    }

    #[tokio::test]
    async fn llm_strategy_skips_knowledge_base() {
        let provider = Arc::new(MockProvider::new(Script::Reply("desde el modelo".into())));
        let svc = hybrid(Arc::new(FixedAdapter::with(provider.clone())))
            .with_strategy(RagStrategy::Llm);
        let a = answer(svc.lookup("qué es chatgpt").await);
        assert_eq!(a.source_type, SourceType::Llm);
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn from_config_reads_rag_settings() {
        let mut config = Config::default();
        config.provider.timeout_secs = 0;
        config.rag.strategy = RagStrategy::Keyword;
        config.rag.max_results = 5;
        let svc = LookupService::from_config(&config, Arc::new(FixedAdapter::unavailable()));
        assert_eq!(svc.strategy(), RagStrategy::Keyword);
        assert_eq!(svc.max_results, 5);
        assert_eq!(svc.timeout, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn max_results_is_configurable() {
        let svc = hybrid(Arc::new(FixedAdapter::unavailable())).with_max_results(5);
        let a = answer(svc.lookup("chatgpt").await);
        assert_eq!(a.total_results, 5);
    }

    #[tokio::test]
    async fn custom_knowledge_base() {
        let svc = hybrid(Arc::new(FixedAdapter::unavailable())).with_knowledge(DUPLICATED);
        let a = answer(svc.lookup("salsa").await);
        assert_eq!(source_ids(&a), ["b"]);
    }

    #[tokio::test]
    async fn answer_serializes_for_client() {
        let svc = hybrid(Arc::new(FixedAdapter::unavailable()));
        let value = serde_json::to_value(svc.lookup("estafas").await).unwrap();
        assert_eq!(value["source_type"], "knowledge_base");
        assert_eq!(value["total_results"], 1);
        assert_eq!(value["sources"][0]["id"], "seguridad_estafas");
        assert_eq!(value["sources"][0]["category"], "seguridad");
    }
}

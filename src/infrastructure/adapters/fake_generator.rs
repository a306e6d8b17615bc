//! Fake Story Generator - 离线生成服务
//!
//! 不调用任何外部服务，按简报确定性地产出文本。
//! 输出刻意带有真实模型常见的噪声（编号、markdown、代码块包裹），
//! 可配置前 N 次调用返回限流，用于演示重试退避

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    CoverGeneratorPort, GenerationError, MetaGeneratorPort, SlugGeneratorPort, StoryWriterPort,
    TitleGeneratorPort, TitleRequest, RATE_LIMIT_STATUS,
};
use crate::domain::draft::{Brief, MAX_CHAPTERS};
use crate::domain::TITLE_BATCH_SIZE;

const OUTLINE_TITLES: [(&str, &str); MAX_CHAPTERS] = [
    ("Der Anfang", "Ein Brief ohne Absender"),
    ("Eine Spur im Regen", "Nasse Schuhe"),
    ("Der stille Zeuge", "Niemand spricht"),
    ("Nacht am Bahnhof", "Der letzte Zug"),
    ("Die Wahrheit", "Alles kommt ans Licht"),
    ("Das Ende", "Ein neuer Morgen"),
];

const TITLE_WORDS: [&str; 8] = [
    "Herz unter dem Tisch",
    "Stunde 23:59",
    "Finger im Kaffee",
    "Der letzte Zug",
    "Schatten am Fenster",
    "Eis, das singt",
    "Stumme Flammen",
    "Die Uhr ohne Zeiger",
];

const SENTENCES: [&str; 6] = [
    "Es ist spät am Abend.",
    "Die Straße ist leer und nass.",
    "Niemand weiß, wer die Tür geöffnet hat.",
    "Ein Mann wartet vor dem Haus.",
    "Sie hört Schritte im Treppenhaus.",
    "Am Morgen ist alles anders.",
];

/// 封面关键词数量
const COVER_KEYWORDS: usize = 3;

/// Fake Story Generator 配置
#[derive(Debug, Clone, Default)]
pub struct FakeStoryGeneratorConfig {
    /// 每次调用的模拟延迟（毫秒）
    pub latency_ms: u64,
    /// 前 N 次调用返回限流
    pub rate_limited_calls: u32,
}

/// Fake Story Generator
///
/// 同时实现全部生成端口
pub struct FakeStoryGenerator {
    config: FakeStoryGeneratorConfig,
    remaining_rate_limits: AtomicU32,
    calls: AtomicU32,
}

impl FakeStoryGenerator {
    pub fn new(config: FakeStoryGeneratorConfig) -> Self {
        tracing::info!(
            latency_ms = config.latency_ms,
            rate_limited_calls = config.rate_limited_calls,
            "FakeStoryGenerator initialized"
        );
        Self {
            remaining_rate_limits: AtomicU32::new(config.rate_limited_calls),
            calls: AtomicU32::new(0),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeStoryGeneratorConfig::default())
    }

    /// 累计调用次数（含被限流的调用）
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// 模拟一次远程调用：延迟，并按配额返回限流
    async fn round_trip(&self, operation: &str) -> Result<(), GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        let limited = self
            .remaining_rate_limits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if limited {
            tracing::debug!(operation = operation, "FakeStoryGenerator: simulating rate limit");
            return Err(GenerationError::from_status(
                RATE_LIMIT_STATUS,
                "Resource has been exhausted",
            ));
        }

        tracing::debug!(operation = operation, "FakeStoryGenerator: returning canned text");
        Ok(())
    }
}

#[async_trait]
impl StoryWriterPort for FakeStoryGenerator {
    async fn generate_outline(&self, brief: &Brief) -> Result<Vec<String>, GenerationError> {
        self.round_trip("outline").await?;
        Ok(OUTLINE_TITLES
            .iter()
            .enumerate()
            .map(|(i, (title, subtitle))| {
                let n = i + 1;
                format!("{}. **Kapitel {}: {} – {} ({})**", n, n, title, subtitle, brief.genre())
            })
            .collect())
    }

    async fn generate_chapter(
        &self,
        title: &str,
        brief: &Brief,
    ) -> Result<String, GenerationError> {
        self.round_trip("chapter").await?;

        let target_words = (brief.word_count() as usize / MAX_CHAPTERS).max(1);
        let mut words = 0;
        let mut body = Vec::new();
        for sentence in SENTENCES.iter().cycle() {
            if words >= target_words {
                break;
            }
            words += sentence.split_whitespace().count();
            body.push(*sentence);
        }

        Ok(format!(
            "{} ist ein {} auf Niveau {}.\n\n{}",
            title,
            brief.genre(),
            brief.level(),
            body.join(" ")
        ))
    }
}

#[async_trait]
impl TitleGeneratorPort for FakeStoryGenerator {
    async fn generate_titles(&self, request: &TitleRequest) -> Result<String, GenerationError> {
        self.round_trip("titles").await?;

        // 场景提示决定候选的起始位置
        let offset = request
            .scene
            .as_deref()
            .map(|s| s.chars().count())
            .unwrap_or(request.pages as usize);
        let titles: Vec<&str> = (0..TITLE_BATCH_SIZE)
            .map(|i| TITLE_WORDS[(offset + i) % TITLE_WORDS.len()])
            .collect();

        let json = serde_json::to_string_pretty(&titles)
            .map_err(|e| GenerationError::failed(e.to_string()))?;
        Ok(format!("```json\n{}\n```", json))
    }
}

#[async_trait]
impl CoverGeneratorPort for FakeStoryGenerator {
    async fn generate_cover(&self, prompt: &str) -> Result<String, GenerationError> {
        self.round_trip("cover").await?;

        let keywords: Vec<String> = prompt
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| w.len() > 3)
            .take(COVER_KEYWORDS)
            .map(str::to_lowercase)
            .collect();
        if keywords.is_empty() {
            return Err(GenerationError::malformed("No visual keywords in prompt"));
        }
        Ok(format!(
            "https://source.unsplash.com/800x1200/?{}",
            keywords.join(",")
        ))
    }
}

#[async_trait]
impl SlugGeneratorPort for FakeStoryGenerator {
    async fn generate_slug(&self, title: &str) -> Result<String, GenerationError> {
        self.round_trip("slug").await?;
        // 只去掉标点，大小写与空白交给规整器
        let slug: String = title
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        Ok(format!(" {} ", slug))
    }
}

#[async_trait]
impl MetaGeneratorPort for FakeStoryGenerator {
    async fn generate_meta(&self, title: &str, context: &str) -> Result<String, GenerationError> {
        self.round_trip("meta").await?;
        let hook = context.split('.').next().unwrap_or_default().trim();
        Ok(format!(
            "\"{}\": {}. Eine spannende Geschichte zum Deutschlernen.",
            title, hook
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{Level, Pages};
    use crate::domain::{clean_chapter_title, normalize_slug, parse_title_batch};

    fn brief() -> Brief {
        Brief::new(Level::A2, "Krimi", Pages::new(16).unwrap())
    }

    #[tokio::test]
    async fn test_outline_is_noisy_but_cleanable() {
        let generator = FakeStoryGenerator::with_defaults();
        let outline = generator.generate_outline(&brief()).await.unwrap();

        assert_eq!(outline.len(), MAX_CHAPTERS);
        assert!(outline[0].starts_with("1. **Kapitel 1:"));
        assert_eq!(clean_chapter_title(&outline[0]), "Der Anfang");
        assert_eq!(clean_chapter_title(&outline[3]), "Nacht am Bahnhof");
    }

    #[tokio::test]
    async fn test_chapter_length_follows_brief() {
        let generator = FakeStoryGenerator::with_defaults();
        let text = generator.generate_chapter("Der Anfang", &brief()).await.unwrap();

        assert!(text.starts_with("Der Anfang ist ein Krimi auf Niveau A2."));
        let words = text.split_whitespace().count();
        assert!(words >= 4000 / MAX_CHAPTERS);
    }

    #[tokio::test]
    async fn test_title_batch_is_fenced_json() {
        let generator = FakeStoryGenerator::with_defaults();
        let request = TitleRequest {
            level: Level::B1,
            genre: "Krimi".to_string(),
            word_count: 4000,
            pages: 16,
            scene: Some("Regen".to_string()),
        };
        let raw = generator.generate_titles(&request).await.unwrap();

        assert!(raw.starts_with("```json"));
        let titles = parse_title_batch(&raw).unwrap();
        assert_eq!(titles.len(), TITLE_BATCH_SIZE);
        assert_eq!(titles[0], TITLE_WORDS[5]);
    }

    #[tokio::test]
    async fn test_cover_and_metadata() {
        let generator = FakeStoryGenerator::with_defaults();

        let url = generator
            .generate_cover("A cinematic book cover for a A2 German Krimi book")
            .await
            .unwrap();
        assert_eq!(url, "https://source.unsplash.com/800x1200/?cinematic,book,cover");
        assert!(generator.generate_cover("a b c").await.is_err());

        let slug = generator.generate_slug("Stunde 23:59").await.unwrap();
        assert_eq!(normalize_slug(&slug), "stunde-2359");

        let meta = generator
            .generate_meta("Nachtzug", "Es ist spät am Abend. Die Straße ist leer.")
            .await
            .unwrap();
        assert!(meta.starts_with("\"Nachtzug\": Es ist spät am Abend."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_budget() {
        let generator = FakeStoryGenerator::new(FakeStoryGeneratorConfig {
            latency_ms: 150,
            rate_limited_calls: 2,
        });

        let first = generator.generate_slug("Nachtzug").await;
        assert!(matches!(first, Err(ref e) if e.is_rate_limited()));
        assert!(generator.generate_slug("Nachtzug").await.is_err());
        assert!(generator.generate_slug("Nachtzug").await.is_ok());
        assert_eq!(generator.calls(), 3);
    }
}

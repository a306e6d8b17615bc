//! In-Memory Library - 发布目标
//!
//! 把发布产物转换为可阅读的书目，保存在内存中（新书在前）

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{PublishError, PublisherPort};
use crate::domain::PublishArtifact;

/// In-Memory Library 配置
#[derive(Debug, Clone)]
pub struct InMemoryLibraryConfig {
    /// 书目署名
    pub author: String,
    /// 估算阅读时长用的每分钟词数
    pub reading_wpm: u32,
}

impl Default for InMemoryLibraryConfig {
    fn default() -> Self {
        Self {
            author: "AI Author".to_string(),
            reading_wpm: 200,
        }
    }
}

/// 书库中的一本书
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    /// 体裁
    pub category: String,
    /// 语言等级
    pub difficulty: String,
    pub description: String,
    pub slug: String,
    /// 全部章节，每章以 `## 标题` 开头
    pub content: String,
    pub duration_minutes: u32,
    pub progress: u8,
    pub published_at: DateTime<Utc>,
}

/// 内存书库
pub struct InMemoryLibrary {
    config: InMemoryLibraryConfig,
    books: DashMap<String, (u64, LibraryBook)>,
    sequence: AtomicU64,
}

impl InMemoryLibrary {
    pub fn new(config: InMemoryLibraryConfig) -> Self {
        Self {
            config,
            books: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 把发布产物转换为书目
    pub fn to_book(&self, artifact: &PublishArtifact) -> LibraryBook {
        let content = artifact
            .chapters
            .iter()
            .map(|c| format!("## {}\n\n{}", c.title(), c.content()))
            .collect::<Vec<_>>()
            .join("\n\n");
        let wpm = self.config.reading_wpm.max(1);
        let duration_minutes =
            (f64::from(artifact.brief.word_count()) / f64::from(wpm)).round() as u32;

        LibraryBook {
            id: format!("gen-{}", Uuid::new_v4()),
            title: artifact.title.clone(),
            author: self.config.author.clone(),
            cover_url: artifact.cover_url.clone(),
            category: artifact.brief.genre().to_string(),
            difficulty: artifact.brief.level().to_string(),
            description: artifact.description.clone(),
            slug: artifact.slug.clone(),
            content,
            duration_minutes,
            progress: 0,
            published_at: Utc::now(),
        }
    }

    /// 所有书目，最新发布的在前
    pub fn list(&self) -> Vec<LibraryBook> {
        let mut entries: Vec<(u64, LibraryBook)> =
            self.books.iter().map(|e| e.value().clone()).collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries.into_iter().map(|(_, book)| book).collect()
    }

    pub fn get(&self, id: &str) -> Option<LibraryBook> {
        self.books.get(id).map(|e| e.value().1.clone())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Default for InMemoryLibrary {
    fn default() -> Self {
        Self::new(InMemoryLibraryConfig::default())
    }
}

#[async_trait]
impl PublisherPort for InMemoryLibrary {
    async fn publish(&self, artifact: &PublishArtifact) -> Result<(), PublishError> {
        if artifact.chapters.is_empty() {
            return Err(PublishError::Rejected("Book has no chapters".to_string()));
        }

        let book = self.to_book(artifact);
        let id = book.id.clone();
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.books.insert(id.clone(), (seq, book));

        tracing::info!(
            book_id = %id,
            title = %artifact.title,
            chapters = artifact.chapters.len(),
            "Book added to library"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{DraftAggregate, Level, Pages};
    use crate::domain::DEFAULT_PLACEHOLDER_COVER;

    fn artifact(title: &str) -> PublishArtifact {
        let mut draft = DraftAggregate::new(Level::B1, "Krimi", Pages::new(16).unwrap());
        draft.set_title(title);
        draft.set_description("Eine kurze Geschichte.");
        draft.apply_outline(vec!["Der Anfang".to_string(), "Das Ende".to_string()]);
        let (id, _) = draft.begin_chapter(0).unwrap().unwrap();
        draft.set_chapter_result(id, "Es war einmal.".to_string());
        PublishArtifact::assemble(&draft, DEFAULT_PLACEHOLDER_COVER)
    }

    #[tokio::test]
    async fn test_publish_converts_artifact() {
        let library = InMemoryLibrary::default();
        library.publish(&artifact("Nachtzug")).await.unwrap();

        let books = library.list();
        assert_eq!(books.len(), 1);
        let book = &books[0];
        assert!(book.id.starts_with("gen-"));
        assert_eq!(book.author, "AI Author");
        assert_eq!(book.category, "Krimi");
        assert_eq!(book.difficulty, "B1");
        assert_eq!(book.cover_url, DEFAULT_PLACEHOLDER_COVER);
        assert_eq!(book.content, "## Der Anfang\n\nEs war einmal.\n\n## Das Ende\n\n");
        assert_eq!(book.duration_minutes, 20);
        assert_eq!(book.progress, 0);
        assert_eq!(library.get(&book.id), Some(book.clone()));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let library = InMemoryLibrary::default();
        library.publish(&artifact("Erstes Buch")).await.unwrap();
        library.publish(&artifact("Zweites Buch")).await.unwrap();

        let titles: Vec<String> = library.list().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Zweites Buch", "Erstes Buch"]);
    }

    #[tokio::test]
    async fn test_empty_book_is_rejected() {
        let library = InMemoryLibrary::default();
        let draft = DraftAggregate::new(Level::A1, "Fantasy", Pages::new(8).unwrap());
        let empty = PublishArtifact::assemble(&draft, DEFAULT_PLACEHOLDER_COVER);

        let err = library.publish(&empty).await.unwrap_err();
        assert!(matches!(err, PublishError::Rejected(_)));
        assert!(library.is_empty());
    }

    #[test]
    fn test_duration_uses_reading_speed() {
        let library = InMemoryLibrary::new(InMemoryLibraryConfig {
            author: "Redaktion".to_string(),
            reading_wpm: 150,
        });
        let book = library.to_book(&artifact("Langsam"));
        assert_eq!(book.duration_minutes, 27);
        assert_eq!(book.author, "Redaktion");
    }
}

//! 外部协作方集合
//!
//! 大纲/章节生成与发布为必需项；书名、封面、slug、描述生成可缺省，
//! 缺省时只禁用对应的生成任务（仍可手动填写）

use std::sync::Arc;

use crate::application::ports::{
    CoverGeneratorPort, MetaGeneratorPort, NotifierPort, PublisherPort, SlugGeneratorPort,
    StoryWriterPort, TitleGeneratorPort,
};

#[derive(Clone)]
pub struct Collaborators {
    pub story_writer: Arc<dyn StoryWriterPort>,
    pub publisher: Arc<dyn PublisherPort>,
    pub notifier: Arc<dyn NotifierPort>,
    pub title_generator: Option<Arc<dyn TitleGeneratorPort>>,
    pub cover_generator: Option<Arc<dyn CoverGeneratorPort>>,
    pub slug_generator: Option<Arc<dyn SlugGeneratorPort>>,
    pub meta_generator: Option<Arc<dyn MetaGeneratorPort>>,
}

impl Collaborators {
    pub fn new(
        story_writer: Arc<dyn StoryWriterPort>,
        publisher: Arc<dyn PublisherPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            story_writer,
            publisher,
            notifier,
            title_generator: None,
            cover_generator: None,
            slug_generator: None,
            meta_generator: None,
        }
    }

    pub fn with_title_generator(mut self, generator: Arc<dyn TitleGeneratorPort>) -> Self {
        self.title_generator = Some(generator);
        self
    }

    pub fn with_cover_generator(mut self, generator: Arc<dyn CoverGeneratorPort>) -> Self {
        self.cover_generator = Some(generator);
        self
    }

    pub fn with_slug_generator(mut self, generator: Arc<dyn SlugGeneratorPort>) -> Self {
        self.slug_generator = Some(generator);
        self
    }

    pub fn with_meta_generator(mut self, generator: Arc<dyn MetaGeneratorPort>) -> Self {
        self.meta_generator = Some(generator);
        self
    }
}

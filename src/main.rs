//! Book Studio - 离线演示
//!
//! 用离线生成服务走完五个阶段，发布到内存书库:
//! - Brief: 获取书名候选并确认
//! - Outline: 生成大纲
//! - Chapters: 并发生成全部章节
//! - Cover: 生成封面
//! - Publish: 生成 slug 与描述后发布

use std::sync::Arc;

use bookstudio::application::{Collaborators, Studio, StudioEvent};
use bookstudio::config::{load_config, print_config};
use bookstudio::infrastructure::adapters::{FakeStoryGenerator, InMemoryLibrary};
use bookstudio::infrastructure::events::EventPublisher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},bookstudio={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Book Studio - 书稿生成演示");
    print_config(&config);

    // 事件发布器，订阅方只打印用户可见的通知
    let events = EventPublisher::new().arc();
    let mut rx = events.subscribe();
    let event_logger = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match &event {
                StudioEvent::SlotFailed { slot, message, .. } => {
                    tracing::warn!(slot = %slot, "Notice: {}", message);
                }
                StudioEvent::PublishFailed { error } => {
                    tracing::warn!("Notice: {}", error);
                }
                other => tracing::debug!(event = ?other, "Studio event"),
            }
        }
    });

    // 创建适配器
    let generator = Arc::new(FakeStoryGenerator::new((&config.generator).into()));
    let library = InMemoryLibrary::new((&config.library).into()).arc();

    let collaborators = Collaborators::new(generator.clone(), library.clone(), events.clone())
        .with_title_generator(generator.clone())
        .with_cover_generator(generator.clone())
        .with_slug_generator(generator.clone())
        .with_meta_generator(generator.clone());
    let mut studio = Studio::new(config.studio_settings(), collaborators)?;

    // 1. Brief
    studio.fetch_title_batch(Some("Ein Zug in der Nacht".to_string()));
    studio.settle_all().await;
    let candidates = studio.title_picker().candidates().to_vec();
    tracing::info!(candidates = ?candidates, "Title candidates");
    if !studio.select_title(0) || !studio.confirm_title() {
        anyhow::bail!("No title candidate could be confirmed");
    }
    advance(&mut studio)?;

    // 2. Outline
    studio.generate_outline();
    studio.settle_all().await;
    tracing::info!(outline = ?studio.outline(), "Outline ready");
    advance(&mut studio)?;

    // 3. Chapters
    for index in 0..studio.chapters().len() {
        studio.generate_chapter(index)?;
    }
    let reports = studio.settle_all().await;
    tracing::info!(settled = reports.len(), "Chapters settled");
    advance(&mut studio)?;

    // 4. Cover（进入阶段时已填入默认提示词）
    studio.generate_cover();
    studio.settle_all().await;
    advance(&mut studio)?;

    // 5. Publish
    studio.generate_slug();
    studio.generate_meta();
    studio.settle_all().await;
    tracing::info!(
        slug = %studio.metadata().slug,
        description = %studio.metadata().description,
        fit = studio.description_fit().label(),
        "Metadata ready"
    );

    let artifact = studio.publish().await?;
    tracing::info!(
        title = %artifact.title,
        cover = %artifact.cover_url,
        chapters = artifact.chapters.len(),
        "Published"
    );

    for book in library.list() {
        tracing::info!(
            id = %book.id,
            title = %book.title,
            author = %book.author,
            difficulty = %book.difficulty,
            duration_minutes = book.duration_minutes,
            "Library entry"
        );
    }

    drop(studio);
    drop(events);
    let _ = event_logger.await;

    Ok(())
}

fn advance(studio: &mut Studio) -> anyhow::Result<()> {
    let from = studio.stage();
    if !studio.advance() {
        anyhow::bail!("Cannot leave stage {}", from);
    }
    Ok(())
}

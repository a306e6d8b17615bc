//! Events - 工作室事件推送

mod publisher;

pub use publisher::EventPublisher;

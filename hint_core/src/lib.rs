//! `hint_core`：链接提示（link hinting）的纯逻辑层，不做任何 I/O。
//!
//! 设计目标：
//! - **宿主无关**：DOM 操作全部经由 `Document` trait，浏览器扩展/测试/CLI 都能复用
//! - **分层清晰**：geometry（发现）-> label（编号）-> overlay（渲染）-> filter（过滤）-> resolver（动作）
//! - **单一会话**：`Session` 独占唯一的 `HintContext`，不存在全局可变状态
pub mod config;
pub mod context;
pub mod document;
pub mod engine;
pub mod filter;
pub mod geometry;
pub mod key_event;
pub mod label;
pub mod model;
pub mod overlay;
pub mod processor;
pub mod resolver;
pub mod session;

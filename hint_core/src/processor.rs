//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，对 `HintContext` 做状态变更，并可产生 `Action`。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `EditingProcessor`：编辑输入（Char/Backspace/Text）与取消（Cancel）
//! - `FocusProcessor`：循环移动高亮（FocusNext/FocusPrev）
//! - `ConfirmProcessor`：确认高亮候选或点击覆盖区域（Confirm/OverlayClick）

use crate::{
    config::HintStyle,
    context::HintContext,
    document::Document,
    key_event::{Action, InputEvent},
    model::Candidate,
};

/// 给 processors 的对象安全引擎接口（避免在 processors 层引入泛型）。
pub trait EngineFacade {
    /// 发现可见元素并创建它们的可视节点
    fn discover(&mut self) -> Vec<Candidate>;
    /// 同时借出文档与样式（渲染时两者都要用）
    fn surface(&mut self) -> (&mut dyn Document, &HintStyle);
}

/// Processor 执行结果：是否“消费”了本次事件。
///
/// - `Consume`：本 processor 已处理该事件，后续 processor 不再执行
/// - `Continue`：本 processor 不处理该事件，交给下一个 processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变 HintContext；必要时产生宿主动作。
pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        engine: &mut dyn EngineFacade,
        context: &mut HintContext,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>);
}

/// 编辑输入的 processor（追加/退格/整串替换/取消）。
pub struct EditingProcessor;

impl Processor for EditingProcessor {
    fn process(
        &mut self,
        engine: &mut dyn EngineFacade,
        context: &mut HintContext,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::Char(ch) => {
                let mut next = context.buffer.clone();
                next.push(*ch);
                (ProcessStatus::Consume, context.update_input(engine, &next))
            }
            InputEvent::Backspace => {
                if context.buffer.is_empty() {
                    return (ProcessStatus::Consume, Vec::new());
                }
                let mut next = context.buffer.clone();
                next.pop();
                (ProcessStatus::Consume, context.update_input(engine, &next))
            }
            InputEvent::Text(text) => (ProcessStatus::Consume, context.update_input(engine, text)),
            InputEvent::Cancel => {
                context.cancel(engine);
                (ProcessStatus::Consume, Vec::new())
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct FocusProcessor;

impl Processor for FocusProcessor {
    fn process(
        &mut self,
        engine: &mut dyn EngineFacade,
        context: &mut HintContext,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::FocusNext => {
                context.focus_next(engine);
                (ProcessStatus::Consume, Vec::new())
            }
            InputEvent::FocusPrev => {
                context.focus_prev(engine);
                (ProcessStatus::Consume, Vec::new())
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct ConfirmProcessor;

impl Processor for ConfirmProcessor {
    fn process(
        &mut self,
        engine: &mut dyn EngineFacade,
        context: &mut HintContext,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::Confirm => (ProcessStatus::Consume, context.confirm(engine)),
            InputEvent::OverlayClick(node) => {
                (ProcessStatus::Consume, context.click_region(engine, *node))
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

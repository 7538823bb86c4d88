//! `Session`：对宿主（浏览器扩展/CLI）提供的会话控制器。
//!
//! `Session` 自身不做业务逻辑判断，而是：
//! - 持有唯一的 `HintContext`（状态），因此同一时刻最多只有一个提示会话
//! - 持有 processors 链（可插拔）
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `HintState` + `Action`

use tracing::info;

use crate::{
    context::HintContext,
    document::Document,
    engine::Engine,
    key_event::{Action, InputEvent},
    model::HintState,
    processor::{ConfirmProcessor, EditingProcessor, FocusProcessor, ProcessStatus, Processor},
};

/// 提示会话控制器（状态机容器）。
pub struct Session<D> {
    /// 引擎（宿主文档 + 样式）
    engine: Engine<D>,
    /// 会话状态（processors 共享）
    ctx: HintContext,
    /// processors 链
    processors: Vec<Box<dyn Processor>>,
}

impl<D> Session<D>
where
    D: Document,
{
    /// 创建控制器，并组装默认 processors 链。
    pub fn new(engine: Engine<D>) -> Self {
        Self {
            engine,
            ctx: HintContext::default(),
            processors: vec![
                Box::new(EditingProcessor),
                Box::new(FocusProcessor),
                Box::new(ConfirmProcessor),
            ],
        }
    }

    /// 显示提示；已有会话时隐式取消并重新开始。
    pub fn show_hints(&mut self) -> HintState {
        info!("showing hints");
        self.ctx.start(&mut self.engine);
        self.ctx.state()
    }

    /// 获取当前快照（只读）。
    pub fn state(&self) -> HintState {
        self.ctx.state()
    }

    /// 处理一个输入事件，返回最新快照与需要宿主执行的动作。
    pub fn handle(&mut self, ev: InputEvent) -> (HintState, Vec<Action>) {
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&mut self.engine, &mut self.ctx, &ev);
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        (self.ctx.state(), actions)
    }

    /// 宿主直接给出完整输入串；`state.is_resolved()` 表示会话已结束。
    pub fn update(&mut self, input: &str) -> (HintState, Vec<Action>) {
        self.handle(InputEvent::Text(input.to_string()))
    }

    pub fn confirm(&mut self) -> (HintState, Vec<Action>) {
        self.handle(InputEvent::Confirm)
    }

    pub fn focus_next(&mut self) -> HintState {
        self.handle(InputEvent::FocusNext).0
    }

    pub fn focus_prev(&mut self) -> HintState {
        self.handle(InputEvent::FocusPrev).0
    }

    /// 强制取消当前会话。
    pub fn clear(&mut self) -> HintState {
        self.handle(InputEvent::Cancel).0
    }

    pub fn document(&self) -> &D {
        self.engine.document()
    }

    pub fn document_mut(&mut self) -> &mut D {
        self.engine.document_mut()
    }
}

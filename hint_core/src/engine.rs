use tracing::debug;

use crate::config::HintStyle;
use crate::document::Document;
use crate::geometry;
use crate::label::{badge_visual, label_for, region_visual};
use crate::model::{Candidate, CandidateKind};
use crate::processor::EngineFacade;

/// 引擎：持有宿主文档与样式，负责“发现 -> 编号 -> 创建可视节点”。
///
/// 结构上对应流水线：
/// - engine（编排） -> geometry（可见性过滤） -> label（编号与样式） -> 交给 context 渲染/过滤
pub struct Engine<D> {
    /// 宿主文档（真实 DOM 或内存页面）
    document: D,
    /// 外观参数
    style: HintStyle,
}

impl<D> Engine<D>
where
    D: Document,
{
    pub fn new(document: D) -> Self {
        Self {
            document,
            style: HintStyle::default(),
        }
    }

    /// 替换外观参数。
    pub fn style(mut self, style: HintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// 查询可见元素，按垂直位置编号，并为每个元素创建（尚未挂载的）徽章与覆盖区域。
    pub fn discover(&mut self) -> Vec<Candidate> {
        let found = geometry::discover(&self.document);
        let viewport = self.document.viewport();
        let count = found.len();
        debug!(count, "discovered hintable elements");

        let mut out = Vec::with_capacity(count);
        for (index, (info, rect)) in found.into_iter().enumerate() {
            let badge = self
                .document
                .create_visual(&badge_visual(&rect, &viewport, &self.style));
            let region = self
                .document
                .create_visual(&region_visual(&rect, &viewport, &self.style));
            out.push(Candidate {
                element: info.id,
                kind: CandidateKind::classify(&info),
                rect,
                text: info.text.to_lowercase(),
                label: label_for(count, index),
                badge,
                region,
                attached: false,
            });
        }
        out
    }
}

impl<D> EngineFacade for Engine<D>
where
    D: Document,
{
    fn discover(&mut self) -> Vec<Candidate> {
        Engine::<D>::discover(self)
    }

    fn surface(&mut self) -> (&mut dyn Document, &HintStyle) {
        (&mut self.document, &self.style)
    }
}

//! `geometry`：从宿主给出的元素中筛出“此刻可见”的候选。
//!
//! 之后的滚动/布局变化不会在会话中途被跟踪。

use tracing::trace;

use crate::{
    document::Document,
    model::{ComputedStyle, ElementInfo, Rect, Viewport},
};

/// 元素此刻是否可被提示；可见时返回它的包围盒。
pub fn is_hintable(info: &ElementInfo, style: &ComputedStyle, viewport: &Viewport) -> Option<Rect> {
    let rect = info.rect?;
    if !info.has_client_rects {
        return None;
    }
    if rect.top > viewport.height || rect.bottom() < 0.0 || rect.left > viewport.width {
        return None;
    }
    if style.visibility != "visible" || style.display == "none" {
        return None;
    }
    Some(rect)
}

/// 查询宿主并返回可见元素，按 `top` 升序（稳定排序，保留文档顺序）。
pub fn discover(document: &dyn Document) -> Vec<(ElementInfo, Rect)> {
    let viewport = document.viewport();
    let mut out: Vec<(ElementInfo, Rect)> = document
        .query_candidates()
        .into_iter()
        .filter_map(|info| {
            let style = document.computed_style(info.id);
            match is_hintable(&info, &style, &viewport) {
                Some(rect) => Some((info, rect)),
                None => {
                    trace!(element = info.id.0, tag = %info.tag, "skipping invisible element");
                    None
                }
            }
        })
        .collect();
    out.sort_by(|a, b| a.1.top.total_cmp(&b.1.top));
    out
}

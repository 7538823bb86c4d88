//! `label`：给候选分配数字编号，并生成徽章/覆盖区域的样式。
//!
//! 编号起点随候选数量变化（1 / 10 / 100），保证同一会话里所有编号位数相同，
//! 这样“按编号匹配”的输入才是可预期的。

use crate::{
    config::HintStyle,
    document::{Visual, VisualRole},
    model::{Rect, Viewport},
};

const BADGE_Z_INDEX: i32 = 10001;
const REGION_Z_INDEX: i32 = 10000;

/// 编号起点：`n < 10` 从 1 开始，`n < 100` 从 10 开始，否则从 100 开始。
pub fn start_offset(count: usize) -> u32 {
    if count < 10 {
        1
    } else if count < 100 {
        10
    } else {
        100
    }
}

/// 第 `index` 个候选（共 `count` 个）的编号。
pub fn label_for(count: usize, index: usize) -> u32 {
    start_offset(count) + index as u32
}

/// 元素左上角（文档坐标）加偏移；元素被滚出左/上边界时贴边显示。
fn anchor(rect: &Rect, viewport: &Viewport, h: f64, v: f64) -> (f64, f64) {
    let left = (rect.left + viewport.scroll_x).max(viewport.scroll_x) + h;
    let top = (rect.top + viewport.scroll_y).max(viewport.scroll_y) + v;
    (left, top)
}

/// 编号徽章。
pub fn badge_visual(rect: &Rect, viewport: &Viewport, style: &HintStyle) -> Visual {
    let (left, top) = anchor(
        rect,
        viewport,
        style.horizontal_offset,
        style.vertical_offset - rect.height / 2.0,
    );
    Visual {
        role: VisualRole::Badge,
        left,
        top,
        width: None,
        height: None,
        font: Some(style.hint_font.clone()),
        color: Some(style.hint_foreground.clone()),
        background: style.hint_background.clone(),
        opacity: style.hint_opacity,
        border: style.hint_border.clone(),
        z_index: BADGE_Z_INDEX,
    }
}

/// 覆盖在元素上的可点击区域。
pub fn region_visual(rect: &Rect, viewport: &Viewport, style: &HintStyle) -> Visual {
    let (left, top) = anchor(rect, viewport, 0.0, 0.0);
    Visual {
        role: VisualRole::Region,
        left,
        top,
        width: Some(rect.width),
        height: Some(rect.height),
        font: None,
        color: None,
        background: style.normal_color.clone(),
        opacity: style.opacity,
        border: style.border.clone(),
        z_index: REGION_Z_INDEX,
    }
}

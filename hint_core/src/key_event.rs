use crate::model::{ElementId, NodeId};

/// 输入事件（逻辑键盘/鼠标事件）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心具体平台键值。
/// - 宿主负责把系统按键转换成这些事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// 追加一个字符到输入串
    Char(char),
    /// 删除输入串最后一个字符（触发重新发现 + 重放）
    Backspace,
    /// 宿主直接给出完整输入串（宿主自己维护输入缓冲时使用）
    Text(String),
    /// 确认当前高亮的候选
    Confirm,
    /// 取消本次提示（类似 Esc）
    Cancel,
    /// 高亮下一个候选（循环）
    FocusNext,
    /// 高亮上一个候选（循环）
    FocusPrev,
    /// 鼠标点击了某个覆盖区域
    OverlayClick(NodeId),
}

/// 引擎输出动作（对宿主页面元素的“副作用”请求）。
///
/// 页面元素不归会话所有，因此这些动作只由宿主执行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 切换 checkbox/radio 的选中状态
    ToggleChecked(ElementId),
    /// 派发一次合成的鼠标点击
    Click(ElementId),
    /// 把输入焦点移到该元素
    Focus(ElementId),
    /// 整页跳转（目标不做校验）
    Navigate(String),
}

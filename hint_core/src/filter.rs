//! `filter`：增量过滤的纯函数部分（切分输入、匹配、重新编号、挑选初始高亮）。
//!
//! `HintContext` 在每次按键时调用这里的函数；删除字符时则用同样的函数
//! 从完整候选列表重新走一遍（见 `replay`）。

use crate::label::label_for;

/// 挑选初始高亮时，只看前 37 个单词。
pub const BEST_POSITION_CEILING: usize = 37;

/// 把输入串切成 token：先小写，末尾的连续数字单独成为一个 token，再按空格切分。
///
/// 例如 `"foo12"` -> `["foo", "12"]`，`"12"` -> `["", "12"]`，`"ab "` -> `["ab", ""]`。
pub fn tokenize(buffer: &str) -> Vec<String> {
    let lower = buffer.to_lowercase();
    let head_len = lower.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (head, digits) = lower.split_at(head_len);
    let mut tokens: Vec<String> = head.split(' ').map(str::to_string).collect();
    if !digits.is_empty() {
        tokens.push(digits.to_string());
    }
    tokens
}

/// token 是否是纯数字（此时按编号匹配而不是按文本匹配）。
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// 候选是否在 `token` 下存活：子串匹配，不要求前缀。
///
/// `text` 需要已经小写。
pub fn matches(label: u32, text: &str, token: &str) -> bool {
    if is_numeric(token) {
        label.to_string().contains(token)
    } else {
        text.contains(token)
    }
}

/// 按当前 active 数量重新编号：产出 `(全量下标, 新编号)`。
pub fn relabel(active: &[usize]) -> impl Iterator<Item = (usize, u32)> + '_ {
    let count = active.len();
    active
        .iter()
        .enumerate()
        .map(move |(pos, &i)| (i, label_for(count, pos)))
}

/// 词首匹配：找“最早出现以 token 开头的单词”的候选，返回它在序列中的位置。
///
/// 单词下标相同时保留先出现（更靠上）的候选；没有任何匹配返回 `None`。
pub fn best_focus<'a>(texts: impl IntoIterator<Item = &'a str>, token: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    let mut best_word = BEST_POSITION_CEILING;
    let mut best = None;
    for (pos, text) in texts.into_iter().enumerate() {
        if best_word == 0 {
            break;
        }
        if let Some(word) = text.split(' ').position(|w| w.starts_with(token)) {
            if word < best_word {
                best_word = word;
                best = Some(pos);
            }
        }
    }
    best
}

/// 用一个 token 过滤一次的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub token: String,
    /// 存活候选（全量下标，垂直顺序）
    pub active: Vec<usize>,
    /// 文本 token 之后的新编号 `(全量下标, 编号)`；数字 token 不改编号，为空
    pub relabels: Vec<(usize, u32)>,
}

/// 过滤一步：`candidate(i)` 给出第 `i` 个候选当前的编号与小写文本。
///
/// 增量输入与删除后的重放都走这里，两条路径的结果因此一致。
pub fn narrow<'a>(
    active: &[usize],
    token: &str,
    candidate: impl Fn(usize) -> (u32, &'a str),
) -> Step {
    let survivors: Vec<usize> = active
        .iter()
        .copied()
        .filter(|&i| {
            let (label, text) = candidate(i);
            matches(label, text, token)
        })
        .collect();
    let relabels = if is_numeric(token) {
        Vec::new()
    } else {
        relabel(&survivors).collect()
    };
    Step {
        token: token.to_string(),
        active: survivors,
        relabels,
    }
}

/// 纯函数重放：从完整候选（按垂直顺序的文本）出发，逐 token 过滤整个输入串，
/// 返回每一步的结果。某一步没有存活者时停止；空 token 跳过。
pub fn replay(texts: &[&str], buffer: &str) -> Vec<Step> {
    let count = texts.len();
    let texts: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
    let mut labels: Vec<u32> = (0..count).map(|i| label_for(count, i)).collect();
    let mut active: Vec<usize> = (0..count).collect();
    let mut steps = Vec::new();
    for token in tokenize(buffer) {
        if token.is_empty() {
            continue;
        }
        let (labels_ref, texts_ref) = (&labels, &texts);
        let step = narrow(&active, &token, move |i| (labels_ref[i], texts_ref[i].as_str()));
        for &(i, label) in &step.relabels {
            labels[i] = label;
        }
        active.clone_from(&step.active);
        steps.push(step);
        if active.is_empty() {
            break;
        }
    }
    steps
}

/// 整个输入串之后的 active 集合（全量下标）。不考虑自动执行。
pub fn compute_active_set(texts: &[&str], buffer: &str) -> Vec<usize> {
    match replay(texts, buffer).pop() {
        Some(step) => step.active,
        None => (0..texts.len()).collect(),
    }
}

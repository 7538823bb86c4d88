use hint_core::{
    config::HintStyle,
    engine::Engine,
    filter::{compute_active_set, replay},
    key_event::{Action, InputEvent},
    model::{ComputedStyle, ElementId, ElementInfo, HintState, Phase, Rect},
    session::Session,
};
use hint_page::PageDocument;
use pretty_assertions::assert_eq;

fn element(tag: &str, ty: &str, href: Option<&str>, text: &str, top: f64) -> ElementInfo {
    ElementInfo {
        id: ElementId(0),
        tag: tag.to_string(),
        input_type: ty.to_string(),
        href: href.map(str::to_string),
        text: text.to_string(),
        rect: Some(Rect::new(20.0, top, 120.0, 18.0)),
        has_client_rects: true,
    }
}

fn link(text: &str, top: f64) -> ElementInfo {
    let href = format!("http://example.org/{}", text.replace(' ', "-"));
    element("a", "", Some(&href), text, top)
}

fn session_of(items: Vec<ElementInfo>) -> Session<PageDocument> {
    let mut page = PageDocument::default();
    for info in items {
        page.push(info, ComputedStyle::default());
    }
    Session::new(Engine::new(page))
}

fn numbered_links(n: usize) -> Session<PageDocument> {
    session_of((0..n).map(|i| link(&format!("link number {i}"), 10.0 + 5.0 * i as f64)).collect())
}

fn type_str(session: &mut Session<PageDocument>, text: &str) -> Vec<Action> {
    let mut actions = Vec::new();
    for ch in text.chars() {
        actions.extend(session.handle(InputEvent::Char(ch)).1);
    }
    actions
}

fn labels(state: &HintState) -> Vec<u32> {
    state.hints.iter().map(|h| h.label).collect()
}

fn elements(state: &HintState) -> Vec<usize> {
    state.hints.iter().map(|h| h.element.0).collect()
}

/// 与节点句柄无关的比较视图。
fn shape(state: &HintState) -> (Phase, Vec<(u32, usize, bool)>) {
    (
        state.phase,
        state
            .hints
            .iter()
            .map(|h| (h.label, h.element.0, h.focused))
            .collect(),
    )
}

#[test]
fn labels_follow_vertical_order() {
    // 文档顺序与垂直顺序不同
    let tops = [300.0, 20.0, 160.0, 90.0];
    let mut session = session_of(
        tops.iter()
            .enumerate()
            .map(|(i, &top)| link(&format!("item {i}"), top))
            .collect(),
    );
    let state = session.show_hints();
    assert_eq!(state.phase, Phase::Active);
    assert_eq!(elements(&state), vec![1, 3, 2, 0]);
    assert_eq!(labels(&state), vec![1, 2, 3, 4]);
    assert_eq!(state.focused().map(|h| h.element.0), Some(1));
    assert_eq!(session.document().body_children(), 2);
}

#[test]
fn twelve_links_number_from_ten() {
    let mut session = numbered_links(12);
    let state = session.show_hints();
    assert_eq!(labels(&state), (10..22).collect::<Vec<u32>>());

    type_str(&mut session, "1");
    let state = session.state();
    assert_eq!(labels(&state), vec![10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 21]);
    // "link number 1" 的第三个单词以 "1" 开头，最早出现
    assert_eq!(state.focused().map(|h| h.label), Some(11));

    let actions = type_str(&mut session, "5");
    assert_eq!(
        actions,
        vec![Action::Navigate("http://example.org/link-number-5".to_string())]
    );
    let state = session.state();
    assert!(state.is_resolved());
    assert!(state.hints.is_empty());
    assert_eq!(session.document().body_children(), 0);
}

#[test]
fn unmatched_label_cancels() {
    let mut session = numbered_links(12);
    session.show_hints();
    type_str(&mut session, "2");
    assert_eq!(labels(&session.state()), vec![12, 20, 21]);

    let actions = type_str(&mut session, "2");
    assert!(actions.is_empty());
    assert_eq!(session.state().phase, Phase::Cancelled);
    assert_eq!(session.document().body_children(), 0);
}

#[test]
fn text_filter_renumbers_then_numeric_miss_cancels() {
    let mut items: Vec<ElementInfo> = (0..12)
        .map(|i| link(&format!("link number {i}"), 10.0 + 20.0 * i as f64))
        .collect();
    items[2] = link("x marks the spot", 50.0);
    items[7] = link("inbox", 150.0);
    let mut session = session_of(items);
    session.show_hints();

    type_str(&mut session, "X");
    let state = session.state();
    assert_eq!(state.buffer, "x");
    assert_eq!(elements(&state), vec![2, 7]);
    assert_eq!(labels(&state), vec![1, 2]);

    assert!(type_str(&mut session, "5").is_empty());
    assert_eq!(session.state().phase, Phase::Cancelled);
}

#[test]
fn single_link_resolves_without_confirm() {
    let mut session =
        session_of(vec![link("alpha", 10.0), link("beta", 40.0), link("gamma", 70.0)]);
    session.show_hints();
    let actions = type_str(&mut session, "b");
    assert_eq!(actions, vec![Action::Navigate("http://example.org/beta".to_string())]);
    assert!(session.state().is_resolved());
}

#[test]
fn script_link_is_clicked() {
    let mut session = session_of(vec![
        element("a", "", Some("javascript:void(0)"), "open menu", 10.0),
        link("home", 40.0),
    ]);
    session.show_hints();
    let actions = type_str(&mut session, "menu");
    assert_eq!(actions, vec![Action::Click(ElementId(0))]);
    assert!(session.state().is_resolved());
}

#[test]
fn single_text_input_keeps_session_active() {
    let mut session = session_of(vec![
        link("home", 10.0),
        element("textarea", "textarea", None, "comments", 40.0),
    ]);
    session.show_hints();
    let actions = type_str(&mut session, "c");
    assert_eq!(actions, vec![Action::Focus(ElementId(1))]);
    for action in &actions {
        session.document_mut().apply(action);
    }
    assert_eq!(session.document().focused(), Some(ElementId(1)));

    let state = session.state();
    assert_eq!(state.phase, Phase::Active);
    assert_eq!(elements(&state), vec![1]);
    assert_eq!(session.document().body_children(), 2);

    // 显式确认仍然结束会话
    let (state, actions) = session.confirm();
    assert_eq!(actions, vec![Action::Focus(ElementId(1))]);
    assert!(state.is_resolved());
    assert_eq!(session.document().body_children(), 0);
}

#[test]
fn focus_moves_wrap_around() {
    let mut session = session_of(vec![link("a", 10.0), link("b", 40.0), link("c", 70.0)]);
    let state = session.show_hints();
    let style = HintStyle::default();
    let regions: Vec<_> = state.hints.iter().map(|h| h.region).collect();
    let background = |s: &Session<PageDocument>, i: usize| {
        s.document().node(regions[i]).map(|n| n.background.clone())
    };
    assert_eq!(background(&session, 0), Some(style.focus_color.clone()));

    let state = session.focus_prev();
    assert_eq!(state.focused().map(|h| h.element.0), Some(2));
    assert_eq!(background(&session, 2), Some(style.focus_color.clone()));
    assert_eq!(background(&session, 0), Some(style.normal_color.clone()));

    let state = session.focus_next();
    assert_eq!(state.focused().map(|h| h.element.0), Some(0));
    let state = session.focus_next();
    assert_eq!(state.focused().map(|h| h.element.0), Some(1));
    assert_eq!(background(&session, 2), Some(style.normal_color.clone()));

    // 高亮移动不改变 active 集合与输入
    assert_eq!(state.hints.len(), 3);
    assert_eq!(state.buffer, "");
}

#[test]
fn confirming_checkbox_toggles_it() {
    let mut session = session_of(vec![element("input", "checkbox", None, "", 10.0)]);
    let state = session.show_hints();
    assert_eq!(state.phase, Phase::Active);
    assert_eq!(labels(&state), vec![1]);

    let (state, actions) = session.confirm();
    assert_eq!(actions, vec![Action::ToggleChecked(ElementId(0))]);
    assert!(state.is_resolved());
    for action in &actions {
        session.document_mut().apply(action);
    }
    assert!(session.document().elements()[0].checked);
    assert_eq!(session.document().location(), None);
    assert_eq!(session.document().body_children(), 0);
}

#[test]
fn overlay_click_matches_keyboard_confirm() {
    let build = || {
        session_of(vec![
            element("input", "submit", None, "", 10.0),
            link("home", 40.0),
        ])
    };

    let mut clicked = build();
    let state = clicked.show_hints();
    let region = state.hints[0].region;
    let (state, click_actions) = clicked.handle(InputEvent::OverlayClick(region));
    assert!(state.is_resolved());
    assert_eq!(clicked.document().body_children(), 0);

    let mut confirmed = build();
    confirmed.show_hints();
    let (_, confirm_actions) = confirmed.confirm();
    assert_eq!(click_actions, vec![Action::Click(ElementId(0))]);
    assert_eq!(click_actions, confirm_actions);
}

#[test]
fn deletion_replays_from_fresh_discovery() {
    let mut session = numbered_links(12);
    session.show_hints();
    type_str(&mut session, "link 2");
    assert_eq!(elements(&session.state()), vec![2, 10, 11]);

    let (state, actions) = session.handle(InputEvent::Backspace);
    assert!(actions.is_empty());
    assert_eq!(state.buffer, "link ");
    assert_eq!(labels(&state), (10..22).collect::<Vec<u32>>());
    // 旧容器已移除，只剩新的两个
    assert_eq!(session.document().body_children(), 2);
    for hint in &state.hints {
        assert!(session.document().is_rendered(hint.region));
    }
}

#[test]
fn deletion_lands_on_replayed_steps() {
    let texts = [
        "box one", "inbox", "x marks", "fox", "home", "news", "boxing", "oxen", "help", "about",
        "max", "more",
    ];
    let mut session = session_of(
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| link(t, 10.0 + 30.0 * i as f64))
            .collect(),
    );
    session.show_hints();
    type_str(&mut session, "ox b");
    assert_eq!(elements(&session.state()), vec![0, 1, 6]);

    let (state, actions) = session.handle(InputEvent::Backspace);
    assert!(actions.is_empty());
    let last = replay(&texts, "ox ").pop().unwrap();
    assert_eq!(elements(&state), last.active);
    assert_eq!(
        labels(&state),
        last.relabels.iter().map(|&(_, label)| label).collect::<Vec<u32>>()
    );
    assert_eq!(labels(&state), vec![1, 2, 3, 4, 5]);
}

#[test]
fn repeated_deletions_release_visuals() {
    let mut session = numbered_links(12);
    session.show_hints();
    // 两个容器 + 每个候选一个徽章、一个覆盖区域
    let live = session.document().node_count();
    assert_eq!(live, 2 + 2 * 12);

    for _ in 0..20 {
        type_str(&mut session, "l");
        session.handle(InputEvent::Backspace);
    }
    assert_eq!(session.state().phase, Phase::Active);
    assert_eq!(session.document().node_count(), live);

    session.clear();
    assert_eq!(session.document().node_count(), 0);
}

#[test]
fn retyping_after_deletion_is_deterministic() {
    let texts = [
        "home", "about us", "contact", "blog posts", "rust book", "rustic cabin", "trust", "news",
        "archive", "search", "help", "more rust",
    ];
    let build = || {
        session_of(
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| link(t, 10.0 + 30.0 * i as f64))
                .collect(),
        )
    };

    for buffer in ["rust", "rust 1", "rus1", "s t", "r 10", "ru2"] {
        let chars: Vec<char> = buffer.chars().collect();
        for k in 0..chars.len() {
            let prefix: String = chars[..k].iter().collect();
            let longer: String = chars[..=k].iter().collect();

            let mut fresh = build();
            fresh.show_hints();
            type_str(&mut fresh, &prefix);

            let mut edited = build();
            edited.show_hints();
            type_str(&mut edited, &longer);
            if edited.state().phase != Phase::Active {
                continue;
            }
            edited.handle(InputEvent::Backspace);
            assert_eq!(shape(&edited.state()), shape(&fresh.state()), "buffer={buffer:?} k={k}");

            // 再把删掉的字符打回来，与一次性输入的结果一致
            type_str(&mut edited, &chars[k].to_string());
            let mut direct = build();
            direct.show_hints();
            type_str(&mut direct, &longer);
            assert_eq!(shape(&edited.state()), shape(&direct.state()), "buffer={buffer:?} k={k}");

            if fresh.state().phase == Phase::Active {
                let expected = compute_active_set(&texts, &prefix);
                assert_eq!(elements(&fresh.state()), expected, "buffer={buffer:?} k={k}");
            }
        }
    }
}

#[test]
fn keystrokes_only_remove_candidates() {
    let mut session = numbered_links(30);
    let mut previous = elements(&session.show_hints());
    for ch in "link number 2".chars() {
        let (state, _) = session.handle(InputEvent::Char(ch));
        if state.phase != Phase::Active {
            break;
        }
        let current = elements(&state);
        assert!(current.iter().all(|e| previous.contains(e)), "after {ch:?}");
        previous = current;
    }
}

#[test]
fn invisible_and_offscreen_elements_are_skipped() {
    let mut page = PageDocument::default();
    page.push(link("visible", 10.0), ComputedStyle::default());
    page.push(
        link("hidden", 40.0),
        ComputedStyle {
            visibility: "hidden".to_string(),
            display: "block".to_string(),
        },
    );
    page.push(
        link("collapsed", 70.0),
        ComputedStyle {
            visibility: "visible".to_string(),
            display: "none".to_string(),
        },
    );
    page.push(link("below the fold", 5000.0), ComputedStyle::default());
    page.push(element("input", "hidden", None, "token", 100.0), ComputedStyle::default());
    let mut session = Session::new(Engine::new(page));
    assert_eq!(elements(&session.show_hints()), vec![0]);
}

#[test]
fn hundred_candidates_use_three_digit_labels() {
    let mut session = numbered_links(120);
    let state = session.show_hints();
    assert_eq!(state.hints.first().map(|h| h.label), Some(100));
    assert_eq!(state.hints.last().map(|h| h.label), Some(219));
    assert!(state.hints.iter().all(|h| h.label.to_string().len() == 3));
}

#[test]
fn resolution_detaches_every_region() {
    let mut session =
        session_of(vec![link("alpha", 10.0), link("beta", 40.0), link("gamma", 70.0)]);
    let state = session.show_hints();
    let regions: Vec<_> = state.hints.iter().map(|h| h.region).collect();
    type_str(&mut session, "a");
    let state = session.state();
    assert_eq!(elements(&state), vec![0, 1, 2]);

    // "am" 只剩 gamma：自动执行并拆除
    let actions = type_str(&mut session, "m");
    assert_eq!(actions, vec![Action::Navigate("http://example.org/gamma".to_string())]);
    assert!(session.state().is_resolved());
    for region in regions {
        assert!(!session.document().is_rendered(region));
    }
}

#[test]
fn hidden_regions_stay_attached_while_active() {
    let mut session = session_of(vec![
        link("alpha", 10.0),
        link("beta", 40.0),
        link("gamma", 70.0),
        link("delta", 100.0),
    ]);
    let state = session.show_hints();
    let regions: Vec<_> = state.hints.iter().map(|h| h.region).collect();
    type_str(&mut session, "l");
    assert_eq!(elements(&session.state()), vec![0, 3]);
    let beta = session.document().node(regions[1]).cloned().unwrap();
    assert!(!beta.visible);
    assert!(session.document().is_rendered(regions[1]));
}

#[test]
fn best_focus_prefers_word_start() {
    let mut session = session_of(vec![
        link("read more", 10.0),
        link("more news", 40.0),
        link("about", 70.0),
    ]);
    session.show_hints();
    type_str(&mut session, "m");
    let state = session.state();
    assert_eq!(elements(&state), vec![0, 1]);
    assert_eq!(state.focused().map(|h| h.element.0), Some(1));
}

#[test]
fn show_hints_again_restarts() {
    let mut session = numbered_links(12);
    session.show_hints();
    type_str(&mut session, "2");
    let state = session.show_hints();
    assert_eq!(state.phase, Phase::Active);
    assert_eq!(state.buffer, "");
    assert_eq!(state.hints.len(), 12);
    assert_eq!(session.document().body_children(), 2);
}

#[test]
fn empty_page_is_inert() {
    let mut session = session_of(Vec::new());
    let state = session.show_hints();
    assert_eq!(state.phase, Phase::Active);
    assert!(state.hints.is_empty());
    assert_eq!(session.document().body_children(), 0);

    let state = session.focus_next();
    assert!(state.hints.is_empty());

    type_str(&mut session, "a");
    assert_eq!(session.state().phase, Phase::Cancelled);
    assert_eq!(session.clear().phase, Phase::Cancelled);
}

#[test]
fn cancel_tears_down_and_ignores_later_input() {
    let mut session = numbered_links(5);
    let state = session.show_hints();
    let state_after = session.clear();
    assert_eq!(state_after.phase, Phase::Cancelled);
    assert_eq!(session.document().body_children(), 0);
    for hint in &state.hints {
        assert!(!session.document().is_rendered(hint.region));
    }

    assert!(type_str(&mut session, "1").is_empty());
    let (_, actions) = session.confirm();
    assert!(actions.is_empty());
    assert_eq!(session.state().phase, Phase::Cancelled);
}

#[test]
fn whole_buffer_updates_match_keystrokes() {
    let mut by_char = numbered_links(12);
    by_char.show_hints();
    type_str(&mut by_char, "number 1");

    let mut by_text = numbered_links(12);
    by_text.show_hints();
    by_text.update("number");
    by_text.update("number ");
    let (state, _) = by_text.update("number 1");
    assert_eq!(shape(&state), shape(&by_char.state()));

    // 直接给出更短的串等价于删除
    let (state, _) = by_text.update("num");
    assert_eq!(state.buffer, "num");
    assert_eq!(state.hints.len(), 12);
}

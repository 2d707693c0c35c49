//! ウィザード全体の遷移テスト
//!
//! モックTransportと記録用Surfaceでコントローラを動かす

mod support;

use futures::executor::block_on;
use menu_wizard_common::api::{
    COMPLETE_PATH, EXTRACT_ITEMS_PATH, GENERATE_PREVIEW_PATH, SELECT_ITEMS_PATH,
    UPLOAD_ITEM_IMAGE_PATH,
};
use menu_wizard_common::render::{BASIC_PLAN_PLACEHOLDER, COMPLETE_TOAST};
use menu_wizard_common::{
    active_text, Action, Body, Controller, DemoConfig, EditorDraft, ImagePayload, Plan, Session,
    Step,
};
use serde_json::json;
use support::*;

type TestController = Controller<MockTransport, RecordingSurface>;

fn menu_photo() -> ImagePayload {
    ImagePayload::new("image/jpeg", "/9j/4AAQSkZJRg==")
}

fn controller_with(plan: u16, transport: MockTransport) -> TestController {
    let config = DemoConfig {
        default_plan: Some(plan),
        ..config()
    };
    let mut controller = Controller::new(Session::new(config), transport, RecordingSurface::default());
    block_on(controller.start());
    controller
}

fn standard_transport() -> MockTransport {
    MockTransport::new()
        .reply(EXTRACT_ITEMS_PATH, Reply::Json(extracted(10)))
        .reply(SELECT_ITEMS_PATH, ok())
        .reply(
            GENERATE_PREVIEW_PATH,
            Reply::Json(preview(&["it_01", "it_02", "it_03"])),
        )
        .reply(UPLOAD_ITEM_IMAGE_PATH, ok())
        .reply(COMPLETE_PATH, ok())
}

fn select(controller: &mut TestController, ids: &[&str]) {
    for id in ids {
        block_on(controller.dispatch(Action::ToggleSelect {
            tmp_item_id: id.to_string(),
            checked: true,
        }));
    }
}

/// 撮影 → 3品選択 → 確定 まで進める
fn into_review(plan: u16) -> TestController {
    let mut controller = controller_with(plan, standard_transport());
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02", "it_03"]);
    block_on(controller.dispatch(Action::ConfirmSelect));
    assert_eq!(controller.session().step, Step::Review);
    controller
}

#[test]
fn test_start_renders_initial_state() {
    let controller = controller_with(39, MockTransport::new());
    let surface = controller.surface();
    assert_eq!(surface.step, Some(Step::Capture));
    assert_eq!(surface.plan, Some(Plan::Basic));
    let codes: Vec<_> = surface.lang_options.iter().map(|o| o.code.as_str()).collect();
    assert_eq!(codes, vec!["ja", "en", "zh-Hant", "de"]);
    assert_eq!(surface.active_lang, "ja");
    assert_eq!(surface.last_toast(), Some("🏁 デモ開始"));
}

#[test]
fn test_capture_moves_to_select() {
    let mut controller = controller_with(39, standard_transport());
    block_on(controller.dispatch(Action::Capture(menu_photo())));

    let session = controller.session();
    assert_eq!(session.step, Step::Select);
    assert_eq!(session.extracted_items.len(), 10);
    assert!(!session.is_processing);

    let surface = controller.surface();
    assert_eq!(surface.select_rows.len(), 10);
    assert_eq!(surface.select_count, "0 / 3");
    assert!(!surface.confirm_enabled);
    assert!(!surface.loading);
    assert_eq!(surface.last_toast(), Some("✅ 10品を抽出しました"));

    let request = controller.api().transport().last(EXTRACT_ITEMS_PATH).unwrap();
    assert_eq!(request.url, "http://backend.test/api/demo/extract_items");
    assert_eq!(
        request.body,
        Body::Json(json!({
            "demo_session_id": SESSION_ID,
            "image": { "mime_type": "image/jpeg", "base64": "/9j/4AAQSkZJRg==" }
        }))
    );
}

#[test]
fn test_capture_truncates_to_ten() {
    let transport = MockTransport::new().reply(EXTRACT_ITEMS_PATH, Reply::Json(extracted(14)));
    let mut controller = controller_with(39, transport);
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    assert_eq!(controller.session().extracted_items.len(), 10);
}

#[test]
fn test_capture_with_too_few_items_stays() {
    let transport = MockTransport::new().reply(EXTRACT_ITEMS_PATH, Reply::Json(extracted(2)));
    let mut controller = controller_with(39, transport);
    block_on(controller.dispatch(Action::Capture(menu_photo())));

    assert_eq!(controller.session().step, Step::Capture);
    assert_eq!(
        controller.surface().last_toast(),
        Some("❌ 品目が足りません。撮り直してください")
    );
}

#[test]
fn test_capture_failure_stays_in_capture() {
    let transport = MockTransport::new().reply(
        EXTRACT_ITEMS_PATH,
        Reply::Status(502, "bad gateway".to_string()),
    );
    let mut controller = controller_with(39, transport);
    block_on(controller.dispatch(Action::Capture(menu_photo())));

    assert_eq!(controller.session().step, Step::Capture);
    assert!(!controller.session().is_processing);
    assert_eq!(controller.surface().last_toast(), Some("❌ 読み取りに失敗しました"));
    assert!(!controller.surface().loading);
}

#[test]
fn test_fourth_selection_is_rejected() {
    let mut controller = controller_with(39, standard_transport());
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02", "it_03"]);
    assert!(controller.surface().confirm_enabled);

    select(&mut controller, &["it_04"]);

    let session = controller.session();
    assert_eq!(session.selected_ids, vec!["it_01", "it_02", "it_03"]);
    assert_eq!(controller.surface().reverted, vec!["it_04"]);
    assert_eq!(controller.surface().last_toast(), Some("❌ 3つまでです"));
    assert_eq!(controller.surface().select_count, "3 / 3");

    // 外せば別の品目を選べる
    block_on(controller.dispatch(Action::ToggleSelect {
        tmp_item_id: "it_02".to_string(),
        checked: false,
    }));
    select(&mut controller, &["it_04"]);
    assert_eq!(controller.session().selected_ids, vec!["it_01", "it_03", "it_04"]);
}

#[test]
fn test_unknown_item_cannot_be_selected() {
    let mut controller = controller_with(39, standard_transport());
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_99"]);
    assert!(controller.session().selected_ids.is_empty());
}

#[test]
fn test_confirm_requires_exactly_three() {
    let mut controller = controller_with(39, standard_transport());
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02"]);
    assert!(!controller.surface().confirm_enabled);

    block_on(controller.dispatch(Action::ConfirmSelect));

    assert_eq!(controller.session().step, Step::Select);
    assert_eq!(controller.api().transport().count(SELECT_ITEMS_PATH), 0);
}

#[test]
fn test_confirm_failure_stays_in_select() {
    let transport = MockTransport::new()
        .reply(EXTRACT_ITEMS_PATH, Reply::Json(extracted(5)))
        .reply(SELECT_ITEMS_PATH, Reply::Status(422, "Must select exactly 3 items".to_string()));
    let mut controller = controller_with(39, transport);
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02", "it_03"]);
    block_on(controller.dispatch(Action::ConfirmSelect));

    assert_eq!(controller.session().step, Step::Select);
    assert_eq!(controller.surface().last_toast(), Some("❌ 選択の確定に失敗しました"));
}

#[test]
fn test_basic_plan_review_uses_placeholder() {
    let mut controller = into_review(39);

    let request = controller.api().transport().last(SELECT_ITEMS_PATH).unwrap();
    assert_eq!(
        request.body,
        Body::Json(json!({
            "demo_session_id": SESSION_ID,
            "selected_tmp_item_ids": ["it_01", "it_02", "it_03"]
        }))
    );
    assert_eq!(controller.api().transport().count(GENERATE_PREVIEW_PATH), 0);

    let session = controller.session();
    assert_eq!(session.current_index, 0);
    assert_eq!(session.selected_items.len(), 3);
    for item in &session.selected_items {
        let text = active_text(session, &item.tmp_item_id);
        assert_eq!(text.body, BASIC_PLAN_PLACEHOLDER);
        assert!(!text.editable);
    }

    let card = controller.surface().card.clone().unwrap();
    assert_eq!(card.tmp_item_id, "it_01");
    assert_eq!(card.price, "¥600");
    let progress = controller.surface().progress.clone().unwrap();
    assert_eq!(progress.label, "1 / 3 品目");
    assert!(!progress.back_visible);

    // 39コースでは編集に入らない
    block_on(controller.dispatch(Action::Reject));
    assert!(!controller.session().is_editing);
    assert!(controller.surface().editor.is_none());
}

#[test]
fn test_generative_plan_composes_description() {
    let controller = into_review(69);

    assert_eq!(controller.api().transport().count(GENERATE_PREVIEW_PATH), 1);
    let request = controller.api().transport().last(GENERATE_PREVIEW_PATH).unwrap();
    assert_eq!(
        request.body,
        Body::Json(json!({
            "demo_session_id": SESSION_ID,
            "plan_code": 69,
            "preview_langs": ["en", "zh-Hant", "de"],
            "tone_style": "standard"
        }))
    );

    let session = controller.session();
    let text = active_text(session, "it_01");
    assert_eq!(text.body, "it_01は香ばしい\n\n食べ方：塩で\n\nペアリング：日本酒");
    assert!(text.editable);
    assert!(toasts_contain(&controller, "✨ 生成完了"));

    let card = controller.surface().card.clone().unwrap();
    assert_eq!(card.text, text);
}

fn toasts_contain(controller: &TestController, message: &str) -> bool {
    controller.surface().toasts.iter().any(|t| t == message)
}

#[test]
fn test_language_switch_rerenders_card() {
    let mut controller = into_review(69);
    block_on(controller.dispatch(Action::SetLang("en".to_string())));

    let card = controller.surface().card.clone().unwrap();
    assert_eq!(card.text.body, "it_01 is savory\n\nペアリング：Sake");

    // 候補外の言語は無視
    block_on(controller.dispatch(Action::SetLang("fr".to_string())));
    assert_eq!(controller.session().active_lang, "en");

    // 未生成の言語は ja にフォールバック
    block_on(controller.dispatch(Action::SetLang("de".to_string())));
    let card = controller.surface().card.clone().unwrap();
    assert!(card.text.body.starts_with("it_01は香ばしい"));
}

#[test]
fn test_regeneration_with_same_inputs_hits_cache() {
    let mut controller = into_review(69);
    assert_eq!(controller.api().transport().count(GENERATE_PREVIEW_PATH), 1);

    block_on(controller.dispatch(Action::SetPlan(Plan::Basic)));
    assert_eq!(
        controller.surface().card.clone().unwrap().text.body,
        BASIC_PLAN_PLACEHOLDER
    );

    block_on(controller.dispatch(Action::SetPlan(Plan::Generative)));

    assert_eq!(controller.api().transport().count(GENERATE_PREVIEW_PATH), 1);
    assert!(controller.session().generated.as_ref().unwrap().is_cache_hit());
    assert!(toasts_contain(&controller, "🧠 キャッシュ表示"));
    assert_eq!(controller.session().preview_cache.len(), 1);
}

#[test]
fn test_different_tone_misses_cache() {
    let transport = standard_transport();
    let mut controller = Controller::new(
        Session::new(DemoConfig {
            default_plan: Some(69),
            ..config()
        }),
        transport,
        RecordingSurface::default(),
    )
    .with_tone_style("casual");
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02", "it_03"]);
    block_on(controller.dispatch(Action::ConfirmSelect));

    let request = controller.api().transport().last(GENERATE_PREVIEW_PATH).unwrap();
    let Body::Json(body) = request.body else {
        panic!("json body expected");
    };
    assert_eq!(body["tone_style"], "casual");
    let key = &controller.session().generated.as_ref().unwrap().cache.as_ref().unwrap().cache_key;
    assert!(key.starts_with("demo-test:69:casual:de,en,zh-Hant:品目1|¥600|一品料理||"));
}

#[test]
fn test_generation_failure_keeps_review() {
    let transport = MockTransport::new()
        .reply(EXTRACT_ITEMS_PATH, Reply::Json(extracted(3)))
        .reply(SELECT_ITEMS_PATH, ok())
        .reply(GENERATE_PREVIEW_PATH, Reply::Status(500, "quota".to_string()));
    let mut controller = controller_with(69, transport);
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02", "it_03"]);
    block_on(controller.dispatch(Action::ConfirmSelect));

    assert_eq!(controller.session().step, Step::Review);
    assert!(controller.session().generated.is_none());
    assert!(toasts_contain(&controller, "❌ 生成に失敗しました"));
    assert!(controller.session().preview_cache.is_empty());
}

#[test]
fn test_approve_completes_exactly_once() {
    let mut controller = into_review(39);

    block_on(controller.dispatch(Action::Approve));
    assert_eq!(controller.session().current_index, 1);
    let progress = controller.surface().progress.clone().unwrap();
    assert_eq!(progress.label, "2 / 3 品目");
    assert_eq!(progress.encouragement, "ちょうど半分まできました！⭐");
    assert!(progress.back_visible);

    block_on(controller.dispatch(Action::Approve));
    block_on(controller.dispatch(Action::Approve));
    assert_eq!(controller.session().current_index, 3);
    assert!(controller.session().is_complete());
    assert_eq!(controller.surface().complete_shown, 1);
    assert_eq!(controller.surface().last_toast(), Some(COMPLETE_TOAST));

    block_on(controller.dispatch(Action::Approve));
    block_on(controller.dispatch(Action::Back));
    assert_eq!(controller.session().current_index, 3);
    assert_eq!(controller.surface().complete_shown, 1);
    assert_eq!(controller.surface().card_exits, 3);
}

#[test]
fn test_exit_animation_runs_before_next_card() {
    let mut controller = into_review(39);
    assert_eq!(controller.surface().card.as_ref().unwrap().tmp_item_id, "it_01");

    block_on(controller.dispatch(Action::Approve));
    assert_eq!(controller.surface().exited_cards, vec!["it_01".to_string()]);
    assert_eq!(controller.surface().card.as_ref().unwrap().tmp_item_id, "it_02");

    block_on(controller.dispatch(Action::Approve));
    assert_eq!(controller.surface().exited_cards, vec!["it_01".to_string(), "it_02".to_string()]);
}

#[test]
fn test_back_at_first_item_is_noop() {
    let mut controller = into_review(39);
    let toasts = controller.surface().toasts.len();
    block_on(controller.dispatch(Action::Back));
    assert_eq!(controller.session().current_index, 0);
    assert_eq!(controller.surface().toasts.len(), toasts);
}

#[test]
fn test_back_while_editing_requires_confirmation() {
    let mut controller = into_review(69);
    block_on(controller.dispatch(Action::Approve));
    block_on(controller.dispatch(Action::Reject));
    assert!(controller.session().is_editing);

    // 破棄しない
    controller.surface_mut().confirm_answer = false;
    block_on(controller.dispatch(Action::Back));
    assert_eq!(controller.session().current_index, 1);
    assert!(controller.session().is_editing);
    assert_eq!(controller.surface().confirms.len(), 1);

    // 破棄する
    controller.surface_mut().confirm_answer = true;
    block_on(controller.dispatch(Action::Back));
    assert_eq!(controller.session().current_index, 0);
    assert!(!controller.session().is_editing);
    assert!(controller.surface().editor.is_none());
    assert_eq!(controller.surface().last_toast(), Some("⏪ 前の品目に戻りました"));
}

#[test]
fn test_edit_save_overwrites_local_text_only() {
    let mut controller = into_review(69);
    let requests_before = controller.api().transport().requests().len();

    block_on(controller.dispatch(Action::Reject));
    assert_eq!(
        controller.surface().editor,
        Some(EditorDraft::Description(
            "it_01は香ばしい\n\n食べ方：塩で\n\nペアリング：日本酒".to_string()
        ))
    );

    block_on(controller.dispatch(Action::SaveEdit("   ".to_string())));
    assert!(controller.session().is_editing);
    assert_eq!(controller.surface().alerts, vec!["説明文を入力してください"]);

    block_on(controller.dispatch(Action::SaveEdit("  揚げたてをどうぞ\n塩がおすすめ ".to_string())));
    let session = controller.session();
    assert!(!session.is_editing);
    assert_eq!(active_text(session, "it_01").body, "揚げたてをどうぞ\n塩がおすすめ");
    assert_eq!(active_text(session, "it_02").body, "it_02は香ばしい\n\n食べ方：塩で\n\nペアリング：日本酒");
    assert_eq!(controller.surface().last_toast(), Some("💾 保存しました！"));

    // 他言語は変わらない
    block_on(controller.dispatch(Action::SetLang("en".to_string())));
    assert_eq!(
        active_text(controller.session(), "it_01").body,
        "it_01 is savory\n\nペアリング：Sake"
    );

    assert_eq!(controller.api().transport().requests().len(), requests_before);
}

#[test]
fn test_saved_edit_survives_plan_round_trip() {
    let mut controller = into_review(69);
    block_on(controller.dispatch(Action::Reject));
    block_on(controller.dispatch(Action::SaveEdit("手直しした本文".to_string())));

    block_on(controller.dispatch(Action::SetPlan(Plan::Basic)));
    block_on(controller.dispatch(Action::SetPlan(Plan::Generative)));

    // 2回目はキャッシュから
    assert_eq!(controller.api().transport().count(GENERATE_PREVIEW_PATH), 1);
    assert!(toasts_contain(&controller, "🧠 キャッシュ表示"));
    assert_eq!(active_text(controller.session(), "it_01").body, "手直しした本文");
    assert_eq!(
        controller.surface().card.clone().unwrap().text.body,
        "手直しした本文"
    );
    assert!(active_text(controller.session(), "it_02").body.starts_with("it_02は香ばしい"));
}

#[test]
fn test_cancel_edit_discards_without_validation() {
    let mut controller = into_review(69);
    block_on(controller.dispatch(Action::Reject));
    block_on(controller.dispatch(Action::CancelEdit));
    assert!(!controller.session().is_editing);
    assert!(controller.surface().alerts.is_empty());
    assert!(active_text(controller.session(), "it_01").body.starts_with("it_01は香ばしい"));
}

#[test]
fn test_approve_while_editing_is_blocked() {
    let mut controller = into_review(69);
    block_on(controller.dispatch(Action::Reject));
    block_on(controller.dispatch(Action::Approve));

    assert_eq!(controller.session().current_index, 0);
    assert_eq!(controller.surface().alerts, vec!["編集を保存してからOKを押してください"]);
}

#[test]
fn test_item_image_attach_is_optimistic() {
    let transport = MockTransport::new()
        .reply(EXTRACT_ITEMS_PATH, Reply::Json(extracted(3)))
        .reply(SELECT_ITEMS_PATH, ok())
        .reply(UPLOAD_ITEM_IMAGE_PATH, Reply::Status(500, "disk full".to_string()));
    let mut controller = controller_with(39, transport);
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02", "it_03"]);
    block_on(controller.dispatch(Action::ConfirmSelect));

    let dish = ImagePayload::new("image/png", "iVBORw0KGgo=");
    block_on(controller.dispatch(Action::AttachItemImage(dish.clone())));

    let session = controller.session();
    assert_eq!(session.item_image("it_01"), Some("data:image/png;base64,iVBORw0KGgo="));
    assert_eq!(session.step, Step::Review);
    let card = controller.surface().card.clone().unwrap();
    assert_eq!(card.image.as_deref(), Some("data:image/png;base64,iVBORw0KGgo="));
    assert_eq!(controller.surface().last_toast(), Some("⚠️ 写真保存に失敗（デモは継続）"));

    let request = controller.api().transport().last(UPLOAD_ITEM_IMAGE_PATH).unwrap();
    assert_eq!(
        request.body,
        Body::Json(json!({
            "demo_session_id": SESSION_ID,
            "tmp_item_id": "it_01",
            "image": { "mime_type": "image/png", "base64": "iVBORw0KGgo=" }
        }))
    );

    block_on(controller.dispatch(Action::OpenImage));
    assert_eq!(
        controller.surface().modal.as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );
    block_on(controller.dispatch(Action::CloseModal));
    assert!(controller.surface().modal.is_none());

    block_on(controller.dispatch(Action::RemoveItemImage));
    assert!(controller.session().item_image("it_01").is_none());
    assert_eq!(controller.surface().card.clone().unwrap().image, None);
    assert_eq!(controller.api().transport().count(UPLOAD_ITEM_IMAGE_PATH), 1);
}

#[test]
fn test_dish_name_markup_is_passed_through_as_text() {
    let transport = MockTransport::new()
        .reply(
            EXTRACT_ITEMS_PATH,
            Reply::Json(json!({
                "items": [
                    { "tmp_item_id": "x1", "name_ja": "<script>alert('x')</script>", "price": { "raw": "¥1" } },
                    { "tmp_item_id": "x2", "name_ja": "枝豆" },
                    { "tmp_item_id": "x3", "name_ja": "冷奴" }
                ]
            })),
        )
        .reply(SELECT_ITEMS_PATH, ok());
    let mut controller = controller_with(39, transport);
    block_on(controller.dispatch(Action::Capture(menu_photo())));
    assert_eq!(controller.surface().select_rows[0].name, "<script>alert('x')</script>");

    select(&mut controller, &["x1", "x2", "x3"]);
    block_on(controller.dispatch(Action::ConfirmSelect));

    // エスケープは描画側の責務。ビューには元の文字列のまま渡す
    let card = controller.surface().card.clone().unwrap();
    assert_eq!(card.name, "<script>alert('x')</script>");
    assert_eq!(card.price, "¥1");
}

#[test]
fn test_submit_after_completion() {
    let mut controller = into_review(69);
    block_on(controller.dispatch(Action::AttachItemImage(ImagePayload::new("image/jpeg", "AA=="))));

    // 完了前は送らない
    block_on(controller.dispatch(Action::Submit));
    assert_eq!(controller.api().transport().count(COMPLETE_PATH), 0);

    for _ in 0..3 {
        block_on(controller.dispatch(Action::Approve));
    }
    block_on(controller.dispatch(Action::Submit));

    let request = controller.api().transport().last(COMPLETE_PATH).unwrap();
    assert_eq!(
        request.body,
        Body::Json(json!({
            "demo_session_id": SESSION_ID,
            "plan": 69,
            "selected_tmp_item_ids": ["it_01", "it_02", "it_03"],
            "item_images_count": 1
        }))
    );
    assert_eq!(
        controller.surface().alerts.last().map(String::as_str),
        Some("確定しました。本登録URLを送付します")
    );
}

#[test]
fn test_after_card_render_hook_runs_on_every_render() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut controller = controller_with(39, standard_transport());
    let renders = Rc::new(Cell::new(0));
    let seen = renders.clone();
    controller
        .renderer_mut()
        .on_after_card_render(move |_session| seen.set(seen.get() + 1));

    block_on(controller.dispatch(Action::Capture(menu_photo())));
    select(&mut controller, &["it_01", "it_02", "it_03"]);
    block_on(controller.dispatch(Action::ConfirmSelect));
    assert_eq!(renders.get(), 1);

    block_on(controller.dispatch(Action::Approve));
    block_on(controller.dispatch(Action::Back));
    assert_eq!(renders.get(), 3);
}

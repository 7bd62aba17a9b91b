//! End-to-end tests of the router with a fake channel backend

mod common;

use axum::http::{header, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{
    body_text, eligible_channel, form_post, get, inactive_channel, json_post, quote_form, router,
    FakeResponse, FakeSource,
};

const CHANNEL_FORM: &str = "url=https%3A%2F%2Fwww.youtube.com%2F%40runner";

#[tokio::test]
async fn test_landing_page_renders_form() {
    let app = router(FakeSource::new(FakeResponse::Channel(eligible_channel())));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"action="/channel""#));
    assert!(html.contains("최근 3개월 내 5개 이상의 영상"));
}

#[tokio::test]
async fn test_invalid_url_is_rejected_before_lookup() {
    let source = FakeSource::new(FakeResponse::Channel(eligible_channel()));
    let app = router(source.clone());

    let response = app
        .oneshot(form_post("/channel", "url=https%3A%2F%2Fvimeo.com%2F123"))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains("올바른 유튜브 채널 URL을 입력해주세요."));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_eligible_channel_preview_links_to_analysis() {
    let app = router(FakeSource::new(FakeResponse::Channel(eligible_channel())));

    let response = app.oneshot(form_post("/channel", CHANNEL_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("러닝 채널"));
    assert!(html.contains("분석 가능한 채널입니다."));
    assert!(html.contains("/analysis?url=https%3A%2F%2Fwww.youtube.com%2F%40runner"));
    assert!(html.contains("조회수: 10,000회"));
}

#[tokio::test]
async fn test_inactive_channel_preview_reports_counts() {
    let app = router(FakeSource::new(FakeResponse::Channel(inactive_channel())));

    let html = body_text(app.oneshot(form_post("/channel", CHANNEL_FORM)).await.unwrap()).await;
    assert!(html.contains("현재 상태: 3개월 내 0개, 1개월 내 0개"));
    assert!(html.contains("분석 불가"));
    assert!(!html.contains("/analysis?url="));
}

#[tokio::test]
async fn test_upstream_error_message_is_shown_inline() {
    let app = router(FakeSource::new(FakeResponse::Upstream(404, "채널을 찾을 수 없습니다.")));

    let html = body_text(app.oneshot(form_post("/channel", CHANNEL_FORM)).await.unwrap()).await;
    assert!(html.contains("채널을 찾을 수 없습니다."));
    // the form stays usable with the submitted value
    assert!(html.contains(r#"value="https://www.youtube.com/@runner""#));
}

#[tokio::test]
async fn test_analysis_without_channel_redirects_home() {
    let source = FakeSource::new(FakeResponse::Channel(eligible_channel()));
    let app = router(source.clone());

    let response = app.clone().oneshot(get("/analysis")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = app.oneshot(form_post("/analysis/quote", "addon=on")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_failed_lookup_on_analysis_redirects_home() {
    let app = router(FakeSource::new(FakeResponse::Upstream(500, "")));

    let response = app
        .oneshot(get("/analysis?url=https%3A%2F%2Fwww.youtube.com%2F%40runner"))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
}

#[tokio::test]
async fn test_analysis_page_shows_tiers_and_narrative() {
    let app = router(FakeSource::new(FakeResponse::Channel(eligible_channel())));

    let response = app
        .oneshot(get("/analysis?url=https%3A%2F%2Fwww.youtube.com%2F%40runner"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"<span class="chip tier-high">조회수: 우수</span>"#));
    assert!(html.contains(r#"<span class="chip tier-mid">좋아요: 적정</span>"#));
    assert!(html.contains(r#"<span class="chip tier-low">댓글: 미달</span>"#));
    assert!(html.contains("주요 원인"));
    assert!(html.contains("<h4>조회수 요인</h4>"));
    assert!(html.contains(r#"name="channel""#));
    assert!(html.contains("총 금액: ₩0"));
    // only the five newest videos are offered for packages
    assert!(html.contains(r#"name="select_vid5""#));
    assert!(!html.contains(r#"name="select_vid6""#));
}

#[tokio::test]
async fn test_quote_form_totals_selected_video_and_addon() {
    let source = FakeSource::new(FakeResponse::Channel(eligible_channel()));
    let app = router(source.clone());

    let body = quote_form(
        &eligible_channel(),
        "select_vid1=on&package_vid1=STANDARD&prev_package_vid1=STANDARD\
         &views_vid1=40&likes_vid1=0&comments_vid1=0&addon=on&addon_target=2000",
    );
    let response = app.oneshot(form_post("/analysis/quote", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    // 10,000 views * 0.045 * 40% = 180 -> 200,000 + 180 * 1,000
    assert!(html.contains("영상 총액: ₩380,000"));
    assert!(html.contains("+180회"));
    // add-on: 2,000 * 500
    assert!(html.contains("금액: ₩1,000,000"));
    assert!(html.contains("총 금액: ₩1,380,000"));
    // recalculation works from the carried channel data alone
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_quote_survives_a_failing_backend() {
    let source = FakeSource::new(FakeResponse::Upstream(503, ""));
    let app = router(source.clone());

    let body = quote_form(
        &eligible_channel(),
        "select_vid2=on&package_vid2=BASIC&prev_package_vid2=BASIC&views_vid2=20",
    );
    let response = app.oneshot(form_post("/analysis/quote", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"value="BASIC" checked"#));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_quote_without_channel_data_redirects_home() {
    let app = router(FakeSource::new(FakeResponse::Channel(eligible_channel())));

    let body = format!("{CHANNEL_FORM}&select_vid1=on");
    let response = app.clone().oneshot(form_post("/analysis/quote", &body)).await.unwrap();
    assert!(response.status().is_redirection());

    let body = format!("{CHANNEL_FORM}&channel=%7Bbroken");
    let response = app.oneshot(form_post("/analysis/quote", &body)).await.unwrap();
    assert!(response.status().is_redirection());
}

#[tokio::test]
async fn test_deselected_video_keeps_package_for_reselect() {
    let app = router(FakeSource::new(FakeResponse::Channel(eligible_channel())));

    // the checkbox was just cleared; package and sliders were still on the page
    let body = quote_form(
        &eligible_channel(),
        "package_vid1=STANDARD&prev_package_vid1=STANDARD&views_vid1=25&likes_vid1=5&comments_vid1=0",
    );
    let html = body_text(app.clone().oneshot(form_post("/analysis/quote", &body)).await.unwrap()).await;
    assert!(html.contains(r#"<input type="hidden" name="package_vid1" value="STANDARD">"#));
    assert!(html.contains(r#"<input type="hidden" name="views_vid1" value="25">"#));
    assert!(html.contains("총 금액: ₩0"));

    // ticking it again submits those hidden fields back
    let body = quote_form(
        &eligible_channel(),
        "select_vid1=on&package_vid1=STANDARD&prev_package_vid1=STANDARD&views_vid1=25&likes_vid1=5&comments_vid1=0",
    );
    let html = body_text(app.oneshot(form_post("/analysis/quote", &body)).await.unwrap()).await;
    assert!(html.contains(r#"name="package_vid1" value="STANDARD" checked"#));
    assert!(html.contains(r#"name="views_vid1" min="0" max="100" value="25""#));
    assert!(!html.contains("영상 총액: ₩0"));
}

#[tokio::test]
async fn test_api_quote_matches_reference_scenario() {
    let app = router(FakeSource::new(FakeResponse::Channel(eligible_channel())));

    let request = json!({
        "videos": [{
            "video_id": "a",
            "title": "A",
            "current": {"views": 10000, "likes": 0, "comments": 0},
            "subscriber_count": 50000
        }],
        "selections": [{
            "video_id": "a",
            "package": "STANDARD",
            "targets": {"views": 100, "likes": 0, "comments": 0}
        }]
    });
    let response = app.oneshot(json_post("/api/quote", &request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let summary: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    // the STANDARD views cap is 40%, so the 100% request is clamped
    assert_eq!(summary["lines"][0]["quote"]["increase"]["views"], 180);
    assert_eq!(summary["total_amount"], 380_000);
}

#[tokio::test]
async fn test_api_analysis_and_channel_proxy() {
    let app = router(FakeSource::new(FakeResponse::Channel(eligible_channel())));

    let lookup = serde_json::to_value(eligible_channel()).unwrap();
    let response = app.clone().oneshot(json_post("/api/analysis", &lookup)).await.unwrap();
    let analysis: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(analysis["case_id"], "HML");
    assert_eq!(analysis["eligibility"]["is_eligible"], true);
    assert_eq!(analysis["videos"].as_array().unwrap().len(), 5);

    let response = app
        .clone()
        .oneshot(get("/api/channel?url=https%3A%2F%2Fyoutu.be%2Fabc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(error["success"], false);

    let response = app
        .oneshot(get("/api/channel?url=https%3A%2F%2Fwww.youtube.com%2F%40runner"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_upstream_failure_is_bad_gateway() {
    let app = router(FakeSource::new(FakeResponse::Upstream(503, "")));

    let response = app
        .oneshot(get("/api/channel?url=https%3A%2F%2Fwww.youtube.com%2F%40runner"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(error["error"], "채널 정보를 가져오는데 실패했습니다.");
}

// Server-rendered pages. Every dynamic value goes through `escape_html`.

use crate::analytics::eligibility::try_parse_publish_date;
use crate::analytics::{AnalysisCase, Eligibility, NarrativeSection, PerformanceMetrics, Tier};
use crate::models::api::AnalysisResponse;
use crate::models::channel::{ChannelLookup, VideoSummary};
use crate::pricing::catalog::{
    Metric, Package, SUBSCRIBER_ADDON_MAX, SUBSCRIBER_ADDON_MIN, SUBSCRIBER_ADDON_STEP,
};
use crate::pricing::{QuoteSession, QuoteSummary};
use crate::utils::{escape_html, format_number, format_percent, format_won};

/// Form field carrying the serialized channel lookup between quote updates
pub const CHANNEL_FIELD: &str = "channel";

const STYLE: &str = r###"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Noto Sans KR', sans-serif; line-height: 1.6; color: #1f2933; background: #f4f6fb; }
        .container { max-width: 1100px; margin: 0 auto; padding: 0 20px 48px; }
        .hero { background: linear-gradient(135deg, #1e40af 0%, #3b82f6 100%); color: white; padding: 3rem 0; margin-bottom: 2rem; border-radius: 0 0 2rem 2rem; }
        .hero h1 { font-size: 2.4rem; margin-bottom: .5rem; }
        .panel { background: white; border-radius: 12px; box-shadow: 0 2px 10px rgba(15, 23, 42, .08); padding: 1.5rem; margin-bottom: 1.5rem; }
        .grid { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); }
        .error { color: #b91c1c; background: #fee2e2; border-radius: 8px; padding: .75rem 1rem; margin: .75rem 0; }
        .success { color: #166534; background: #dcfce7; border-radius: 8px; padding: .75rem 1rem; margin: .75rem 0; }
        input[type=text] { width: 100%; padding: .75rem; border: 1px solid #cbd5e1; border-radius: 8px; font-size: 1rem; }
        button, .button { display: inline-block; background: #2563eb; color: white; border: 0; border-radius: 8px; padding: .75rem 1.5rem; font-size: 1rem; cursor: pointer; text-decoration: none; margin-top: .75rem; }
        .button.disabled { background: #dc2626; opacity: .6; pointer-events: none; }
        .chip { display: inline-block; border-radius: 999px; padding: .1rem .7rem; font-size: .85rem; color: white; margin-right: .3rem; }
        .tier-high { background: #2563eb; }
        .tier-mid { background: #16a34a; }
        .tier-low { background: #dc2626; }
        .video { display: flex; gap: 1rem; align-items: flex-start; border-top: 1px solid #e2e8f0; padding: 1rem 0; }
        .video img { width: 180px; border-radius: 6px; }
        .video .body { flex: 1; }
        .muted { color: #64748b; font-size: .9rem; }
        .packages { display: grid; gap: .5rem; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); margin: .75rem 0; }
        .packages label { border: 1px solid #cbd5e1; border-radius: 8px; padding: .5rem; }
        .slider { margin: .5rem 0; }
        .slider input { width: 100%; }
        .total { font-size: 1.4rem; font-weight: bold; text-align: right; margin-top: 1rem; }
        details { margin-top: .5rem; }
        h4 { margin-top: .5rem; }
        pre { white-space: pre-wrap; font-family: inherit; font-size: .85rem; color: #475569; }
        ul { margin-left: 1.25rem; }
"###;

const VIEWS_HELP: &str = "구독자 수 대비 조회수 성과 계산 방법:
1. 각 영상의 조회수를 업로드 시간에 따라 보정
   - 0~13일: 1배
   - 2주: 2배
   - 3주: 3배
   - 4주: 4배
   - 1개월: 6배
   - 2개월: 10배
   - 3개월 이상: 14배
2. 보정된 조회수의 평균값 계산
3. 구독자 수와 비교 (30% 이상 우수, 10% 이상 적정)";

const LIKES_HELP: &str = "조회수 대비 좋아요 비율 계산 방법:
1. 각 영상의 (좋아요 수 ÷ 조회수) 계산
2. 전체 영상의 평균 좋아요 비율 계산
3. 5% 이상 우수, 2% 이상 적정";

const COMMENTS_HELP: &str = "조회수 대비 댓글 비율 계산 방법:
1. 각 영상의 (댓글 수 ÷ 조회수) 계산
2. 전체 영상의 평균 댓글 비율 계산
3. 5% 이상 우수, 2% 이상 적정";

fn layout(title: &str, body: &str) -> String {
    format!(
        r###"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"###,
        title = escape_html(title),
    )
}

fn tier_chip(label: &str, tier: Tier) -> String {
    let class = match tier {
        Tier::High => "tier-high",
        Tier::Mid => "tier-mid",
        Tier::Low => "tier-low",
    };
    format!(
        r#"<span class="chip {class}">{}: {}</span>"#,
        escape_html(label),
        tier.label()
    )
}

/// "2024-03-05T..." / "2024년 3월 5일" -> "2024년 3월 5일"; unknown formats pass through
fn display_date(raw: &str) -> String {
    try_parse_publish_date(raw)
        .map(|d| d.format("%Y년 %-m월 %-d일").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<div class="error">{}</div>"#, escape_html(message)))
        .unwrap_or_default()
}

// ============================================================================
// Landing page
// ============================================================================

pub fn landing_page(url_value: &str, error: Option<&str>) -> String {
    let body = format!(
        r###"<div class="hero"><div class="container">
    <h1>YouTube 채널 분석기</h1>
    <p>AI 기반 채널 분석으로 당신의 채널을 성장시키세요</p>
    <p>실시간 데이터 분석과 맞춤형 성장 전략을 제공합니다</p>
</div></div>
<div class="container">
    <div class="panel">
        <h2>채널 분석 시작하기</h2>
        <form method="post" action="/channel">
            <input type="text" name="url" placeholder="https://www.youtube.com/@channelname" value="{url}" required>
            {error}
            <button type="submit">무료로 분석하기</button>
        </form>
    </div>
    <div class="grid">
        <div class="panel"><h3>실시간 분석</h3><p class="muted">채널의 현재 상태를 분석하여 즉각적인 인사이트를 제공합니다</p></div>
        <div class="panel"><h3>성과 등급</h3><p class="muted">구독자 대비 조회수와 조회수 대비 좋아요·댓글 비율을 평가합니다</p></div>
        <div class="panel"><h3>성장 전략</h3><p class="muted">채널 성장을 위한 구체적인 실행 전략을 제공합니다</p></div>
        <div class="panel"><h3>맞춤형 패키지</h3><p class="muted">채널 상태에 따른 성장 패키지 견적을 제공합니다</p></div>
    </div>
    <div class="panel">
        <h2>분석 가능 조건</h2>
        <ul>
            <li>최근 3개월 내 5개 이상의 영상</li>
            <li>최근 1개월 내 1개 이상의 영상</li>
        </ul>
    </div>
</div>"###,
        url = escape_html(url_value),
        error = error_block(error),
    );
    layout("YouTube 채널 분석기", &body)
}

// ============================================================================
// Channel preview (after lookup, before analysis)
// ============================================================================

pub fn channel_preview_page(url: &str, lookup: &ChannelLookup, eligibility: &Eligibility) -> String {
    let videos: String = lookup
        .recent_videos
        .iter()
        .map(|video| {
            format!(
                r###"<div class="video">
    <img src="{thumb}" alt="{title}">
    <div class="body">
        <a href="{href}" target="_blank" rel="noopener noreferrer"><strong>{title}</strong></a>
        <div class="muted">조회수: {views}회 · 좋아요: {likes}개 · 댓글: {comments}개</div>
        <div class="muted">업로드: {date}</div>
    </div>
</div>"###,
                thumb = escape_html(&video.thumbnail),
                title = escape_html(&video.title),
                href = escape_html(&video.url),
                views = format_number(video.statistics.view_count),
                likes = format_number(video.statistics.like_count),
                comments = format_number(video.statistics.comment_count),
                date = escape_html(&display_date(&video.published_at)),
            )
        })
        .collect();

    let (verdict, action) = if eligibility.is_eligible {
        (
            r#"<div class="success">분석 가능한 채널입니다. 상세 분석을 진행해보세요!</div>"#
                .to_string(),
            format!(
                r#"<a class="button" href="/analysis?url={}">상세 분석 시작하기</a>"#,
                urlencoding::encode(url)
            ),
        )
    } else {
        (
            format!(
                r#"<div class="error">3개월 내에 업로드 한 게시물이 5개 이상이고, 한달이내에 업로드한 게시물이 1개 이상일때 분석 가능합니다.<br>현재 상태: 3개월 내 {}개, 1개월 내 {}개</div>"#,
                eligibility.count_last_90_days, eligibility.count_last_30_days
            ),
            r#"<span class="button disabled">분석 불가</span>"#.to_string(),
        )
    };

    let body = format!(
        r###"<div class="container" style="padding-top: 2rem">
    <div class="panel">
        <h1>{title}</h1>
        <p class="muted">구독자 {subscribers}명</p>
        <h2 style="margin-top: 1rem">최근 업로드 영상</h2>
        {videos}
        {verdict}
        {action}
        <a class="button" style="background:#64748b" href="/">다시 입력하기</a>
    </div>
</div>"###,
        title = escape_html(&lookup.title),
        subscribers = escape_html(lookup.subscriber_count.trim_end_matches('명')),
    );
    layout(&lookup.title, &body)
}

// ============================================================================
// Analysis page with quote builder
// ============================================================================

fn metric_cards(metrics: &PerformanceMetrics) -> String {
    let cards = [
        (
            "조회수",
            metrics.views.level,
            format!("보정 평균 {}회", format_number(metrics.views.value.round() as u64)),
            VIEWS_HELP,
        ),
        (
            "좋아요",
            metrics.likes.level,
            format!("평균 비율 {}", format_percent(metrics.likes.value)),
            LIKES_HELP,
        ),
        (
            "댓글",
            metrics.comments.level,
            format!("평균 비율 {}", format_percent(metrics.comments.value)),
            COMMENTS_HELP,
        ),
    ];

    cards
        .iter()
        .map(|(label, tier, value, help)| {
            format!(
                r###"<div class="panel">
    <h3>{label} 성과</h3>
    {chip}
    <p class="muted">{value}</p>
    <details><summary>계산 방법</summary><pre>{help}</pre></details>
</div>"###,
                chip = tier_chip(label, *tier),
                value = escape_html(value),
                help = escape_html(help),
            )
        })
        .collect()
}

fn list(items: &[String]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();
    format!("<ul>{}</ul>", items)
}

fn sections(groups: &[NarrativeSection]) -> String {
    groups
        .iter()
        .map(|section| {
            format!(
                "<h4>{}</h4>{}",
                escape_html(&section.title),
                list(&section.content)
            )
        })
        .collect()
}

fn narrative(case: &AnalysisCase) -> String {
    format!(
        r###"<div class="panel">
    <h2>분석 결과</h2>
    <p>{interpretation}</p>
    <h3 style="margin-top: 1rem">주요 원인</h3>{causes}
    <h3 style="margin-top: 1rem">상세 분석</h3>{detailed}
    <h3 style="margin-top: 1rem">개선 방안</h3>{recommendations}
    <h3 style="margin-top: 1rem">결론</h3>{conclusion}
</div>"###,
        interpretation = escape_html(&case.interpretation),
        causes = sections(&case.causes),
        detailed = sections(&case.detailed_analysis),
        recommendations = sections(&case.recommendations),
        conclusion = list(&case.conclusion),
    )
}

fn subscriber_addon_section(session: &QuoteSession, summary: &QuoteSummary) -> String {
    let addon = session.subscriber_addon();
    format!(
        r###"<div class="panel">
    <h2>1. 구독자 수 증가 단품</h2>
    <label><input type="checkbox" name="addon" {checked} onchange="this.form.submit()"> 선택</label>
    <div class="slider">
        <input type="range" name="addon_target" min="{min}" max="{max}" step="{step}" value="{target}" {disabled} onchange="this.form.submit()">
    </div>
    <p class="muted">설정된 구독자 수: {target_display}명</p>
    <p><strong>금액: {amount}</strong></p>
</div>"###,
        checked = if addon.selected { "checked" } else { "" },
        disabled = if addon.selected { "" } else { "disabled" },
        min = SUBSCRIBER_ADDON_MIN,
        max = SUBSCRIBER_ADDON_MAX,
        step = SUBSCRIBER_ADDON_STEP,
        target = addon.target,
        target_display = format_number(addon.target),
        amount = format_won(summary.subscriber_amount),
    )
}

fn video_section(video: &VideoSummary, session: &QuoteSession, summary: &QuoteSummary) -> String {
    let id = escape_html(&video.video_id);
    let selection = session.selection(&video.video_id).copied().unwrap_or_default();
    let chips = format!(
        "{}{}{}",
        tier_chip("조회수", video.performance.views),
        tier_chip("좋아요", video.performance.likes),
        tier_chip("댓글", video.performance.comments),
    );

    let header = format!(
        r###"<div class="video">
    <img src="{thumb}" alt="{title}">
    <div class="body">
        <strong>{title}</strong>
        <div class="muted">{date}</div>
        <div>{chips}</div>
    </div>
    <label><input type="checkbox" name="select_{id}" {checked} onchange="this.form.submit()"> 선택</label>
</div>"###,
        thumb = escape_html(&video.thumbnail),
        title = escape_html(&video.title),
        date = escape_html(&display_date(&video.published_at)),
        checked = if selection.selected { "checked" } else { "" },
    );

    let prev_package = selection.package.map(|p| p.code()).unwrap_or_default();

    // a deselected video keeps its package and sliders for when it is picked again
    if !selection.selected {
        let Some(package) = selection.package else {
            return header;
        };
        let targets: String = Metric::ALL
            .iter()
            .map(|metric| {
                format!(
                    r#"<input type="hidden" name="{key}_{id}" value="{value}">"#,
                    key = metric.key(),
                    value = selection.targets.get(*metric),
                )
            })
            .collect();
        return format!(
            r#"{header}
<input type="hidden" name="package_{id}" value="{code}">
<input type="hidden" name="prev_package_{id}" value="{code}">
{targets}"#,
            code = package.code(),
        );
    }

    let radios: String = Package::ALL
        .iter()
        .map(|package| {
            format!(
                r#"<label><input type="radio" name="package_{id}" value="{code}" {checked} onchange="this.form.submit()"> {name}<br><span class="muted">{price}</span></label>"#,
                code = package.code(),
                name = escape_html(package.info().name),
                price = format_won(package.price()),
                checked = if selection.package == Some(*package) { "checked" } else { "" },
            )
        })
        .collect();

    let line = summary.line(&video.video_id);
    let sliders: String = Metric::ALL
        .iter()
        .map(|metric| {
            let current = match metric {
                Metric::Views => video.stats.view_count,
                Metric::Likes => video.stats.like_count,
                Metric::Comments => video.stats.comment_count,
            };
            let increase = line.map(|l| l.quote.increase.get(*metric)).unwrap_or(0);
            let max = selection
                .package
                .map(|p| p.cap(*metric))
                .unwrap_or(crate::pricing::catalog::MAX_TARGET_PERCENT);
            format!(
                r###"<div class="slider">
    <label>{label} 목표: {value}% (최대 {max}%)</label>
    <input type="range" name="{key}_{id}" min="0" max="100" value="{value}" onchange="this.form.submit()">
    <div class="muted">현재: {current}{unit} · 예상: {projected}{unit} (+{increase}{unit})</div>
</div>"###,
                label = metric.label(),
                key = metric.key(),
                unit = metric.unit(),
                value = selection.targets.get(*metric),
                current = format_number(current),
                projected = format_number(current.saturating_add(increase)),
                increase = format_number(increase),
            )
        })
        .collect();

    let video_total = line.map(|l| l.quote.video_total).unwrap_or(0);

    format!(
        r###"{header}
<div class="panel" style="margin-left: 196px">
    <h3>패키지 선택</h3>
    <input type="hidden" name="prev_package_{id}" value="{prev_package}">
    <div class="packages">{radios}</div>
    <h3>세부 지표 설정</h3>
    {sliders}
    <p><strong>영상 총액: {video_total}</strong></p>
</div>"###,
        video_total = format_won(video_total),
    )
}

fn package_summary(summary: &QuoteSummary) -> String {
    let counts: String = summary
        .package_counts
        .iter()
        .map(|count| {
            format!(
                r#"<div class="panel"><strong>{name}</strong><div>{count}개 선택</div><div class="muted">{subtotal}</div></div>"#,
                name = escape_html(count.package.info().name),
                count = count.count,
                subtotal = format_won(count.subtotal),
            )
        })
        .collect();

    format!(
        r###"<h2 style="margin-top: 1.5rem">선택한 패키지 요약</h2>
<div class="grid">{counts}</div>
<div class="total">총 금액: {total}</div>"###,
        total = format_won(summary.total_amount),
    )
}

pub fn analysis_page(
    url: &str,
    channel_data: &str,
    analysis: &AnalysisResponse,
    session: &QuoteSession,
    summary: &QuoteSummary,
) -> String {
    let metrics_section = match (&analysis.metrics, &analysis.analysis) {
        (Some(metrics), Some(case)) => {
            format!(r#"<div class="grid">{}</div>{}"#, metric_cards(metrics), narrative(case))
        }
        (Some(metrics), None) => format!(r#"<div class="grid">{}</div>"#, metric_cards(metrics)),
        _ => r#"<div class="panel"><p>데이터를 분석할 수 없습니다.</p></div>"#.to_string(),
    };

    let videos: String = analysis
        .videos
        .iter()
        .map(|video| video_section(video, session, summary))
        .collect();

    let body = format!(
        r###"<div class="hero"><div class="container">
    <a href="/" style="color: white">← 처음으로</a>
    <h1>{title}</h1>
    <p>{description}명</p>
</div></div>
<div class="container">
    {metrics_section}
    <form method="post" action="/analysis/quote">
        <input type="hidden" name="url" value="{url}">
        <input type="hidden" name="{CHANNEL_FIELD}" value="{channel_data}">
        {addon}
        <div class="panel">
            <h2>2. 영상별 패키지 선택</h2>
            {videos}
            {package_summary}
            <button type="submit">금액 다시 계산하기</button>
        </div>
    </form>
</div>"###,
        title = escape_html(&analysis.channel.title),
        description = escape_html(analysis.channel.description.trim_end_matches('명')),
        url = escape_html(url),
        channel_data = escape_html(channel_data),
        addon = subscriber_addon_section(session, summary),
        package_summary = package_summary(summary),
    );
    layout(&format!("{} - 채널 분석", analysis.channel.title), &body)
}

use funnel_core::StageInfo;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn metric(label: &str, value_html: &str) -> String {
    format!(
        "<div class=\"metric\"><div class=\"metric-label\">{}</div>{}</div>",
        label, value_html
    )
}

/// Volume, conversion rate and channel tags for the `#stage-metrics` block.
pub fn metrics_markup(info: &StageInfo) -> String {
    let channels: String = info
        .channels
        .iter()
        .map(|c| format!("<span class=\"channel-tag\">{}</span>", escape_html(c)))
        .collect();
    [
        metric(
            "Volume",
            &format!("<div class=\"metric-value\">{}</div>", escape_html(&info.volume)),
        ),
        metric(
            "Conversion Rate",
            &format!("<div class=\"metric-value\">{}</div>", escape_html(&info.rate)),
        ),
        metric(
            "Channels",
            &format!("<div class=\"channels-list\">{}</div>", channels),
        ),
    ]
    .concat()
}

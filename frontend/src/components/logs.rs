//! Processing log panel.
//!
//! Entries come from two places: the backend's `/api/logs` event stream and
//! lines the UI adds itself (upload start, client-side rejections). Both go
//! through [`push_log`], which keeps the newest [`MAX_LOG_ENTRIES`].

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::{LogEntry, LogLevel, BACKEND_URL, MAX_LOG_ENTRIES};

/// Append `entry`, dropping the oldest entries beyond `max`.
pub fn append_capped(logs: &mut Vec<LogEntry>, entry: LogEntry, max: usize) {
    logs.push(entry);
    if logs.len() > max {
        let excess = logs.len() - max;
        logs.drain(..excess);
    }
}

pub fn push_log(set_logs: WriteSignal<Vec<LogEntry>>, entry: LogEntry) {
    set_logs.update(|logs| append_capped(logs, entry, MAX_LOG_ENTRIES));
}

/// Decode one event of the backend log stream.
///
/// Keep-alive comments and malformed payloads give `None`.
pub fn parse_sse_log(json: &str) -> Option<LogEntry> {
    #[derive(serde::Deserialize)]
    struct Wire {
        level: String,
        message: String,
        #[serde(default)]
        indent: u8,
        timestamp: Option<String>,
    }

    let wire: Wire = serde_json::from_str(json).ok()?;
    let level = match wire.level.as_str() {
        "success" => LogLevel::Success,
        "warning" => LogLevel::Warning,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    };

    Some(LogEntry {
        level,
        message: wire.message,
        timestamp: wire
            .timestamp
            .unwrap_or_else(|| chrono::Local::now().format("%H:%M:%S").to_string()),
        indent: wire.indent,
    })
}

/// Subscribe to the backend log stream for the lifetime of the page.
///
/// The browser reconnects an `EventSource` on its own after errors.
pub fn init_sse_logs(set_logs: WriteSignal<Vec<LogEntry>>) {
    let url = format!("{}/api/logs", BACKEND_URL);
    let source = match EventSource::new(&url) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Cannot open log stream {}: {:?}", url, e);
            return;
        }
    };

    let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        if let Some(entry) = event.data().as_string().as_deref().and_then(parse_sse_log) {
            push_log(set_logs, entry);
        }
    });
    source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(|_: web_sys::Event| {
        log::warn!("Log stream interrupted");
    });
    source.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    std::mem::forget(source);
}

#[component]
pub fn LogsPanel(
    logs: ReadSignal<Vec<LogEntry>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let list = create_node_ref::<leptos::html::Div>();

    // Follow the newest line once the DOM has the new entry.
    create_effect(move |_| {
        logs.with(Vec::len);
        if let Some(el) = list.get() {
            request_animation_frame(move || el.set_scroll_top(el.scroll_height()));
        }
    });

    let lines = move || {
        logs.get()
            .into_iter()
            .map(|entry| {
                let class = format!("log-entry {}", entry.level.css_class());
                let style = format!("padding-left: {}em;", f32::from(entry.indent) * 1.5);
                view! {
                    <div class=class style=style>
                        <span class="log-time">{format!("[{}] ", entry.timestamp)}</span>
                        {entry.message}
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"📋 Processing Logs"</span>
                <button class="logs-clear" on:click=move |_| set_logs.set(Vec::new())>"Clear"</button>
            </div>
            <div class="logs-content" node_ref=list>{lines}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            level: LogLevel::Info,
            message: message.to_string(),
            timestamp: "00:00:00".to_string(),
            indent: 0,
        }
    }

    #[test]
    fn test_append_capped_drops_oldest() {
        let mut logs = Vec::new();
        for i in 0..5 {
            append_capped(&mut logs, entry(&i.to_string()), 3);
        }

        let messages: Vec<&str> = logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_parse_backend_entry() {
        let entry = parse_sse_log(
            r#"{"level":"warning","message":"No paid revenue","indent":1,"timestamp":"10:11:12"}"#,
        )
        .unwrap();

        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.message, "No paid revenue");
        assert_eq!(entry.indent, 1);
        assert_eq!(entry.timestamp, "10:11:12");
    }

    #[test]
    fn test_parse_unknown_level_is_info() {
        let entry = parse_sse_log(r#"{"level":"debug","message":"x","timestamp":"01:02:03"}"#).unwrap();
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.indent, 0);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_sse_log("keep-alive").is_none());
        assert!(parse_sse_log(r#"{"level":"info"}"#).is_none());
    }
}

//! Cleaned CSV download button.

use leptos::*;

use crate::services::{download_text, CSV_MIME};

#[component]
pub fn DownloadButton(file_name: String, content: String) -> impl IntoView {
    let (error, set_error) = create_signal(None::<String>);

    let on_click = move |_| match download_text(&file_name, &content, CSV_MIME) {
        Ok(()) => set_error.set(None),
        Err(e) => {
            log::error!("Download failed: {}", e);
            set_error.set(Some(e.to_string()));
        }
    };

    view! {
        <div class="download-section">
            <button class="btn btn-primary" on:click=on_click>
                "⬇️ Download cleaned_data.csv"
            </button>
            {move || error.get().map(|msg| view! { <p class="download-error">{msg}</p> })}
        </div>
    }
}

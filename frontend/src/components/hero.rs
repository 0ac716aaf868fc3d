//! Hero section component

use leptos::*;

use crate::APP_NAME;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"📊 " {APP_NAME}</h1>
            <p class="subtitle">
                "Upload a traffic acquisition export to split source / medium, "
                "tag paid and non-paid traffic, and see where paid revenue comes from."
            </p>
        </div>
    }
}

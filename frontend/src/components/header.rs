use leptos::*;

use crate::services::check_health;
use crate::BACKEND_URL;

#[component]
pub fn Header() -> impl IntoView {
    // None until the first health check answers
    let (backend_up, set_backend_up) = create_signal(None::<bool>);

    spawn_local(async move {
        let up = check_health(BACKEND_URL).await;
        if !up {
            log::warn!("⚠️  Backend not reachable at {}", BACKEND_URL);
        }
        set_backend_up.set(Some(up));
    });

    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">"REVFLOW"</a>
                <span class="badge">"Attribution"</span>
            </div>
            <div class="header-right">
                <div class="api-status" class:connected=move || backend_up.get() == Some(true)>
                    <span class="api-dot" class:connected=move || backend_up.get() == Some(true)></span>
                    <span>
                        {move || match backend_up.get() {
                            None => "Checking API...",
                            Some(true) => "API online",
                            Some(false) => "API offline",
                        }}
                    </span>
                </div>
            </div>
        </header>
    }
}

//! 送信中インジケーター

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="loading-indicator">
            <div class="spinner"></div>
            <p>"Processing..."</p>
        </div>
    }
}

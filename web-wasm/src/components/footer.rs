use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p>"Powered by advanced image captioning"</p>
        </footer>
    }
}

pub mod base;
pub mod styles;
pub mod cookies;
pub mod hooks;
pub mod components;
pub mod pages;

use yew::prelude::*;

use crate::pages::slot_game::SlotGamePage;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen w-full">
            <div class="mx-auto">
                <SlotGamePage />
            </div>
        </div>
    }
}

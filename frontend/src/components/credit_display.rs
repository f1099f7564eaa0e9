use yew::prelude::*;

use crate::hooks::use_credits;
use crate::styles;

/// Shows the persisted credit balance, kept current via credit-update
/// events.
#[function_component(CreditDisplay)]
pub fn credit_display() -> Html {
    let balance = use_credits();

    html! {
        <div class="flex items-center justify-center gap-2 mb-6">
            <span class={styles::TEXT_SMALL}>{"Credits"}</span>
            <span class={styles::CREDIT_DISPLAY}>{format!("${}", *balance)}</span>
        </div>
    }
}

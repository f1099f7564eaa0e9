use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct AlertToastProps {
    pub message: Option<String>,
}

/// Transient notification banner: insufficient funds, win announcements,
/// reset confirmations. The page clears the message after a short delay.
#[function_component(AlertToast)]
pub fn alert_toast(props: &AlertToastProps) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };

    let class = if message.contains("won") || message.contains("reset") {
        styles::ALERT_SUCCESS
    } else {
        styles::ALERT_ERROR
    };

    html! {
        <div class="mb-6 text-center animate-pulse">
            <p class={class}>{message}</p>
        </div>
    }
}

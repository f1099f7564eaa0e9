use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::session::SpinResult;

use crate::styles;

/// Reads a symbol index from a debug input field.
pub fn read_index_input(input_ref: &NodeRef) -> Option<usize> {
    input_ref
        .cast::<HtmlInputElement>()?
        .value()
        .trim()
        .parse()
        .ok()
}

/// Reads a credit amount from the balance override field.
pub fn read_amount_input(input_ref: &NodeRef) -> Option<i64> {
    input_ref
        .cast::<HtmlInputElement>()?
        .value()
        .trim()
        .parse()
        .ok()
}

pub fn rule_description(id: &str) -> &'static str {
    match id {
        "ThreeBar" => "Three 3-Bars",
        "ThreeSeven" => "Three Sevens",
        "ThreeCherries" => "Three Cherries",
        "ThreeTwoBar" => "Three 2-Bars",
        "ThreeOneBar" => "Three Bars",
        "CherryOrSeven" => "A cherry and a seven, any positions",
        _ => "",
    }
}

// Stake button component
#[derive(Properties, PartialEq)]
pub struct StakeButtonProps {
    pub stake: i64,
    pub disabled: bool,
    pub onclick: Callback<i64>,
}

#[function_component(StakeButton)]
pub fn stake_button(props: &StakeButtonProps) -> Html {
    let onclick = {
        let callback = props.onclick.clone();
        let stake = props.stake;
        Callback::from(move |_: MouseEvent| callback.emit(stake))
    };

    let class = if props.disabled {
        styles::STAKE_BUTTON_DISABLED
    } else {
        styles::STAKE_BUTTON
    };

    html! {
        <button {onclick} disabled={props.disabled} class={class}>
            {format!("${}", props.stake)}
        </button>
    }
}

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub result: Option<SpinResult>,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let Some(result) = &props.result else {
        return html! {};
    };

    let line = result.pay_line.join(" | ");

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            {
                if result.award > 0 {
                    html! {
                        <div class="flex items-center justify-center px-6 py-4 rounded-xl bg-gradient-to-r from-yellow-400 to-orange-500 text-white font-bold text-xl shadow-lg border-2 border-yellow-300 animate-pulse">
                            <span>{format!("You won ${}!", result.award)}</span>
                        </div>
                    }
                } else {
                    html! {
                        <div class={styles::TEXT_BODY}>
                            <span>{"No win this time."}</span>
                        </div>
                    }
                }
            }
            <div class="text-sm text-gray-600 dark:text-gray-400 mt-3 bg-gray-100 dark:bg-gray-800 px-4 py-2 rounded-full">
                {format!("Pay-line: {}", line)}
            </div>
        </div>
    }
}

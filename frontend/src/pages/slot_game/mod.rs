mod reel_canvas;
mod slot_utils;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::constants::{
    ALERT_DURATION_MS, DEFAULT_CREDIT_AMOUNT, NOT_ENOUGH_CREDITS_MESSAGE, STAKE_OPTIONS,
};
use shared::ledger::Ledger;
use shared::paytable;
use shared::session::{PlayOutcome, SlotSession, SpinResult};
use shared::shared_slot_game::{standard_machine, standard_symbols, SpinPlan};

use crate::base::dispatch_credit_event;
use crate::components::{AlertToast, CreditDisplay};
use crate::cookies::CookieStore;
use crate::styles;

use reel_canvas::ReelCanvas;
use slot_utils::{read_amount_input, read_index_input, rule_description, ResultDisplay, StakeButton};

type Session = SlotSession<CookieStore>;

#[function_component(SlotGamePage)]
pub fn slot_game_page() -> Html {
    // The session owns the machine and the cookie-persisted ledger for
    // the lifetime of the page; UI state only mirrors it for rendering.
    let session = use_mut_ref(|| Session::new(standard_machine(), Ledger::load(CookieStore)));

    let is_spinning = use_state(|| false);
    let current_spin = use_state(|| None::<(u32, SpinPlan)>);
    let spin_counter = use_mut_ref(|| 0u32);
    let last_result = use_state(|| None::<SpinResult>);
    let alert = use_state(|| None::<String>);

    let reel_inputs = [use_node_ref(), use_node_ref(), use_node_ref()];
    let balance_input = use_node_ref();

    // Announce the restored balance once on mount.
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            dispatch_credit_event(session.borrow().balance());
            || ()
        });
    }

    let show_alert = {
        let alert = alert.clone();
        Callback::from(move |message: String| {
            alert.set(Some(message));

            let alert = alert.clone();
            spawn_local(async move {
                TimeoutFuture::new(ALERT_DURATION_MS).await;
                alert.set(None);
            });
        })
    };

    // Hands a started spin to the reels and settles it at the last stop:
    // score the pay-line, credit the award, free the machine.
    let run_spin = {
        let session = session.clone();
        let is_spinning = is_spinning.clone();
        let current_spin = current_spin.clone();
        let spin_counter = spin_counter.clone();
        let last_result = last_result.clone();
        let show_alert = show_alert.clone();

        Callback::from(move |plan: SpinPlan| {
            *spin_counter.borrow_mut() += 1;
            let spin_id = *spin_counter.borrow();

            is_spinning.set(true);
            last_result.set(None);
            current_spin.set(Some((spin_id, plan.clone())));

            let session = session.clone();
            let is_spinning = is_spinning.clone();
            let last_result = last_result.clone();
            let show_alert = show_alert.clone();
            let pay_line = plan.pay_line.clone();

            Timeout::new(plan.last_stop_ms(), move || {
                let result = session.borrow_mut().finish_spin(&pay_line);
                dispatch_credit_event(session.borrow().balance());

                if result.award > 0 {
                    show_alert.emit(format!("You won ${}!", result.award));
                }
                last_result.set(Some(result));
                is_spinning.set(false);
            })
            .forget();
        })
    };

    let on_play = {
        let session = session.clone();
        let run_spin = run_spin.clone();
        let show_alert = show_alert.clone();

        Callback::from(move |stake: i64| {
            let outcome = {
                let mut rng = SmallRng::from_entropy();
                session.borrow_mut().play(stake, || rng.gen::<f64>())
            };

            match outcome {
                PlayOutcome::Started(plan) => {
                    dispatch_credit_event(session.borrow().balance());
                    run_spin.emit(plan);
                }
                PlayOutcome::InsufficientFunds => {
                    show_alert.emit(NOT_ENOUGH_CREDITS_MESSAGE.to_string());
                }
                PlayOutcome::Busy => {}
            }
        })
    };

    let on_reset = {
        let session = session.clone();
        let show_alert = show_alert.clone();
        let last_result = last_result.clone();

        Callback::from(move |_: MouseEvent| {
            if session.borrow_mut().reset() {
                dispatch_credit_event(session.borrow().balance());
                last_result.set(None);
                show_alert.emit(format!("Credits reset to ${}", DEFAULT_CREDIT_AMOUNT));
            }
        })
    };

    // Fixed mode: pins each reel to the entered symbol index, no stake.
    let on_play_forced = {
        let session = session.clone();
        let run_spin = run_spin.clone();
        let reel_inputs = reel_inputs.clone();

        Callback::from(move |_: MouseEvent| {
            let selections: Vec<usize> = reel_inputs.iter().filter_map(read_index_input).collect();
            if selections.len() != reel_inputs.len() {
                return;
            }

            let plan = {
                let mut rng = SmallRng::from_entropy();
                session.borrow_mut().play_forced(&selections, || rng.gen::<f64>())
            };
            if let Some(plan) = plan {
                run_spin.emit(plan);
            }
        })
    };

    let on_set_balance = {
        let session = session.clone();
        let balance_input = balance_input.clone();

        Callback::from(move |_: MouseEvent| {
            if let Some(amount) = read_amount_input(&balance_input) {
                session.borrow_mut().set_balance(amount);
                dispatch_credit_event(session.borrow().balance());
            }
        })
    };

    let symbols = standard_symbols();
    let spin_id = (*current_spin).as_ref().map(|(id, _)| *id).unwrap_or(0);

    html! {
        <div class={styles::CONTAINER}>
            <div class="container mx-auto px-4 py-8">
                <h1 class={classes!(styles::TEXT_H1, "mb-6", "text-center")}>
                    <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">
                        {"Slot Machine"}
                    </span>
                </h1>

                <CreditDisplay />
                <AlertToast message={(*alert).clone()} />

                <div class={styles::CARD}>
                    <div class="flex justify-center gap-4 mb-8">
                        {
                            for (0..3usize).map(|i| {
                                let stop = (*current_spin)
                                    .as_ref()
                                    .and_then(|(_, plan)| plan.stops.get(i).cloned());
                                html! {
                                    <ReelCanvas symbols={symbols.clone()} {stop} {spin_id} />
                                }
                            })
                        }
                    </div>

                    <div class="flex flex-wrap justify-center gap-3 mb-4">
                        {
                            for STAKE_OPTIONS.iter().map(|&stake| html! {
                                <StakeButton
                                    {stake}
                                    disabled={*is_spinning}
                                    onclick={on_play.clone()}
                                />
                            })
                        }
                    </div>

                    <ResultDisplay result={(*last_result).clone()} />

                    <div class="flex justify-center mt-4">
                        <button
                            onclick={on_reset}
                            disabled={*is_spinning}
                            class={styles::BUTTON_DANGER}
                        >
                            {"Reset Credits"}
                        </button>
                    </div>

                    // Pay table
                    <div class="mt-8 text-center bg-gray-50 dark:bg-gray-700/30 p-6 rounded-xl shadow-sm">
                        <h3 class={classes!(styles::TEXT_H3, "mb-3")}>{"Pay Table"}</h3>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-3 mt-4">
                            {
                                for paytable::rules().iter().map(|rule| html! {
                                    <div class="bg-white dark:bg-gray-800 p-3 rounded-lg shadow-sm flex items-center justify-between border-l-4 border-orange-500">
                                        <span class={styles::TEXT_BODY}>{rule_description(rule.id)}</span>
                                        <span class="font-medium text-gray-900 dark:text-white">
                                            {format!("{} pts", rule.points)}
                                        </span>
                                    </div>
                                })
                            }
                        </div>
                        <p class={classes!(styles::TEXT_SMALL, "mt-4")}>
                            {"Wins pay points multiplied by your stake."}
                        </p>
                    </div>

                    // Fixed-mode panel for pinning reel outcomes
                    <div class="mt-8 bg-gray-50 dark:bg-gray-700/30 p-6 rounded-xl shadow-sm">
                        <h3 class={classes!(styles::TEXT_H3, "mb-3", "text-center")}>{"Fixed Mode"}</h3>
                        <div class="flex flex-wrap items-end justify-center gap-3">
                            {
                                for reel_inputs.iter().enumerate().map(|(i, input_ref)| html! {
                                    <div>
                                        <label class={styles::TEXT_LABEL}>
                                            {format!("Reel {}", i + 1)}
                                        </label>
                                        <input
                                            ref={input_ref.clone()}
                                            type="number"
                                            min="0"
                                            max={ (symbols.len() - 1).to_string() }
                                            class={classes!(styles::INPUT, "w-24")}
                                        />
                                    </div>
                                })
                            }
                            <button
                                onclick={on_play_forced}
                                disabled={*is_spinning}
                                class={styles::BUTTON_SECONDARY}
                            >
                                {"Play Fixed"}
                            </button>
                        </div>
                        <div class="flex flex-wrap items-end justify-center gap-3 mt-4">
                            <div>
                                <label class={styles::TEXT_LABEL}>{"Balance"}</label>
                                <input
                                    ref={balance_input.clone()}
                                    type="number"
                                    min="1"
                                    class={classes!(styles::INPUT, "w-36")}
                                />
                            </div>
                            <button onclick={on_set_balance} class={styles::BUTTON_SECONDARY}>
                                {"Set Balance"}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

use std::rc::Rc;

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use lotto_gate::api::{Disclaimer, PredictionRequest};
use lotto_gate::client::PredictionClient;
use lotto_gate::config::ClientConfig;
use lotto_gate::error::Notice;
use lotto_gate::flow::{FeedbackForm, FlowAction, FlowOutcome, PredictFlow, TriggerState};
use lotto_gate::gate::{remaining_label, GateTick, WATCH_THRESHOLD_SECS};
use lotto_gate::modal::{ModalController, ModalId};
use lotto_gate::player::{Playback, PlayerState, VideoCatalog};
use lotto_gate::prng::Prng;
use lotto_gate::render::{render_analysis, render_prediction, AnalysisView, RenderOptions, ResultView};
use lotto_gate::session::{GateSession, PrewarmFn};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::ui_model::{
    notice_class, trigger_label, PageConfig, DONE_LABEL, FEEDBACK_PLACEHOLDER, FEEDBACK_TITLE,
    GATE_HINT, GATE_TITLE, PLAYER_ELEMENT_ID, PREDICT_BUTTON_ID, RESULTS_SECTION_ID,
    WATCH_GATE_ATTR,
};

mod fetch;
mod modal_host;
mod results;
mod ticker;
mod youtube;

use fetch::FetchTransport;
use modal_host::DomModalHost;
use results::{AnalysisPanel, DisclaimerFooter, ResultPanel};
use ticker::IntervalTicker;
use youtube::WebPlayer;

type WebSession = GateSession<IntervalTicker, WebPlayer>;

pub fn start() {
    youtube::install_ready_hook();
    youtube::load_sdk();
    mount_to_body(|| view! { <App /> });
}

fn read_page_config() -> PageConfig {
    let window = web_sys::window();
    let hostname = window
        .as_ref()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    let attr = window
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|b| b.get_attribute(WATCH_GATE_ATTR));
    PageConfig::from_page(&hostname, attr.as_deref())
}

fn client(cfg: ClientConfig) -> PredictionClient<FetchTransport> {
    PredictionClient::new(cfg, FetchTransport)
}

fn log_error(context: &str, e: &impl std::fmt::Display) {
    web_sys::console::error_1(&format!("{context}: {e}").into());
}

#[component]
fn App() -> impl IntoView {
    let page = read_page_config();
    let gated = page.flow.require_watch_gate;
    let client_cfg = StoredValue::new(page.client);
    let flow = StoredValue::new(PredictFlow::new(page.flow));

    let session = StoredValue::new_local(None::<WebSession>);
    let gate_modal = StoredValue::new_local(ModalController::<HtmlElement>::new(ModalId::WatchGate));
    let feedback_modal =
        StoredValue::new_local(ModalController::<HtmlElement>::new(ModalId::Feedback));
    let feedback = StoredValue::new(FeedbackForm::new());

    let (trigger, set_trigger) = signal(TriggerState::Ready);
    let (loading, set_loading) = signal(false);
    let (remaining, set_remaining) = signal(WATCH_THRESHOLD_SECS);
    let (unlocked, set_unlocked) = signal(false);
    let (notice, set_notice) = signal::<Option<Notice>>(None);
    let (result, set_result) = signal::<Option<ResultView>>(None);
    let (analysis, set_analysis) = signal::<Option<AnalysisView>>(None);
    let (disclaimer, set_disclaimer) = signal::<Option<Disclaimer>>(None);
    let (draft, set_draft) = signal(String::new());
    let (sending, set_sending) = signal(false);

    let sync_flow = move || {
        flow.with_value(|f| {
            set_trigger.set(f.trigger());
            set_loading.set(f.is_loading());
        });
    };

    let show_tick = move |tick: GateTick| {
        set_remaining.set(tick.remaining);
        set_unlocked.set(tick.unlocked);
    };

    let on_tick = move || {
        let mut tick = None;
        session.update_value(|s| {
            if let Some(s) = s {
                tick = Some(s.tick());
            }
        });
        if let Some(t) = tick {
            show_tick(t);
        }
    };

    let on_player = move |state: PlayerState| {
        let mut tick = None;
        session.update_value(|s| {
            if let Some(s) = s {
                tick = Some(s.on_player_state(state));
            }
        });
        if let Some(t) = tick {
            show_tick(t);
        }
    };

    let run_predict = move |request: PredictionRequest| {
        sync_flow();
        let cfg = client_cfg.get_value();
        let opts = RenderOptions {
            show_details: flow.with_value(|f| f.config().show_details),
        };
        spawn_local(async move {
            let res = client(cfg).predict(&request).await;
            if let Err(e) = &res {
                log_error("predict", e);
            }
            let mut outcome = None;
            flow.update_value(|f| outcome = Some(f.finish(res)));
            sync_flow();
            match outcome {
                Some(FlowOutcome::Rendered(resp)) => {
                    set_notice.set(None);
                    set_result.set(Some(render_prediction(&resp, opts)));
                }
                Some(FlowOutcome::Failed(n)) => set_notice.set(Some(n)),
                None => {}
            }
        });
    };

    let close_gate = move || {
        session.update_value(|s| {
            if let Some(mut old) = s.take() {
                old.close();
            }
        });
        let busy = flow.with_value(|f| !f.trigger_enabled());
        if let Some(host) = DomModalHost::new() {
            let host = host.trigger_busy(busy);
            gate_modal.update_value(|m| {
                m.close(&host);
            });
        }
    };

    let open_gate = move || {
        let Some(host) = DomModalHost::new() else {
            web_sys::console::warn_1(&"gate: document not ready".into());
            return;
        };
        set_remaining.set(WATCH_THRESHOLD_SECS);
        set_unlocked.set(false);
        gate_modal.update_value(|m| {
            m.open(&host);
        });

        let ticker = IntervalTicker::new(Rc::new(on_tick));
        let warm_cfg = client_cfg.get_value();
        let prewarm: PrewarmFn = Box::new(move || {
            let cfg = warm_cfg.clone();
            spawn_local(async move {
                if !client(cfg).check_health().await {
                    web_sys::console::log_1(&"prewarm: health check did not answer".into());
                }
            });
        });

        let playback = if youtube::sdk_ready() {
            let mut rng = Prng::from_unit_f64(js_sys::Math::random());
            match VideoCatalog::default().pick(&mut rng) {
                Some(id) => match WebPlayer::create(PLAYER_ELEMENT_ID, id, on_player) {
                    Ok(p) => Playback::Embedded(p),
                    Err(e) => {
                        web_sys::console::warn_2(&"youtube: falling back to countdown".into(), &e);
                        Playback::Fallback
                    }
                },
                None => Playback::Fallback,
            }
        } else {
            Playback::Fallback
        };

        let next = GateSession::open(ticker, playback, prewarm);
        session.update_value(|s| {
            if let Some(mut old) = s.replace(next) {
                old.close();
            }
        });
    };

    let on_trigger = move |_: MouseEvent| {
        let mut action = FlowAction::Ignored;
        flow.update_value(|f| action = f.on_trigger());
        match action {
            FlowAction::Ignored => {}
            FlowAction::OpenGate => open_gate(),
            FlowAction::Predict(request) => run_predict(request),
        }
    };

    let on_done = move |_: MouseEvent| {
        let is_unlocked = session.with_value(|s| s.as_ref().is_some_and(|s| s.is_unlocked()));
        let mut action = FlowAction::Ignored;
        flow.update_value(|f| action = f.on_done(is_unlocked));
        if let FlowAction::Predict(request) = action {
            close_gate();
            run_predict(request);
        }
    };

    let open_feedback = move |_: MouseEvent| {
        feedback.update_value(|f| f.clear());
        set_draft.set(String::new());
        if let Some(host) = DomModalHost::new() {
            feedback_modal.update_value(|m| {
                m.open(&host);
            });
        }
    };

    let close_feedback = move || {
        if let Some(host) = DomModalHost::new() {
            feedback_modal.update_value(|m| {
                m.close(&host);
            });
        }
    };

    let send_feedback = move |_: MouseEvent| {
        let mut message = None;
        feedback.update_value(|f| {
            f.set_draft(draft.get_untracked());
            message = f.begin_send();
        });
        let Some(message) = message else {
            return;
        };
        set_sending.set(true);
        let cfg = client_cfg.get_value();
        spawn_local(async move {
            let res = client(cfg).send_feedback(&message).await;
            if let Err(e) = &res {
                log_error("feedback", e);
            }
            let mut out = None;
            feedback.update_value(|f| out = Some(f.finish(res)));
            set_sending.set(false);
            if let Some(out) = out {
                set_notice.set(Some(out.notice));
                if out.close_modal {
                    set_draft.set(String::new());
                    close_feedback();
                }
            }
        });
    };

    let load_analysis = move |_: MouseEvent| {
        let cfg = client_cfg.get_value();
        spawn_local(async move {
            match client(cfg).comprehensive_analysis().await {
                Ok(a) => set_analysis.set(Some(render_analysis(&a))),
                Err(e) => {
                    log_error("analysis", &e);
                    set_notice.set(Some(Notice::error("Could not load the analysis.")));
                }
            }
        });
    };

    {
        let cfg = client_cfg.get_value();
        spawn_local(async move {
            match client(cfg).disclaimer().await {
                Ok(d) => set_disclaimer.set(Some(d)),
                Err(e) => log_error("disclaimer", &e),
            }
        });
    }

    on_cleanup(move || close_gate());

    view! {
        <div class="container">
            <header>
                <h1>"Lotto Number Predictor"</h1>
            </header>

            <main>
                {move || {
                    notice
                        .get()
                        .map(|n| {
                            view! {
                                <div class={notice_class(n.level)} role="status">
                                    <span>{n.text}</span>
                                    <button class="notice-close" on:click=move |_| set_notice.set(None)>
                                        "×"
                                    </button>
                                </div>
                            }
                        })
                }}

                <section class="predict">
                    <button
                        id=PREDICT_BUTTON_ID
                        class="btn primary"
                        prop:disabled=move || trigger.get() != TriggerState::Ready
                        on:click=on_trigger
                    >
                        {move || trigger_label(trigger.get())}
                    </button>
                    <button id="feedback-open" class="btn" on:click=open_feedback>
                        "Feedback"
                    </button>
                </section>

                <section id=RESULTS_SECTION_ID tabindex="-1">
                    {move || result.get().map(|r| view! { <ResultPanel result=r /> })}
                </section>

                <Show when=move || !gated fallback=|| ()>
                    <section class="analysis-section">
                        <button class="btn" on:click=load_analysis>"Load analysis"</button>
                        {move || analysis.get().map(|a| view! { <AnalysisPanel analysis=a /> })}
                    </section>
                </Show>

                {move || disclaimer.get().map(|d| view! { <DisclaimerFooter disclaimer=d /> })}
            </main>

            <div
                id="loading-overlay"
                class="loading-overlay"
                style:display=move || if loading.get() { "flex" } else { "none" }
            >
                <div class="spinner"></div>
                <p>"Calculating..."</p>
            </div>

            <div
                id={ModalId::WatchGate.element_id()}
                class="modal hidden"
                role="dialog"
                aria-hidden="true"
                tabindex="-1"
            >
                <div class="modal-content">
                    <h3>{GATE_TITLE}</h3>
                    <p class="small">{GATE_HINT}</p>
                    <div id=PLAYER_ELEMENT_ID></div>
                    <p id="watch-remaining">
                        {move || remaining_label(remaining.get())}
                    </p>
                    <div class="modal-actions">
                        <button id="stretch-close" class="btn" on:click=move |_| close_gate()>
                            "Close"
                        </button>
                        <button
                            id="stretch-done"
                            class="btn primary"
                            prop:disabled=move || !unlocked.get()
                            on:click=on_done
                        >
                            {DONE_LABEL}
                        </button>
                    </div>
                </div>
            </div>

            <div
                id={ModalId::Feedback.element_id()}
                class="modal hidden"
                role="dialog"
                aria-hidden="true"
                tabindex="-1"
            >
                <div class="modal-content">
                    <h3>{FEEDBACK_TITLE}</h3>
                    <textarea
                        id="feedback-input"
                        placeholder=FEEDBACK_PLACEHOLDER
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    ></textarea>
                    <div class="modal-actions">
                        <button id="feedback-close" class="btn" on:click=move |_| close_feedback()>
                            "Close"
                        </button>
                        <button
                            id="feedback-send"
                            class="btn primary"
                            prop:disabled=move || sending.get()
                            on:click=send_feedback
                        >
                            "Send"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

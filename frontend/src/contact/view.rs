use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::warn;
use web_sys::{window, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::contact::guard::{BrowserClock, Clock, LocalStore, HONEYPOT_FIELD};
use crate::contact::lead::{BudgetRange, LeadField, ProjectType};
use crate::contact::sink::{LeadSink, SinkError, SupabaseSink};
use crate::contact::wizard::{Notice, SubmitAttempt, WizardState, WizardStep};

/// Delay before a closed wizard is wiped, so the closing animation still shows the content.
pub const RESET_DELAY_MS: u32 = 300;

#[derive(Properties, PartialEq)]
pub struct ContactWizardProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
}

pub enum Msg {
    Input(LeadField, String),
    Honeypot(String),
    Next,
    Back,
    Submit,
    Finished {
        session: u64,
        result: Result<(), SinkError>,
    },
    Reset,
}

pub struct ContactWizard {
    state: WizardState,
    sink: Rc<dyn LeadSink>,
    clock: BrowserClock,
    store: LocalStore,
    reset_timer: Option<Timeout>,
}

fn alert(notice: Notice) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(notice.message());
    }
}

impl Component for ContactWizard {
    type Message = Msg;
    type Properties = ContactWizardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let clock = BrowserClock;
        Self {
            state: WizardState::opened(clock.now_ms()),
            sink: Rc::new(SupabaseSink::from_config()),
            clock,
            store: LocalStore,
            reset_timer: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let is_open = ctx.props().is_open;
        if is_open != old_props.is_open {
            if is_open {
                // dropping a pending timer cancels it
                self.reset_timer = None;
                self.state.restart(self.clock.now_ms());
            } else {
                let link = ctx.link().clone();
                self.reset_timer = Some(Timeout::new(RESET_DELAY_MS, move || {
                    link.send_message(Msg::Reset);
                }));
            }
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(field, value) => match self.state.update_field(field, &value) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Ignoring input: {}", e);
                    false
                }
            },
            Msg::Honeypot(value) => {
                self.state.set_honeypot(&value);
                false
            }
            Msg::Next => {
                self.state.advance();
                true
            }
            Msg::Back => self.state.back(),
            Msg::Submit => {
                let session = self.state.session();
                match self.state.begin_submit(&self.clock, &self.store) {
                    SubmitAttempt::Dispatch(record) => {
                        let pending = self.sink.insert(record);
                        ctx.link().send_future(async move {
                            Msg::Finished {
                                session,
                                result: pending.await,
                            }
                        });
                        true
                    }
                    SubmitAttempt::RateLimited { .. } => {
                        alert(Notice::RateLimited);
                        true
                    }
                    SubmitAttempt::TooFast | SubmitAttempt::Ignored => false,
                    SubmitAttempt::Deflected | SubmitAttempt::Invalid => true,
                }
            }
            Msg::Finished { session, result } => {
                let changed = self
                    .state
                    .finish_submit(session, result, &self.clock, &self.store);
                if changed && self.state.notice == Some(Notice::SubmitFailed) {
                    alert(Notice::SubmitFailed);
                }
                changed
            }
            Msg::Reset => {
                self.reset_timer = None;
                self.state.restart(self.clock.now_ms());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if !ctx.props().is_open {
            return html! {};
        }

        let close = {
            let on_close = ctx.props().on_close.clone();
            Callback::from(move |_: MouseEvent| on_close.emit(()))
        };
        let honeypot = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Honeypot(input.value())
        });

        html! {
            <>
                <style>{WIZARD_CSS}</style>
                <div class="wizard-backdrop" onclick={close.clone()}></div>
                <input
                    type="text"
                    name={HONEYPOT_FIELD}
                    value={self.state.anti_spam.honeypot.clone()}
                    oninput={honeypot}
                    style="display: none;"
                    tabindex="-1"
                    autocomplete="off"
                />
                <div class="wizard-frame">
                    <div class="wizard-modal">
                        <button class="wizard-close" onclick={close.clone()}>{"✕"}</button>
                        if self.state.shows_success() {
                            { self.view_success(close) }
                        } else {
                            { self.view_progress() }
                            <div class="wizard-body">
                                <div class="wizard-step">
                                    { self.view_step(ctx) }
                                </div>
                                if let Some(notice) = self.state.notice {
                                    <div class="wizard-notice">{notice.message()}</div>
                                }
                                { self.view_controls(ctx) }
                            </div>
                        }
                    </div>
                </div>
            </>
        }
    }
}

impl ContactWizard {
    fn view_success(&self, close: Callback<MouseEvent>) -> Html {
        html! {
            <div class="wizard-success">
                <div class="wizard-success-icon">{"✓"}</div>
                <h3>{"Message Received!"}</h3>
                <p>
                    {format!(
                        "Thanks for reaching out, {}. We've received your project details and will get back to you within 24 hours.",
                        self.state.form.name
                    )}
                </p>
                <button class="wizard-primary" onclick={close}>{"Close"}</button>
            </div>
        }
    }

    fn view_progress(&self) -> Html {
        let current = self.state.step;
        html! {
            <div class="wizard-progress">
                { for WizardStep::ALL.into_iter().map(|step| {
                    let marker = if step < current {
                        "done"
                    } else if step == current {
                        "current"
                    } else {
                        "pending"
                    };
                    html! {
                        <div class={classes!("wizard-progress-item", marker)}>
                            <span class="wizard-progress-dot">
                                { if step < current { "✓".to_string() } else { step.number().to_string() } }
                            </span>
                            <span class="wizard-progress-label">{step.label()}</span>
                        </div>
                    }
                }) }
            </div>
        }
    }

    fn view_step(&self, ctx: &Context<Self>) -> Html {
        match self.state.step {
            WizardStep::Identity => self.view_identity(ctx),
            WizardStep::Scope => self.view_scope(ctx),
            WizardStep::Vision => self.view_vision(ctx),
            WizardStep::Review => self.view_review(),
        }
    }

    fn text_input(&self, ctx: &Context<Self>, label: &str, field: LeadField, placeholder: &str) -> Html {
        let value = self.state.form.value(field).to_string();
        let error = self.state.errors.get(field);
        // the input's name attribute carries the field
        let oninput = ctx.link().batch_callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match input.name().parse::<LeadField>() {
                Ok(field) => Some(Msg::Input(field, input.value())),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            }
        });

        html! {
            <div class="wizard-field">
                <label>{label}</label>
                <input
                    type={if field == LeadField::Email { "email" } else { "text" }}
                    name={field.as_str()}
                    value={value}
                    placeholder={placeholder.to_string()}
                    class={classes!(error.is_some().then(|| "invalid"))}
                    oninput={oninput}
                />
                { field_error(error) }
            </div>
        }
    }

    fn view_identity(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <h3>{"Let's get to know you"}</h3>
                <div class="wizard-grid">
                    { self.text_input(ctx, "Name", LeadField::Name, "John Doe") }
                    { self.text_input(ctx, "Email", LeadField::Email, "john@company.com") }
                </div>
                { self.text_input(ctx, "Company Name", LeadField::Company, "Acme Inc.") }
                { self.text_input(ctx, "Your Role", LeadField::Role, "Founder, CTO, etc.") }
            </>
        }
    }

    fn view_scope(&self, ctx: &Context<Self>) -> Html {
        let selected_type = self.state.form.project_type;
        let selected_budget = self.state.form.budget;

        html! {
            <>
                <h3>{"Project Scope"}</h3>
                <div class="wizard-field">
                    <label>{"Project Type"}</label>
                    <div class="wizard-grid">
                        { for ProjectType::ALL.into_iter().map(|project_type| {
                            let onclick = ctx.link().callback(move |_: MouseEvent| {
                                Msg::Input(LeadField::ProjectType, project_type.value().to_string())
                            });
                            let selected = selected_type == Some(project_type);
                            html! {
                                <div class={classes!("wizard-card", selected.then(|| "selected"))} onclick={onclick}>
                                    <span class="wizard-card-title">
                                        {project_type.label()}
                                        if selected { {" ✓"} }
                                    </span>
                                    <p>{project_type.blurb()}</p>
                                </div>
                            }
                        }) }
                    </div>
                    { field_error(self.state.errors.get(LeadField::ProjectType)) }
                </div>
                <div class="wizard-field">
                    <label>{"Budget Range (INR)"}</label>
                    <div class="wizard-budgets">
                        { for BudgetRange::ALL.into_iter().map(|budget| {
                            let onclick = ctx.link().callback(move |_: MouseEvent| {
                                Msg::Input(LeadField::Budget, budget.label().to_string())
                            });
                            html! {
                                <button
                                    type="button"
                                    class={classes!("wizard-budget", (selected_budget == Some(budget)).then(|| "selected"))}
                                    onclick={onclick}
                                >
                                    {budget.label()}
                                </button>
                            }
                        }) }
                    </div>
                    { field_error(self.state.errors.get(LeadField::Budget)) }
                </div>
            </>
        }
    }

    fn view_vision(&self, ctx: &Context<Self>) -> Html {
        let error = self.state.errors.get(LeadField::Description);
        let on_description = ctx.link().callback(|e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::Input(LeadField::Description, area.value())
        });

        html! {
            <>
                <h3>{"The Vision"}</h3>
                <div class="wizard-field">
                    <label>{"Tell us about the project goal and core features"}</label>
                    <textarea
                        name={LeadField::Description.as_str()}
                        value={self.state.form.description.clone()}
                        oninput={on_description}
                        class={classes!(error.is_some().then(|| "invalid"))}
                        placeholder="We need a dashboard for our logistics company that tracks..."
                    />
                    { field_error(error) }
                </div>
                { self.text_input(ctx, "Competitors or Inspiration (Optional)", LeadField::Competitors, "e.g. Linear, Airbnb, Stripe...") }
            </>
        }
    }

    fn view_review(&self) -> Html {
        let form = &self.state.form;
        html! {
            <>
                <h3>{"Review Details"}</h3>
                <div class="wizard-review">
                    <div class="wizard-grid">
                        { review_item("Name", form.name.clone()) }
                        { review_item("Email", form.email.clone()) }
                        { review_item("Type", form.project_type.map(|p| p.review_text()).unwrap_or_default()) }
                        { review_item("Budget", form.budget.map(|b| b.label().to_string()).unwrap_or_default()) }
                    </div>
                    <div class="wizard-review-description">
                        { review_item("Description", form.description.clone()) }
                    </div>
                    { for self.state.errors.iter().map(|(_, message)| field_error(Some(message))) }
                </div>
            </>
        }
    }

    fn view_controls(&self, ctx: &Context<Self>) -> Html {
        let step = self.state.step;
        let submitting = self.state.is_submitting();

        html! {
            <div class="wizard-controls">
                if step != WizardStep::Identity {
                    <button class="wizard-back" onclick={ctx.link().callback(|_| Msg::Back)}>
                        {"‹ Back"}
                    </button>
                } else {
                    <div></div>
                }
                if step != WizardStep::Review {
                    <button class="wizard-primary" onclick={ctx.link().callback(|_| Msg::Next)}>
                        {"Next ›"}
                    </button>
                } else {
                    <button
                        class="wizard-primary wizard-submit"
                        disabled={submitting}
                        onclick={ctx.link().callback(|_| Msg::Submit)}
                    >
                        if submitting {
                            <span class="loading-spinner"></span>
                        } else {
                            {"Send Request"}
                        }
                    </button>
                }
            </div>
        }
    }
}

fn field_error(error: Option<&'static str>) -> Html {
    match error {
        Some(message) => html! { <span class="wizard-error">{"⚠ "}{message}</span> },
        None => html! {},
    }
}

fn review_item(label: &'static str, value: String) -> Html {
    html! {
        <div>
            <span class="wizard-review-label">{label}</span>
            <p>{value}</p>
        </div>
    }
}

const WIZARD_CSS: &str = r#"
.wizard-backdrop {
    position: fixed;
    inset: 0;
    z-index: 60;
    background: rgba(0, 0, 0, 0.6);
    backdrop-filter: blur(4px);
}
.wizard-frame {
    position: fixed;
    inset: 0;
    z-index: 70;
    display: flex;
    align-items: center;
    justify-content: center;
    padding: 1rem;
    pointer-events: none;
}
.wizard-modal {
    position: relative;
    display: flex;
    width: 100%;
    max-width: 56rem;
    max-height: 90vh;
    background: #0f0f11;
    border: 1px solid rgba(255, 255, 255, 0.08);
    border-radius: 24px;
    box-shadow: 0 8px 32px rgba(0, 0, 0, 0.4);
    overflow: hidden;
    pointer-events: auto;
}
.wizard-close {
    position: absolute;
    top: 1rem;
    right: 1rem;
    width: 2rem;
    height: 2rem;
    border: none;
    border-radius: 50%;
    background: #27272a;
    color: #a1a1aa;
    cursor: pointer;
}
.wizard-progress {
    width: 16rem;
    padding: 2rem;
    background: rgba(24, 24, 27, 0.5);
    border-right: 1px solid rgba(255, 255, 255, 0.08);
}
.wizard-progress-item {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    margin-bottom: 0.5rem;
    color: #71717a;
}
.wizard-progress-dot {
    width: 2rem;
    height: 2rem;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 0.75rem;
    font-weight: bold;
    background: #27272a;
}
.wizard-progress-item.done .wizard-progress-dot { background: #39ff14; color: #18181b; }
.wizard-progress-item.current { color: white; }
.wizard-progress-item.current .wizard-progress-dot { background: white; color: #18181b; }
.wizard-body {
    flex: 1;
    display: flex;
    flex-direction: column;
    padding: 2.5rem;
    overflow-y: auto;
}
.wizard-step { flex: 1; }
.wizard-step h3 { font-size: 1.5rem; color: white; margin-bottom: 1.5rem; }
.wizard-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 1rem; }
.wizard-field { display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 1.25rem; }
.wizard-field label { font-size: 0.875rem; color: #d4d4d8; }
.wizard-field input, .wizard-field textarea {
    padding: 1rem;
    border-radius: 12px;
    background: rgba(39, 39, 42, 0.5);
    border: 1px solid #3f3f46;
    color: white;
    outline: none;
}
.wizard-field textarea { height: 8rem; resize: none; }
.wizard-field .invalid { border-color: #ef4444; }
.wizard-error { font-size: 0.75rem; color: #ef4444; }
.wizard-card {
    padding: 1rem;
    border-radius: 12px;
    border: 1px solid #27272a;
    cursor: pointer;
}
.wizard-card.selected { border-color: #1e90ff; background: rgba(30, 144, 255, 0.1); }
.wizard-card-title { font-weight: 500; color: white; }
.wizard-card.selected .wizard-card-title { color: #1e90ff; }
.wizard-card p { font-size: 0.75rem; color: #a1a1aa; }
.wizard-budgets { display: grid; grid-template-columns: repeat(4, 1fr); gap: 0.75rem; }
.wizard-budget {
    padding: 0.75rem;
    border-radius: 8px;
    border: 1px solid #3f3f46;
    background: transparent;
    color: #a1a1aa;
    cursor: pointer;
}
.wizard-budget.selected { background: white; color: #18181b; border-color: transparent; }
.wizard-review {
    padding: 1.5rem;
    border-radius: 12px;
    background: #18181b;
    border: 1px solid #27272a;
}
.wizard-review-label { font-size: 0.75rem; color: #71717a; }
.wizard-review p { color: white; }
.wizard-review-description { margin-top: 1rem; padding-top: 1rem; border-top: 1px solid #27272a; }
.wizard-notice {
    margin-top: 1rem;
    padding: 0.75rem 1rem;
    border-radius: 8px;
    background: rgba(239, 68, 68, 0.1);
    color: #fca5a5;
}
.wizard-controls {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-top: 2rem;
    padding-top: 1.5rem;
    border-top: 1px solid rgba(255, 255, 255, 0.05);
}
.wizard-back { background: none; border: none; color: #71717a; cursor: pointer; }
.wizard-primary {
    padding: 0.75rem 1.5rem;
    border-radius: 12px;
    border: none;
    background: white;
    color: #18181b;
    font-weight: 600;
    cursor: pointer;
}
.wizard-submit { background: linear-gradient(to right, #1e90ff, #39ff14); font-weight: bold; }
.wizard-submit:disabled { opacity: 0.7; cursor: not-allowed; }
.wizard-success { width: 100%; padding: 3rem; text-align: center; }
.wizard-success-icon {
    width: 6rem;
    height: 6rem;
    margin: 0 auto 1.5rem;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 3rem;
    background: rgba(57, 255, 20, 0.2);
    color: #39ff14;
}
.wizard-success h3 { font-size: 1.875rem; color: white; margin-bottom: 1rem; }
.wizard-success p { color: #a1a1aa; margin-bottom: 2rem; }
.loading-spinner {
    display: inline-block;
    width: 20px;
    height: 20px;
    border: 3px solid rgba(0,0,0,.3);
    border-radius: 50%;
    border-top-color: #18181b;
    animation: spin 1s ease-in-out infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
@media (max-width: 768px) {
    .wizard-modal { flex-direction: column; }
    .wizard-progress { width: auto; display: flex; gap: 1rem; border-right: none; border-bottom: 1px solid rgba(255, 255, 255, 0.08); }
    .wizard-progress-label { display: none; }
    .wizard-grid, .wizard-budgets { grid-template-columns: repeat(2, 1fr); }
}
"#;
